//! Doubles rotation scheduler: fills courts round by round from a roster,
//! keeping play counts even and match-ups balanced and varied.

pub mod config;
pub mod display;
pub mod error;
pub mod parser;
pub mod schedule;
pub mod web;

pub use error::{ScheduleError, ScheduleResult};
pub use schedule::{generate, generate_checked};
