pub mod types;
pub mod slot_utils;
pub mod history;
pub mod eligibility;
pub mod ranking;
pub mod pairing;
pub mod rounds;
pub mod summary;

pub use types::{
    Configuration, Gender, GenderRule, Match, Participant, ParticipantKind, PlayerRef, Round,
    SkillRatings, SlotConstraint, SlotInfo,
};
pub use slot_utils::{calculate_rounds, court_label, slot_grid, ClockTime};
pub use rounds::{generate, generate_checked};
pub use summary::{games_per_participant, match_log, roster_overview};
