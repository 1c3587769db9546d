use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::{Configuration, GenderRule, SlotConstraint, SlotInfo};
use crate::error::ScheduleError;

/// Time of day with minute precision, written as "HH:MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    pub const fn from_hm(hours: u32, minutes: u32) -> Self {
        ClockTime(hours * 60 + minutes)
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        ClockTime(minutes)
    }

    pub const fn minutes(self) -> u32 {
        self.0
    }

    pub fn parse(value: &str) -> Result<Self, ScheduleError> {
        let time = NaiveTime::parse_from_str(value.trim(), "%H:%M")
            .map_err(|_| ScheduleError::InvalidTime(value.to_string()))?;
        Ok(ClockTime(time.hour() * 60 + time.minute()))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&minutes_to_time_string(self.0))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ClockTime::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parses a time string (HH:MM) to minutes since midnight
pub fn parse_time_to_minutes(time_str: &str) -> Option<u32> {
    ClockTime::parse(time_str).ok().map(ClockTime::minutes)
}

/// Formats minutes since midnight to time string (HH:MM)
pub fn minutes_to_time_string(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    format!("{:02}:{:02}", hours % 24, mins)
}

/// A round start produced by the slot generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSlot {
    /// 0-based
    pub index: usize,
    pub start: ClockTime,
}

impl RoundSlot {
    pub fn label(&self) -> String {
        self.start.to_string()
    }
}

/// Round starts from window start, one every `match_duration` minutes.
/// A period that would run past the window end is dropped.
pub fn calculate_rounds(config: &Configuration) -> Vec<RoundSlot> {
    let mut rounds = Vec::new();
    if config.match_duration == 0 {
        return rounds;
    }

    let end = config.end_time.minutes();
    let mut current = config.start_time.minutes();
    while current < end {
        let next = match current.checked_add(config.match_duration) {
            Some(next) if next <= end => next,
            _ => break,
        };
        rounds.push(RoundSlot {
            index: rounds.len(),
            start: ClockTime::from_minutes(current),
        });
        current = next;
    }
    rounds
}

/// Rule for a (round, court) pair, `Any` when no constraint names it
pub fn rule_for_slot(constraints: &[SlotConstraint], round_index: usize, court_index: usize) -> GenderRule {
    constraints
        .iter()
        .find(|c| c.round_index == round_index && c.court_index == court_index)
        .map(|c| c.rule)
        .unwrap_or_default()
}

/// Slots of a single round, in court order
pub fn round_slots(config: &Configuration, constraints: &[SlotConstraint], round: &RoundSlot) -> Vec<SlotInfo> {
    (0..config.court_count as usize)
        .map(|court_index| {
            let court_id = court_index as u32 + 1;
            SlotInfo {
                round_index: round.index,
                court_index,
                court_id,
                court_label: court_label(court_id),
                time: round.start,
                rule: rule_for_slot(constraints, round.index, court_index),
            }
        })
        .collect()
}

/// Every slot of the window, round by round
pub fn slot_grid(config: &Configuration, constraints: &[SlotConstraint]) -> Vec<SlotInfo> {
    calculate_rounds(config)
        .iter()
        .flat_map(|round| round_slots(config, constraints, round))
        .collect()
}

/// Courts are lettered A, B, C, ...
pub fn court_label(court_id: u32) -> String {
    match court_id {
        1..=26 => char::from(b'A' + (court_id - 1) as u8).to_string(),
        _ => court_id.to_string(),
    }
}

/// First 1-based round a participant arriving at `arrival` can take part in.
/// Arriving one minute late already misses the round in progress.
pub fn first_round_for_arrival(config: &Configuration, arrival: Option<ClockTime>) -> usize {
    let start = config.start_time.minutes();
    match arrival {
        Some(arrival) if arrival.minutes() > start && config.match_duration > 0 => {
            let late = arrival.minutes() - start;
            late.div_ceil(config.match_duration) as usize + 1
        }
        _ => 1,
    }
}
