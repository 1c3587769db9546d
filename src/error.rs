use std::collections::HashSet;

use thiserror::Error;

use crate::schedule::slot_utils::calculate_rounds;
use crate::schedule::types::{Configuration, Participant, SlotConstraint, MAX_COURTS};

/// Errors raised at the boundary, before or around a generation run
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("participant at position {0} has an empty id")]
    EmptyId(usize),

    #[error("duplicate participant id: {0}")]
    DuplicateId(String),

    #[error("participant {id}: {skill} rating {value} must be between 1 and 5 in steps of 0.5")]
    InvalidSkill {
        id: String,
        skill: &'static str,
        value: f64,
    },

    #[error("court count must be at least 1")]
    NoCourts,

    #[error("court count {count} exceeds the maximum of {max}")]
    TooManyCourts { count: u32, max: u32 },

    #[error("match duration must be greater than zero")]
    ZeroDuration,

    #[error("window end {end} must be after window start {start}")]
    InvalidWindow { start: String, end: String },

    #[error("constraint for round {round_index}, court {court_index} is outside the {rounds}x{courts} slot grid")]
    ConstraintOutOfRange {
        round_index: usize,
        court_index: usize,
        rounds: usize,
        courts: u32,
    },

    #[error("at least 4 participants with a positive quota are required, found {0}")]
    NotEnoughParticipants(usize),

    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("invalid gender '{0}', expected M or F")]
    InvalidGender(String),

    #[error("row {row} is missing a value in column {column}")]
    MissingValue { column: String, row: usize },

    #[error("invalid number '{value}' in column {column}")]
    InvalidNumber { column: String, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

fn is_valid_rating(value: f64) -> bool {
    (1.0..=5.0).contains(&value) && (value * 2.0).fract() == 0.0
}

/// Checks the preconditions `generate` relies on
pub fn validate(
    participants: &[Participant],
    config: &Configuration,
    constraints: &[SlotConstraint],
) -> ScheduleResult<()> {
    if config.court_count == 0 {
        return Err(ScheduleError::NoCourts);
    }
    if config.court_count > MAX_COURTS {
        return Err(ScheduleError::TooManyCourts {
            count: config.court_count,
            max: MAX_COURTS,
        });
    }
    if config.match_duration == 0 {
        return Err(ScheduleError::ZeroDuration);
    }
    if config.end_time <= config.start_time {
        return Err(ScheduleError::InvalidWindow {
            start: config.start_time.to_string(),
            end: config.end_time.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (position, participant) in participants.iter().enumerate() {
        if participant.id.trim().is_empty() {
            return Err(ScheduleError::EmptyId(position));
        }
        if !seen.insert(participant.id.as_str()) {
            return Err(ScheduleError::DuplicateId(participant.id.clone()));
        }
        for (skill, value) in participant.skills.values() {
            if !is_valid_rating(value) {
                return Err(ScheduleError::InvalidSkill {
                    id: participant.id.clone(),
                    skill,
                    value,
                });
            }
        }
    }

    let rounds = calculate_rounds(config).len();
    for constraint in constraints {
        if constraint.round_index >= rounds || constraint.court_index >= config.court_count as usize {
            return Err(ScheduleError::ConstraintOutOfRange {
                round_index: constraint.round_index,
                court_index: constraint.court_index,
                rounds,
                courts: config.court_count,
            });
        }
    }

    Ok(())
}

/// Minimum roster size check done by the caller-facing layers
pub fn ensure_enough_participants(participants: &[Participant]) -> ScheduleResult<()> {
    let active = participants.iter().filter(|p| !p.is_excluded()).count();
    if active < 4 {
        return Err(ScheduleError::NotEnoughParticipants(active));
    }
    Ok(())
}
