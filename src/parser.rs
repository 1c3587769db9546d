use std::fs;
use std::path::Path;

use csv::{Reader, StringRecord};

use crate::config::Settings;
use crate::error::{ScheduleError, ScheduleResult};
use crate::schedule::types::{
    Gender, Participant, ParticipantKind, SkillRatings, DEFAULT_QUOTA, DEFAULT_SPEED,
};
use crate::schedule::ClockTime;

/// Column positions found in the roster header
struct RosterColumns {
    name: Option<usize>,
    id: Option<usize>,
    gender: Option<usize>,
    forehand: Option<usize>,
    backhand: Option<usize>,
    volley: Option<usize>,
    serve: Option<usize>,
    speed: Option<usize>,
    quota: Option<usize>,
    arrival: Option<usize>,
    kind: Option<usize>,
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim().to_lowercase();
        names.iter().any(|n| h == *n)
    })
}

impl RosterColumns {
    fn from_headers(headers: &StringRecord) -> Self {
        RosterColumns {
            name: find_column(headers, &["name"]),
            id: find_column(headers, &["id", "player id"]),
            gender: find_column(headers, &["gender", "sex"]),
            forehand: find_column(headers, &["forehand"]),
            backhand: find_column(headers, &["backhand"]),
            volley: find_column(headers, &["volley"]),
            serve: find_column(headers, &["serve"]),
            speed: find_column(headers, &["speed"]),
            quota: find_column(headers, &["quota", "max games", "maxgames", "max_games"]),
            arrival: find_column(headers, &["arrival", "arrival time", "arrivaltime", "arrival_time"]),
            kind: find_column(headers, &["type", "kind"]),
        }
    }
}

fn cell<'a>(record: &'a StringRecord, col: Option<usize>) -> &'a str {
    col.and_then(|c| record.get(c)).unwrap_or("").trim()
}

fn parse_gender(value: &str) -> ScheduleResult<Gender> {
    match value.to_uppercase().as_str() {
        "M" | "MALE" => Ok(Gender::Male),
        "F" | "FEMALE" => Ok(Gender::Female),
        _ => Err(ScheduleError::InvalidGender(value.to_string())),
    }
}

/// Parses a number, using the default when the cell is empty
fn parse_number<T: std::str::FromStr>(value: &str, column: &str, default: T) -> ScheduleResult<T> {
    if value.is_empty() {
        return Ok(default);
    }
    value.parse().map_err(|_| ScheduleError::InvalidNumber {
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Parses a number that has no default
fn parse_required<T: std::str::FromStr>(value: &str, column: &str, row: usize) -> ScheduleResult<T> {
    if value.is_empty() {
        return Err(ScheduleError::MissingValue {
            column: column.to_string(),
            row,
        });
    }
    value.parse().map_err(|_| ScheduleError::InvalidNumber {
        column: column.to_string(),
        value: value.to_string(),
    })
}

fn parse_kind(value: &str) -> ParticipantKind {
    if value.eq_ignore_ascii_case("guest") {
        ParticipantKind::Guest
    } else {
        ParticipantKind::Member
    }
}

/// Reads participants from CSV. Row order is registration order.
/// Rows without a name are skipped; a missing id falls back to the row number.
/// Forehand, backhand, volley and serve must be filled in; speed and quota have defaults.
pub fn parse_roster_csv<R: std::io::Read>(source: R) -> ScheduleResult<Vec<Participant>> {
    let mut reader = Reader::from_reader(source);
    let columns = RosterColumns::from_headers(reader.headers()?);
    let mut participants = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let name = cell(&record, columns.name).to_string();
        if name.is_empty() {
            continue;
        }
        let line = row + 1;
        let id = match cell(&record, columns.id) {
            "" => line.to_string(),
            id => id.to_string(),
        };

        let skills = SkillRatings {
            forehand: parse_required(cell(&record, columns.forehand), "forehand", line)?,
            backhand: parse_required(cell(&record, columns.backhand), "backhand", line)?,
            volley: parse_required(cell(&record, columns.volley), "volley", line)?,
            serve: parse_required(cell(&record, columns.serve), "serve", line)?,
            speed: parse_number(cell(&record, columns.speed), "speed", DEFAULT_SPEED)?,
        };

        let arrival_time = match cell(&record, columns.arrival) {
            "" => None,
            time => Some(ClockTime::parse(time)?),
        };

        participants.push(Participant {
            id,
            name,
            gender: parse_gender(cell(&record, columns.gender))?,
            skills,
            quota: parse_number(cell(&record, columns.quota), "quota", DEFAULT_QUOTA)?,
            arrival_time,
            kind: parse_kind(cell(&record, columns.kind)),
        });
    }

    Ok(participants)
}

/// Loads a roster from a `.json` list or a CSV file
pub fn load_roster<P: AsRef<Path>>(path: P) -> ScheduleResult<Vec<Participant>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    } else {
        parse_roster_csv(fs::File::open(path)?)
    }
}

/// Loads `{ config, constraints }` from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> ScheduleResult<Settings> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
