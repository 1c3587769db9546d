use serde::{Deserialize, Serialize};

use super::slot_utils::ClockTime;

pub type ParticipantId = String;

pub const DEFAULT_QUOTA: u32 = 4;
pub const DEFAULT_SPEED: f64 = 3.0;
/// Upper bound on courts accepted at the boundary
pub const MAX_COURTS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M", alias = "MALE")]
    Male,
    #[serde(rename = "F", alias = "FEMALE")]
    Female,
}

impl Gender {
    /// Single-letter code used for team composition ("FM", "MM", ...)
    pub fn code(self) -> char {
        match self {
            Gender::Male => 'M',
            Gender::Female => 'F',
        }
    }
}

/// Member or guest. Only affects how rosters are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantKind {
    #[default]
    Member,
    Guest,
}

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

fn default_quota() -> u32 {
    DEFAULT_QUOTA
}

/// Five ratings in [1, 5], half-point steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRatings {
    pub forehand: f64,
    pub backhand: f64,
    pub volley: f64,
    pub serve: f64,
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl SkillRatings {
    pub fn uniform(value: f64) -> Self {
        SkillRatings {
            forehand: value,
            backhand: value,
            volley: value,
            serve: value,
            speed: value,
        }
    }

    pub fn values(&self) -> [(&'static str, f64); 5] {
        [
            ("forehand", self.forehand),
            ("backhand", self.backhand),
            ("volley", self.volley),
            ("serve", self.serve),
            ("speed", self.speed),
        ]
    }

    /// Sum of the five ratings, in [5, 25]
    pub fn score(&self) -> f64 {
        self.forehand + self.backhand + self.volley + self.serve + self.speed
    }
}

impl Default for SkillRatings {
    fn default() -> Self {
        SkillRatings::uniform(3.0)
    }
}

/// A registered player. Registration order is the position in the roster list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub gender: Gender,
    #[serde(alias = "stats")]
    pub skills: SkillRatings,
    #[serde(default = "default_quota", alias = "maxGames")]
    pub quota: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<ClockTime>,
    #[serde(default, rename = "type")]
    pub kind: ParticipantKind,
}

impl Participant {
    pub fn new(id: &str, name: &str, gender: Gender) -> Self {
        Participant {
            id: id.to_string(),
            name: name.to_string(),
            gender,
            skills: SkillRatings::default(),
            quota: DEFAULT_QUOTA,
            arrival_time: None,
            kind: ParticipantKind::Member,
        }
    }

    pub fn skill_score(&self) -> f64 {
        self.skills.score()
    }

    pub fn is_excluded(&self) -> bool {
        self.quota == 0
    }

    /// True when the participant has arrived by the given round start
    pub fn has_arrived_by(&self, time: ClockTime) -> bool {
        self.arrival_time.map_or(true, |arrival| arrival <= time)
    }
}

/// Global settings for one generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    pub court_count: u32,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    /// Minutes per match
    pub match_duration: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            court_count: 1,
            start_time: ClockTime::from_hm(20, 0),
            end_time: ClockTime::from_hm(22, 0),
            match_duration: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenderRule {
    #[default]
    Any,
    MaleOnly,
    FemaleOnly,
}

impl GenderRule {
    pub fn admits(self, gender: Gender) -> bool {
        match self {
            GenderRule::Any => true,
            GenderRule::MaleOnly => gender == Gender::Male,
            GenderRule::FemaleOnly => gender == Gender::Female,
        }
    }

    pub fn is_restricted(self) -> bool {
        self != GenderRule::Any
    }
}

/// Per-slot rule. Both indexes are 0-based; missing slots default to `Any`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotConstraint {
    pub round_index: usize,
    pub court_index: usize,
    #[serde(default, rename = "type")]
    pub rule: GenderRule,
}

/// One (round, court) pair waiting to be filled
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotInfo {
    pub round_index: usize,
    pub court_index: usize,
    pub court_id: u32,
    pub court_label: String,
    pub time: ClockTime,
    #[serde(rename = "type")]
    pub rule: GenderRule,
}

/// Lightweight participant reference used in schedule output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: ParticipantId,
    pub name: String,
}

impl From<&Participant> for PlayerRef {
    fn from(p: &Participant) -> Self {
        PlayerRef {
            id: p.id.clone(),
            name: p.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub court_id: u32,
    #[serde(rename = "type")]
    pub rule: GenderRule,
    pub team1: [PlayerRef; 2],
    pub team2: [PlayerRef; 2],
}

impl Match {
    pub fn players(&self) -> impl Iterator<Item = &PlayerRef> {
        self.team1.iter().chain(self.team2.iter())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.players().any(|p| p.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based
    pub round: usize,
    pub time: String,
    pub matches: Vec<Match>,
    pub resting: Vec<PlayerRef>,
}
