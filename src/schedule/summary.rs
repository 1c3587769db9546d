use std::collections::BTreeMap;

use serde::Serialize;

use super::slot_utils::{court_label, first_round_for_arrival};
use super::types::{Configuration, GenderRule, Participant, ParticipantId, ParticipantKind, PlayerRef, Round};

/// Matches each participant appears in across the schedule
pub fn games_per_participant(rounds: &[Round]) -> BTreeMap<ParticipantId, u32> {
    let mut games = BTreeMap::new();
    for round in rounds {
        for m in &round.matches {
            for player in m.players() {
                *games.entry(player.id.clone()).or_insert(0) += 1;
            }
        }
    }
    games
}

/// One played match with its round context
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub round: usize,
    pub time: String,
    pub court_id: u32,
    pub court_label: String,
    #[serde(rename = "type")]
    pub rule: GenderRule,
    pub team1: [PlayerRef; 2],
    pub team2: [PlayerRef; 2],
}

/// All matches flattened, round by round then court by court
pub fn match_log(rounds: &[Round]) -> Vec<MatchRecord> {
    rounds
        .iter()
        .flat_map(|round| {
            round.matches.iter().map(move |m| MatchRecord {
                round: round.round,
                time: round.time.clone(),
                court_id: m.court_id,
                court_label: court_label(m.court_id),
                rule: m.rule,
                team1: m.team1.clone(),
                team2: m.team2.clone(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterLine {
    pub id: ParticipantId,
    pub name: String,
    pub kind: ParticipantKind,
    pub skill_score: f64,
    pub games: u32,
    pub quota: u32,
    pub first_round: usize,
}

/// Members then guests, each group strongest first.
/// Equal scores stay in registration order.
pub fn roster_overview(participants: &[Participant], rounds: &[Round], config: &Configuration) -> Vec<RosterLine> {
    let games = games_per_participant(rounds);
    let mut lines: Vec<RosterLine> = participants
        .iter()
        .map(|p| RosterLine {
            id: p.id.clone(),
            name: p.name.clone(),
            kind: p.kind,
            skill_score: p.skill_score(),
            games: games.get(&p.id).copied().unwrap_or(0),
            quota: p.quota,
            first_round: first_round_for_arrival(config, p.arrival_time),
        })
        .collect();

    lines.sort_by(|a, b| {
        let group = |kind: ParticipantKind| kind == ParticipantKind::Guest;
        group(a.kind)
            .cmp(&group(b.kind))
            .then_with(|| b.skill_score.total_cmp(&a.skill_score))
    });
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::slot_utils::ClockTime;
    use crate::schedule::types::{Gender, Match, SkillRatings};

    fn player_ref(id: &str) -> PlayerRef {
        PlayerRef { id: id.to_string(), name: id.to_uppercase() }
    }

    fn sample_rounds() -> Vec<Round> {
        let m = |court_id: u32, ids: [&str; 4]| Match {
            court_id,
            rule: GenderRule::Any,
            team1: [player_ref(ids[0]), player_ref(ids[1])],
            team2: [player_ref(ids[2]), player_ref(ids[3])],
        };
        vec![
            Round {
                round: 1,
                time: "20:00".to_string(),
                matches: vec![m(1, ["a", "b", "c", "d"]), m(2, ["e", "f", "g", "h"])],
                resting: vec![],
            },
            Round {
                round: 2,
                time: "20:30".to_string(),
                matches: vec![m(1, ["a", "c", "e", "g"])],
                resting: vec![player_ref("b")],
            },
        ]
    }

    #[test]
    fn test_games_per_participant() {
        let games = games_per_participant(&sample_rounds());
        assert_eq!(games["a"], 2);
        assert_eq!(games["b"], 1);
        assert_eq!(games.len(), 8);
    }

    #[test]
    fn test_match_log_order() {
        let log = match_log(&sample_rounds());
        let keys: Vec<(usize, String)> = log.iter().map(|r| (r.round, r.court_label.clone())).collect();
        assert_eq!(
            keys,
            vec![(1, "A".to_string()), (1, "B".to_string()), (2, "A".to_string())]
        );
        assert_eq!(log[2].time, "20:30");
    }

    #[test]
    fn test_roster_overview_groups_and_sorts() {
        let mut weak = Participant::new("a", "A", Gender::Male);
        weak.skills = SkillRatings::uniform(2.0);
        let mut strong = Participant::new("b", "B", Gender::Female);
        strong.skills = SkillRatings::uniform(4.0);
        strong.arrival_time = Some(ClockTime::from_hm(20, 30));
        let mut guest = Participant::new("c", "C", Gender::Male);
        guest.skills = SkillRatings::uniform(5.0);
        guest.kind = ParticipantKind::Guest;
        let tied = Participant::new("d", "D", Gender::Male);
        let tied_later = Participant::new("e", "E", Gender::Male);

        let roster = vec![weak, strong, guest, tied, tied_later];
        let lines = roster_overview(&roster, &sample_rounds(), &Configuration::default());

        let order: Vec<&str> = lines.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "e", "a", "c"]);
        assert_eq!(lines[0].first_round, 2);
        assert_eq!(lines[3].games, 2);
        assert_eq!(lines[3].skill_score, 10.0);
    }
}
