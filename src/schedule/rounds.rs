use tracing::{debug, info};

use super::eligibility::{eligible_for_slot, is_available};
use super::history::RunState;
use super::pairing::best_split;
use super::ranking::{order_slots, select_four};
use super::slot_utils::{calculate_rounds, round_slots, RoundSlot};
use super::types::{Configuration, Match, Participant, PlayerRef, Round, SlotConstraint};
use crate::error::{validate, ScheduleResult};

/// Builds the full schedule in one left-to-right pass over the rounds.
///
/// Inputs are never modified; all cross-round memory lives in a `RunState`
/// created here and dropped on return, so concurrent calls are independent.
/// Slots that cannot find 4 eligible players are left empty.
pub fn generate(
    participants: &[Participant],
    config: &Configuration,
    constraints: &[SlotConstraint],
) -> Vec<Round> {
    let mut state = RunState::new(participants.len());
    let schedule: Vec<Round> = calculate_rounds(config)
        .iter()
        .map(|round| assemble_round(participants, config, constraints, round, &mut state))
        .collect();

    info!(
        "Generated {} rounds with {} matches for {} participants",
        schedule.len(),
        schedule.iter().map(|r| r.matches.len()).sum::<usize>(),
        participants.len()
    );
    schedule
}

/// Validates the inputs first, then generates
pub fn generate_checked(
    participants: &[Participant],
    config: &Configuration,
    constraints: &[SlotConstraint],
) -> ScheduleResult<Vec<Round>> {
    validate(participants, config, constraints)?;
    Ok(generate(participants, config, constraints))
}

fn assemble_round(
    participants: &[Participant],
    config: &Configuration,
    constraints: &[SlotConstraint],
    round: &RoundSlot,
    state: &mut RunState,
) -> Round {
    let mut slots = round_slots(config, constraints, round);
    order_slots(&mut slots);

    let mut placed = vec![false; participants.len()];
    let mut formed = Vec::new();

    for slot in slots {
        let candidates = eligible_for_slot(participants, state, &placed, round.start, slot.rule);
        let Some(selected) = select_four(state, &candidates) else {
            debug!(
                "Round {} court {}: not enough eligible players for {:?}, slot left empty",
                round.index + 1,
                slot.court_label,
                slot.rule
            );
            continue;
        };

        for &i in &selected {
            placed[i] = true;
        }
        let (team1, team2) = best_split(participants, state, selected);
        formed.push((slot, team1, team2));
    }

    // counts are still pre-round here, which is what availability is judged on
    let resting: Vec<usize> = (0..participants.len())
        .filter(|&i| !placed[i] && is_available(&participants[i], state.games_played(i), round.start))
        .collect();

    for i in (0..participants.len()).filter(|&i| placed[i]) {
        state.record_played(i);
    }
    for &i in &resting {
        state.record_rested(i);
    }
    for (_, team1, team2) in &formed {
        state.record_match(*team1, *team2);
    }

    let player = |i: usize| PlayerRef::from(&participants[i]);
    let mut matches: Vec<Match> = formed
        .into_iter()
        .map(|(slot, team1, team2)| Match {
            court_id: slot.court_id,
            rule: slot.rule,
            team1: [player(team1[0]), player(team1[1])],
            team2: [player(team2[0]), player(team2[1])],
        })
        .collect();
    matches.sort_by_key(|m| m.court_id);

    debug!(
        "Round {} at {}: {} matches, {} resting",
        round.index + 1,
        round.label(),
        matches.len(),
        resting.len()
    );

    Round {
        round: round.index + 1,
        time: round.label(),
        matches,
        resting: resting.into_iter().map(player).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use crate::schedule::slot_utils::ClockTime;
    use crate::schedule::types::{Gender, GenderRule, SkillRatings};

    fn player(id: &str, gender: Gender) -> Participant {
        Participant::new(id, id, gender)
    }

    fn one_hour(courts: u32) -> Configuration {
        Configuration {
            court_count: courts,
            start_time: ClockTime::from_hm(20, 0),
            end_time: ClockTime::from_hm(21, 0),
            match_duration: 30,
        }
    }

    fn ids(players: &[PlayerRef]) -> Vec<&str> {
        players.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_four_players_play_every_round() {
        let roster: Vec<Participant> = ["a", "b", "c", "d"].iter().map(|id| player(id, Gender::Male)).collect();
        let schedule = generate(&roster, &one_hour(1), &[]);

        assert_eq!(schedule.len(), 2);
        for (n, round) in schedule.iter().enumerate() {
            assert_eq!(round.round, n + 1);
            assert_eq!(round.matches.len(), 1);
            assert!(round.resting.is_empty());
            for id in ["a", "b", "c", "d"] {
                assert!(round.matches[0].contains(id));
            }
        }
        assert_eq!(schedule[0].time, "20:00");
        assert_eq!(schedule[1].time, "20:30");
    }

    #[test]
    fn test_second_round_changes_partners() {
        let roster: Vec<Participant> = ["a", "b", "c", "d"].iter().map(|id| player(id, Gender::Male)).collect();
        let schedule = generate(&roster, &one_hour(1), &[]);

        let first = &schedule[0].matches[0];
        let second = &schedule[1].matches[0];
        assert_eq!(ids(&first.team1), vec!["a", "b"]);
        assert_ne!(ids(&second.team1), vec!["a", "b"]);
    }

    #[test]
    fn test_fifth_player_rests_then_plays() {
        let roster: Vec<Participant> = ["a", "b", "c", "d", "e"].iter().map(|id| player(id, Gender::Male)).collect();
        let schedule = generate(&roster, &one_hour(1), &[]);

        // round 1 ties on everything, registration order benches "e"
        assert_eq!(ids(&schedule[0].resting), vec!["e"]);
        // round 2: "e" has fewest games, then a, b, c by registration
        assert!(schedule[1].matches[0].contains("e"));
        assert_eq!(ids(&schedule[1].resting), vec!["d"]);
    }

    #[test]
    fn test_restricted_court_filled_first() {
        // 4 women and 2 men, 2 courts, court 2 women-only in round 1
        let roster = vec![
            player("f1", Gender::Female),
            player("m1", Gender::Male),
            player("f2", Gender::Female),
            player("m2", Gender::Male),
            player("f3", Gender::Female),
            player("f4", Gender::Female),
        ];
        let constraints = vec![SlotConstraint { round_index: 0, court_index: 1, rule: GenderRule::FemaleOnly }];
        let schedule = generate(&roster, &one_hour(2), &constraints);

        let round = &schedule[0];
        assert_eq!(round.matches.len(), 1);
        let m = &round.matches[0];
        assert_eq!(m.court_id, 2);
        assert_eq!(m.rule, GenderRule::FemaleOnly);
        for id in ["f1", "f2", "f3", "f4"] {
            assert!(m.contains(id));
        }
        assert_eq!(ids(&round.resting), vec!["m1", "m2"]);
    }

    #[test]
    fn test_matches_sorted_by_court() {
        let roster: Vec<Participant> = (0..8)
            .map(|i| player(&format!("p{}", i), if i % 2 == 0 { Gender::Male } else { Gender::Female }))
            .collect();
        let constraints = vec![SlotConstraint { round_index: 0, court_index: 1, rule: GenderRule::MaleOnly }];
        let schedule = generate(&roster, &one_hour(2), &constraints);

        let courts: Vec<u32> = schedule[0].matches.iter().map(|m| m.court_id).collect();
        assert_eq!(courts, vec![1, 2]);
        assert!(["p0", "p2", "p4", "p6"].iter().all(|id| schedule[0].matches[1].contains(id)));
    }

    #[test]
    fn test_quota_stops_play() {
        let mut roster: Vec<Participant> = ["a", "b", "c", "d"].iter().map(|id| player(id, Gender::Male)).collect();
        roster[0].quota = 1;
        let schedule = generate(&roster, &one_hour(1), &[]);

        assert_eq!(schedule[0].matches.len(), 1);
        // only 3 players left with quota, and "a" is not resting either
        assert!(schedule[1].matches.is_empty());
        assert_eq!(ids(&schedule[1].resting), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_generate_checked_rejects_bad_input() {
        let mut roster: Vec<Participant> = ["a", "b", "c", "d"].iter().map(|id| player(id, Gender::Male)).collect();
        roster[2].skills = SkillRatings::uniform(6.0);
        assert!(matches!(
            generate_checked(&roster, &one_hour(1), &[]),
            Err(ScheduleError::InvalidSkill { .. })
        ));

        roster[2].skills = SkillRatings::default();
        assert_eq!(generate_checked(&roster, &one_hour(1), &[]).unwrap().len(), 2);
    }
}
