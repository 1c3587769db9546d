use std::cmp::Ordering;

use super::history::RunState;
use super::types::SlotInfo;

/// Selection priority between two roster indexes: fewer games first,
/// then longer rest streak, then earlier registration.
pub fn compare_priority(state: &RunState, a: usize, b: usize) -> Ordering {
    state
        .games_played(a)
        .cmp(&state.games_played(b))
        .then_with(|| state.rounds_rested(b).cmp(&state.rounds_rested(a)))
        .then_with(|| a.cmp(&b))
}

/// Top 4 candidates by priority, in priority order.
/// None when the slot cannot be filled.
pub fn select_four(state: &RunState, candidates: &[usize]) -> Option<[usize; 4]> {
    if candidates.len() < 4 {
        return None;
    }
    let mut ranked = candidates.to_vec();
    ranked.sort_by(|&a, &b| compare_priority(state, a, b));
    Some([ranked[0], ranked[1], ranked[2], ranked[3]])
}

/// Gender-restricted slots go first so scarce capacity is filled before
/// open courts draw from the same pool. Stable, so court order holds otherwise.
pub fn order_slots(slots: &mut [SlotInfo]) {
    slots.sort_by_key(|slot| !slot.rule.is_restricted());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::slot_utils::ClockTime;
    use crate::schedule::types::GenderRule;

    fn slot(court_id: u32, rule: GenderRule) -> SlotInfo {
        SlotInfo {
            round_index: 0,
            court_index: court_id as usize - 1,
            court_id,
            court_label: String::new(),
            time: ClockTime::from_hm(20, 0),
            rule,
        }
    }

    #[test]
    fn test_fewest_games_first() {
        let mut state = RunState::new(6);
        state.record_played(0);
        state.record_played(1);
        assert_eq!(select_four(&state, &[0, 1, 2, 3, 4, 5]), Some([2, 3, 4, 5]));
    }

    #[test]
    fn test_longest_rest_breaks_game_ties() {
        let mut state = RunState::new(6);
        state.record_rested(5);
        state.record_rested(5);
        state.record_rested(4);
        assert_eq!(select_four(&state, &[0, 1, 2, 3, 4, 5]), Some([5, 4, 0, 1]));
    }

    #[test]
    fn test_registration_order_is_final_tiebreak() {
        let state = RunState::new(6);
        assert_eq!(select_four(&state, &[5, 3, 1, 0, 4]), Some([0, 1, 3, 4]));
    }

    #[test]
    fn test_too_few_candidates() {
        let state = RunState::new(3);
        assert_eq!(select_four(&state, &[0, 1, 2]), None);
    }

    #[test]
    fn test_restricted_slots_first() {
        let mut slots = vec![
            slot(1, GenderRule::Any),
            slot(2, GenderRule::FemaleOnly),
            slot(3, GenderRule::Any),
            slot(4, GenderRule::MaleOnly),
        ];
        order_slots(&mut slots);
        let order: Vec<u32> = slots.iter().map(|s| s.court_id).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
    }
}
