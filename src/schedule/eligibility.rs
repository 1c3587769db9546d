use super::history::RunState;
use super::slot_utils::ClockTime;
use super::types::{GenderRule, Participant};

/// Arrived by `time` and still has quota left.
/// Also decides who counts as resting for the round.
pub fn is_available(participant: &Participant, games_played: u32, time: ClockTime) -> bool {
    participant.has_arrived_by(time) && participant.quota > 0 && games_played < participant.quota
}

/// Roster indexes allowed into a slot, in registration order.
/// Empty when fewer than 4 qualify, since the slot cannot be filled.
pub fn eligible_for_slot(
    participants: &[Participant],
    state: &RunState,
    placed: &[bool],
    time: ClockTime,
    rule: GenderRule,
) -> Vec<usize> {
    let candidates: Vec<usize> = participants
        .iter()
        .enumerate()
        .filter(|(i, p)| {
            !placed[*i] && is_available(p, state.games_played(*i), time) && rule.admits(p.gender)
        })
        .map(|(i, _)| i)
        .collect();

    if candidates.len() < 4 {
        return Vec::new();
    }
    candidates
}
