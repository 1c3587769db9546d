use super::history::RunState;
use super::types::Participant;

pub const MIXED_BONUS: f64 = 50.0;
pub const SAME_COMPOSITION_BONUS: f64 = 30.0;
pub const MISMATCH_PENALTY: f64 = 20.0;
pub const PARTNER_REPEAT_COST: f64 = 100.0;
pub const OPPONENT_REPEAT_COST: f64 = 20.0;

/// Team split of four selected players, as positions 0..4 in selection order.
/// Enumeration order decides ties.
pub const PARTITIONS: [([usize; 2], [usize; 2]); 3] = [
    ([0, 1], [2, 3]),
    ([0, 2], [1, 3]),
    ([0, 3], [1, 2]),
];

fn gender_code(participants: &[Participant], team: [usize; 2]) -> [char; 2] {
    let mut code = [
        participants[team[0]].gender.code(),
        participants[team[1]].gender.code(),
    ];
    code.sort_unstable();
    code
}

/// Match quality for team1 vs team2, both given as roster indexes.
/// Higher is better. Pure function of the inputs.
pub fn match_quality(
    participants: &[Participant],
    state: &RunState,
    team1: [usize; 2],
    team2: [usize; 2],
) -> f64 {
    let mut score = 0.0;

    let skill = |team: [usize; 2]| -> f64 { team.iter().map(|&i| participants[i].skill_score()).sum() };
    let diff = (skill(team1) - skill(team2)).abs();
    score -= 2.0 * diff * diff;

    let g1 = gender_code(participants, team1);
    let g2 = gender_code(participants, team2);
    let mixed = ['F', 'M'];
    if g1 == mixed && g2 == mixed {
        score += MIXED_BONUS;
    } else if g1 == g2 {
        score += SAME_COMPOSITION_BONUS;
    } else {
        score -= MISMATCH_PENALTY;
    }

    let partner_repeats = state.partners.get(team1[0], team1[1]) + state.partners.get(team2[0], team2[1]);
    score -= f64::from(partner_repeats) * PARTNER_REPEAT_COST;

    let opponent_repeats: u32 = team1
        .iter()
        .flat_map(|&a| team2.iter().map(move |&b| (a, b)))
        .map(|(a, b)| state.opponents.get(a, b))
        .sum();
    score -= f64::from(opponent_repeats) * OPPONENT_REPEAT_COST;

    score
}

/// Best 2-vs-2 split of `selected`, returned as two teams of roster indexes
pub fn best_split(
    participants: &[Participant],
    state: &RunState,
    selected: [usize; 4],
) -> ([usize; 2], [usize; 2]) {
    let mut best = ([selected[0], selected[1]], [selected[2], selected[3]]);
    let mut best_score = f64::NEG_INFINITY;

    for (a, b) in PARTITIONS {
        let team1 = [selected[a[0]], selected[a[1]]];
        let team2 = [selected[b[0]], selected[b[1]]];
        let score = match_quality(participants, state, team1, team2);
        // strict comparison keeps the earliest split on ties
        if score > best_score {
            best_score = score;
            best = (team1, team2);
        }
    }

    best
}
