use std::collections::BTreeMap;

/// Symmetric pair -> count table keyed by roster index.
/// Pairs are stored with the lower index first so (a, b) and (b, a) share a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairHistory {
    counts: BTreeMap<(usize, usize), u32>,
}

impl PairHistory {
    fn key(a: usize, b: usize) -> (usize, usize) {
        if a <= b { (a, b) } else { (b, a) }
    }

    pub fn get(&self, a: usize, b: usize) -> u32 {
        self.counts.get(&Self::key(a, b)).copied().unwrap_or(0)
    }

    pub fn record(&mut self, a: usize, b: usize) {
        *self.counts.entry(Self::key(a, b)).or_insert(0) += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(usize, usize), &u32)> {
        self.counts.iter()
    }
}

/// Per-participant counters for one generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub games_played: u32,
    pub rounds_rested: u32,
}

/// Everything a generation run remembers between rounds.
/// Owned by a single `generate` call; nothing here is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    players: Vec<PlayerState>,
    pub partners: PairHistory,
    pub opponents: PairHistory,
}

impl RunState {
    pub fn new(roster_size: usize) -> Self {
        RunState {
            players: vec![PlayerState::default(); roster_size],
            partners: PairHistory::default(),
            opponents: PairHistory::default(),
        }
    }

    pub fn player(&self, index: usize) -> &PlayerState {
        &self.players[index]
    }

    pub fn games_played(&self, index: usize) -> u32 {
        self.players[index].games_played
    }

    pub fn rounds_rested(&self, index: usize) -> u32 {
        self.players[index].rounds_rested
    }

    pub fn record_played(&mut self, index: usize) {
        let state = &mut self.players[index];
        state.games_played += 1;
        state.rounds_rested = 0;
    }

    pub fn record_rested(&mut self, index: usize) {
        self.players[index].rounds_rested += 1;
    }

    /// Partner tally for each team, opponent tally for each cross-team pair
    pub fn record_match(&mut self, team1: [usize; 2], team2: [usize; 2]) {
        self.partners.record(team1[0], team1[1]);
        self.partners.record(team2[0], team2[1]);
        for &a in &team1 {
            for &b in &team2 {
                self.opponents.record(a, b);
            }
        }
    }
}
