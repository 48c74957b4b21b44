//! RNG seed derivation for deterministic bot behavior.
//!
//! Every bot decision gets its own seed derived from the game's stored
//! `rng_seed`, so replaying a game reproduces the same choices.

/// Kind of decision a seed is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Leader,
    Team,
    Vote,
    Action,
    Target,
}

impl Decision {
    const fn offset(self) -> u64 {
        match self {
            Decision::Leader => 1,
            Decision::Team => 2,
            Decision::Vote => 3,
            Decision::Action => 4,
            Decision::Target => 5,
        }
    }
}

/// Seed for one decision at (mission, attempt) by `seat`.
pub fn derive_decision_seed(
    game_seed: i64,
    decision: Decision,
    mission: usize,
    attempt: usize,
    seat: usize,
) -> u64 {
    // Sign does not matter for a seed.
    let base = game_seed as u64;
    base.wrapping_add((mission as u64).wrapping_mul(1_000_000))
        .wrapping_add((attempt as u64).wrapping_mul(10_000))
        .wrapping_add((seat as u64).wrapping_mul(100))
        .wrapping_add(decision.offset())
}

/// Seed for choosing the first leader.
pub fn derive_leader_seed(game_seed: i64) -> u64 {
    derive_decision_seed(game_seed, Decision::Leader, 0, 0, 0)
}
