//! Bot players - automated decisions for seats without a human.
//!
//! This module provides:
//! - [`BotPlayer`] trait for different bot implementations
//! - [`RandomBot`]: random teams and votes, seedable for tests

mod random;
mod trait_def;

pub use random::RandomBot;
pub use trait_def::{BotError, BotPlayer, BotView};

use crate::domain::seed_derivation::{derive_decision_seed, Decision};
use crate::domain::Game;

/// Bot for one decision, seeded from the game so replays repeat it.
pub fn bot_for(game: &Game, decision: Decision, seat: usize) -> RandomBot {
    let seed = derive_decision_seed(
        game.info.rng_seed,
        decision,
        game.state.this_mission,
        game.state.this_proposal,
        seat,
    );
    RandomBot::new(Some(seed))
}
