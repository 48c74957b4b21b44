//! Mission scoring and win predicates.

use super::cards::Card;
use super::setup::WINNING_SCORE;
use super::state::{Game, MissionResult};

/// (good, evil) mission wins. A mission goes to evil when its fails exceed
/// the allowance.
pub fn count_score(results: &[MissionResult]) -> (u8, u8) {
    results.iter().fold((0, 0), |(good, evil), result| {
        if result.evil_won() {
            (good, evil + 1)
        } else {
            (good + 1, evil)
        }
    })
}

/// Shared good-side predicate: false once Merlin has been assassinated,
/// otherwise good needs three missions.
pub fn good_has_won(game: &Game) -> bool {
    if let Some(target) = game.state.assassin_target {
        if game.card_at(target) == Card::Merlin {
            return false;
        }
    }
    game.state.good_score >= WINNING_SCORE
}

pub fn result_text(game: &Game) -> &'static str {
    if good_has_won(game) {
        "Good has won"
    } else {
        "Evil has won"
    }
}
