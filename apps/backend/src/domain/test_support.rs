use time::OffsetDateTime;

use super::cards::Card;
use super::setup::{rules_for, GameSetup, MIN_PLAYERS};
use super::state::{Game, GameState, GameStatic};

/// All-human game where seat `i` holds `cards[i]`.
pub fn game_with_cards(cards: &[Card]) -> Game {
    let rules = rules_for(cards.len().max(MIN_PLAYERS)).expect("supported player count");
    Game {
        info: GameStatic {
            id: "test-game".into(),
            hangout: "test-hangout".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            setup: GameSetup {
                spies: rules.spies,
                missions: rules.missions.to_vec(),
                cards: cards.to_vec(),
            },
            players: (0..cards.len()).map(|i| format!("user-{i}")).collect(),
            bots: Vec::new(),
            roles: (0..cards.len()).collect(),
            rng_seed: 0,
        },
        state: GameState::initial(),
    }
}
