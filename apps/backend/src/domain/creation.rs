//! Building a new game from a validated start request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::seq::SliceRandom;
use rand::Rng;
use time::OffsetDateTime;

use super::setup::{ValidatedStart, BOT_PREFIX};
use super::state::{Game, GameState, GameStatic};

const GAME_ID_BYTES: usize = 32;

/// High-entropy URL-safe game id.
pub fn generate_game_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; GAME_ID_BYTES];
    rng.fill(&mut bytes[..]);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Shuffle seats, deal roles and derive the bot seats.
pub fn new_game<R: Rng + ?Sized>(
    id: String,
    hangout: String,
    created_at: OffsetDateTime,
    start: ValidatedStart,
    rng: &mut R,
) -> Game {
    let ValidatedStart { mut players, setup } = start;
    players.shuffle(rng);

    let bots = players
        .iter()
        .enumerate()
        .filter(|(_, user)| user.starts_with(BOT_PREFIX))
        .map(|(seat, _)| seat)
        .collect();

    let mut roles: Vec<usize> = (0..players.len()).collect();
    roles.shuffle(rng);

    Game {
        info: GameStatic {
            id,
            hangout,
            created_at,
            setup,
            players,
            bots,
            roles,
            rng_seed: rng.random(),
        },
        state: GameState::initial(),
    }
}
