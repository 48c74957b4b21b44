//! Random bot - makes random legal moves.

use std::sync::Mutex;

use rand::prelude::*;
use rand::seq::index;

use super::trait_def::{BotError, BotPlayer, BotView};
use crate::domain::{game_reveal, Seat};

/// Bot that picks uniformly among legal moves.
///
/// Uses `Mutex<StdRng>` because [`BotPlayer`] methods take `&self`.
pub struct RandomBot {
    rng: Mutex<StdRng>,
}

impl RandomBot {
    pub const NAME: &'static str = "RandomBot";

    /// `Some(seed)` gives reproducible choices; `None` draws from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T, BotError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| BotError::Internal(format!("RNG lock poisoned: {e}")))?;
        Ok(f(&mut rng))
    }
}

impl BotPlayer for RandomBot {
    fn choose_team(&self, view: &BotView<'_>) -> Result<Vec<Seat>, BotError> {
        let seats = view.game.seat_count();
        let size = view.game.current_mission().size;
        if size == 0 || size > seats {
            return Err(BotError::InvalidMove(format!(
                "Cannot pick a team of {size} from {seats} seats"
            )));
        }

        // Itself, plus distinct others drawn from the remaining seats.
        let others = self.with_rng(|rng| index::sample(rng, seats - 1, size - 1))?;
        let mut team = Vec::with_capacity(size);
        team.push(view.seat);
        team.extend(others.into_iter().map(|pos| {
            if pos >= view.seat {
                pos + 1
            } else {
                pos
            }
        }));
        Ok(team)
    }

    fn choose_vote(&self, _view: &BotView<'_>) -> Result<bool, BotError> {
        self.with_rng(|rng| rng.random_bool(0.5))
    }

    fn choose_target(&self, view: &BotView<'_>) -> Result<Seat, BotError> {
        let known_evil: Vec<Seat> = game_reveal(view.game, view.seat)
            .into_iter()
            .flat_map(|entry| entry.players)
            .collect();
        let candidates: Vec<Seat> = (0..view.game.seat_count())
            .filter(|s| *s != view.seat && !known_evil.contains(s))
            .collect();

        self.with_rng(|rng| candidates.choose(rng).copied())?
            .ok_or_else(|| BotError::InvalidMove("No assassination target available".into()))
    }
}
