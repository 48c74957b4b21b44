//! Cache key layout and expiry classes.

use std::fmt;
use std::time::Duration;

/// Expiry for records that change within a round.
pub const SHORT_TTL: Duration = Duration::from_secs(30);
/// Expiry for immutable or rarely changing records.
pub const LONG_TTL: Duration = Duration::from_secs(600);

/// A "/"-joined cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    fn join(parts: &[&str]) -> Self {
        Self(parts.join("/"))
    }

    pub fn game_static(game_id: &str) -> Self {
        Self::join(&["GameStatic", game_id])
    }

    pub fn game_state(game_id: &str) -> Self {
        Self::join(&["GameState", game_id])
    }

    pub fn player_id(game_id: &str, seat: usize) -> Self {
        Self::join(&["playerID", game_id, &seat.to_string()])
    }

    pub fn proposal(game_id: &str, mission: usize, attempt: usize) -> Self {
        Self::join(&["proposal", game_id, &mission.to_string(), &attempt.to_string()])
    }

    pub fn actions(game_id: &str, mission: usize) -> Self {
        Self::join(&["actions", game_id, &mission.to_string()])
    }

    pub fn mission_result(game_id: &str, mission: usize) -> Self {
        Self::join(&["missionResult", game_id, &mission.to_string()])
    }

    pub fn vote_result(game_id: &str, index: usize) -> Self {
        Self::join(&["voteResult", game_id, &index.to_string()])
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
