//! DTOs for games_sea adapter.

use sea_orm::prelude::Json;
use time::OffsetDateTime;

/// DTO for inserting a new game's static record.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub id: String,
    pub hangout: String,
    pub created_at: OffsetDateTime,
    pub setup: Json,
    pub players: Json,
    pub bots: Json,
    pub roles: Json,
    pub rng_seed: i64,
}
