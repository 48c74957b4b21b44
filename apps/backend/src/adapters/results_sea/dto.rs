//! DTOs for results_sea adapter.

use sea_orm::prelude::Json;

#[derive(Debug, Clone)]
pub struct MissionResultCreate {
    pub game_id: String,
    pub mission: i32,
    pub attempt: i32,
    pub leader: i32,
    pub players: Json,
    pub fails: i32,
    pub fails_allowed: i32,
}

#[derive(Debug, Clone)]
pub struct VoteResultCreate {
    pub game_id: String,
    pub vote_index: i32,
    pub mission: i32,
    pub attempt: i32,
    pub leader: i32,
    pub players: Json,
    pub votes: Json,
}
