//! DTOs for game_states_sea adapter.

use sea_orm::prelude::Json;

/// Full set of mutable columns. Used for both the initial insert and
/// versioned updates.
#[derive(Debug, Clone)]
pub struct GameStateWrite {
    pub game_id: String,
    pub data_version: i32,
    pub game_begun: bool,
    pub have_proposal: bool,
    pub leader: i32,
    pub this_mission: i32,
    pub this_proposal: i32,
    pub this_vote: i32,
    pub have_actions: bool,
    pub missions_complete: Json,
    pub good_score: i32,
    pub evil_score: i32,
    pub assassin_target: Option<i32>,
    pub game_over: bool,
}
