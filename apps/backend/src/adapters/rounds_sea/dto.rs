//! DTOs for rounds_sea adapter.

use sea_orm::prelude::Json;

#[derive(Debug, Clone)]
pub struct ProposalCreate {
    pub game_id: String,
    pub mission: i32,
    pub attempt: i32,
    pub leader: i32,
    pub players: Json,
    pub votes: Json,
    pub voted: Json,
}

/// Replacement vote arrays for an existing proposal.
#[derive(Debug, Clone)]
pub struct ProposalVotesUpdate {
    pub game_id: String,
    pub mission: i32,
    pub attempt: i32,
    pub votes: Json,
    pub voted: Json,
}

#[derive(Debug, Clone)]
pub struct ActionsCreate {
    pub game_id: String,
    pub mission: i32,
    pub attempt: i32,
    pub actions: Json,
    pub acted: Json,
}

#[derive(Debug, Clone)]
pub struct ActionsUpdate {
    pub game_id: String,
    pub mission: i32,
    pub actions: Json,
    pub acted: Json,
}
