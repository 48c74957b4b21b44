//! SeaORM adapter for immutable mission and vote results.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{mission_results, vote_results};

pub mod dto;

pub use dto::{MissionResultCreate, VoteResultCreate};

pub async fn create_mission_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MissionResultCreate,
) -> Result<mission_results::Model, sea_orm::DbErr> {
    let active = mission_results::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        mission: Set(dto.mission),
        attempt: Set(dto.attempt),
        leader: Set(dto.leader),
        players: Set(dto.players),
        fails: Set(dto.fails),
        fails_allowed: Set(dto.fails_allowed),
    };
    active.insert(conn).await
}

pub async fn find_mission_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    mission: i32,
) -> Result<Option<mission_results::Model>, sea_orm::DbErr> {
    mission_results::Entity::find()
        .filter(mission_results::Column::GameId.eq(game_id))
        .filter(mission_results::Column::Mission.eq(mission))
        .one(conn)
        .await
}

/// All mission results for a game, in mission order.
pub async fn list_mission_results<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Vec<mission_results::Model>, sea_orm::DbErr> {
    mission_results::Entity::find()
        .filter(mission_results::Column::GameId.eq(game_id))
        .order_by_asc(mission_results::Column::Mission)
        .all(conn)
        .await
}

pub async fn create_vote_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: VoteResultCreate,
) -> Result<vote_results::Model, sea_orm::DbErr> {
    let active = vote_results::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        vote_index: Set(dto.vote_index),
        mission: Set(dto.mission),
        attempt: Set(dto.attempt),
        leader: Set(dto.leader),
        players: Set(dto.players),
        votes: Set(dto.votes),
    };
    active.insert(conn).await
}

pub async fn find_vote_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    vote_index: i32,
) -> Result<Option<vote_results::Model>, sea_orm::DbErr> {
    vote_results::Entity::find()
        .filter(vote_results::Column::GameId.eq(game_id))
        .filter(vote_results::Column::VoteIndex.eq(vote_index))
        .one(conn)
        .await
}

/// All vote results for a game, in vote order.
pub async fn list_vote_results<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Vec<vote_results::Model>, sea_orm::DbErr> {
    vote_results::Entity::find()
        .filter(vote_results::Column::GameId.eq(game_id))
        .order_by_asc(vote_results::Column::VoteIndex)
        .all(conn)
        .await
}
