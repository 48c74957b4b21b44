//! SeaORM adapter for per-round records: proposals and mission actions.
//!
//! Both are inserted once per key and afterwards only filled in.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::{mission_actions, proposals};

pub mod dto;

pub use dto::{ActionsCreate, ActionsUpdate, ProposalCreate, ProposalVotesUpdate};

pub async fn find_proposal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    mission: i32,
    attempt: i32,
) -> Result<Option<proposals::Model>, sea_orm::DbErr> {
    proposals::Entity::find()
        .filter(proposals::Column::GameId.eq(game_id))
        .filter(proposals::Column::Mission.eq(mission))
        .filter(proposals::Column::Attempt.eq(attempt))
        .one(conn)
        .await
}

pub async fn create_proposal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ProposalCreate,
) -> Result<proposals::Model, sea_orm::DbErr> {
    let active = proposals::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        mission: Set(dto.mission),
        attempt: Set(dto.attempt),
        leader: Set(dto.leader),
        players: Set(dto.players),
        votes: Set(dto.votes),
        voted: Set(dto.voted),
    };
    active.insert(conn).await
}

pub async fn update_proposal_votes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ProposalVotesUpdate,
) -> Result<(), sea_orm::DbErr> {
    let result = proposals::Entity::update_many()
        .col_expr(proposals::Column::Votes, Expr::value(dto.votes))
        .col_expr(proposals::Column::Voted, Expr::value(dto.voted))
        .filter(proposals::Column::GameId.eq(dto.game_id.as_str()))
        .filter(proposals::Column::Mission.eq(dto.mission))
        .filter(proposals::Column::Attempt.eq(dto.attempt))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "proposals:{}/{}/{}",
            dto.game_id, dto.mission, dto.attempt
        )));
    }
    Ok(())
}

pub async fn find_actions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    mission: i32,
) -> Result<Option<mission_actions::Model>, sea_orm::DbErr> {
    mission_actions::Entity::find()
        .filter(mission_actions::Column::GameId.eq(game_id))
        .filter(mission_actions::Column::Mission.eq(mission))
        .one(conn)
        .await
}

pub async fn create_actions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ActionsCreate,
) -> Result<mission_actions::Model, sea_orm::DbErr> {
    let active = mission_actions::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        mission: Set(dto.mission),
        attempt: Set(dto.attempt),
        actions: Set(dto.actions),
        acted: Set(dto.acted),
    };
    active.insert(conn).await
}

pub async fn update_actions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ActionsUpdate,
) -> Result<(), sea_orm::DbErr> {
    let result = mission_actions::Entity::update_many()
        .col_expr(mission_actions::Column::Actions, Expr::value(dto.actions))
        .col_expr(mission_actions::Column::Acted, Expr::value(dto.acted))
        .filter(mission_actions::Column::GameId.eq(dto.game_id.as_str()))
        .filter(mission_actions::Column::Mission.eq(dto.mission))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "mission_actions:{}/{}",
            dto.game_id, dto.mission
        )));
    }
    Ok(())
}
