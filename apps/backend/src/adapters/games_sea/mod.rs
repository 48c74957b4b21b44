//! SeaORM adapter for the immutable game record - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::games;

pub mod dto;

pub use dto::GameCreate;

// Adapter functions return DbErr; the repos layer maps to DomainError.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id.to_string()).one(conn).await
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("games:{game_id}")))
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<bool, sea_orm::DbErr> {
    let count = games::Entity::find()
        .filter(games::Column::Id.eq(game_id))
        .count(conn)
        .await?;
    Ok(count > 0)
}

/// Most recently created game for a hangout.
pub async fn find_latest_for_hangout<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hangout: &str,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Hangout.eq(hangout))
        .order_by_desc(games::Column::CreatedAt)
        .one(conn)
        .await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let game_active = games::ActiveModel {
        id: Set(dto.id),
        hangout: Set(dto.hangout),
        created_at: Set(dto.created_at),
        setup: Set(dto.setup),
        players: Set(dto.players),
        bots: Set(dto.bots),
        roles: Set(dto.roles),
        rng_seed: Set(dto.rng_seed),
    };

    game_active.insert(conn).await
}
