//! SeaORM adapter for seat occupants.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::player_ids;

pub async fn find_by_seat<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    seat: i32,
) -> Result<Option<player_ids::Model>, sea_orm::DbErr> {
    player_ids::Entity::find()
        .filter(player_ids::Column::GameId.eq(game_id))
        .filter(player_ids::Column::Seat.eq(seat))
        .one(conn)
        .await
}

pub async fn list_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Vec<player_ids::Model>, sea_orm::DbErr> {
    player_ids::Entity::find()
        .filter(player_ids::Column::GameId.eq(game_id))
        .order_by_asc(player_ids::Column::Seat)
        .all(conn)
        .await
}

/// Insert or replace the occupant of a seat.
pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    seat: i32,
    participant_id: &str,
) -> Result<player_ids::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    match find_by_seat(conn, game_id, seat).await? {
        Some(existing) => {
            let mut active = existing.into_active_model();
            active.participant_id = Set(participant_id.to_string());
            active.updated_at = Set(now);
            active.update(conn).await
        }
        None => {
            let active = player_ids::ActiveModel {
                id: NotSet,
                game_id: Set(game_id.to_string()),
                seat: Set(seat),
                participant_id: Set(participant_id.to_string()),
                updated_at: Set(now),
            };
            active.insert(conn).await
        }
    }
}
