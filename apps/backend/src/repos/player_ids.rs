//! Seat occupants for the current session.

use sea_orm::ConnectionTrait;

use super::{index_from_db, index_to_db};
use crate::adapters::player_ids_sea as player_ids_adapter;
use crate::domain::{PlayerId, Seat};
use crate::entities::player_ids;
use crate::errors::domain::DomainError;

fn from_model(model: player_ids::Model) -> Result<PlayerId, DomainError> {
    Ok(PlayerId {
        seat: index_from_db(model.seat, "seat")?,
        participant_id: model.participant_id,
    })
}

pub async fn find_by_seat<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    seat: Seat,
) -> Result<Option<PlayerId>, DomainError> {
    player_ids_adapter::find_by_seat(conn, game_id, index_to_db(seat))
        .await?
        .map(from_model)
        .transpose()
}

pub async fn list_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Vec<PlayerId>, DomainError> {
    player_ids_adapter::list_for_game(conn, game_id)
        .await?
        .into_iter()
        .map(from_model)
        .collect()
}

pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    seat: Seat,
    participant_id: &str,
) -> Result<PlayerId, DomainError> {
    let model =
        player_ids_adapter::upsert(conn, game_id, index_to_db(seat), participant_id).await?;
    from_model(model)
}
