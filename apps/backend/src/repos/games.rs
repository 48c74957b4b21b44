//! Immutable game records.

use sea_orm::ConnectionTrait;

use super::{decode, encode};
use crate::adapters::games_sea::{self as games_adapter, GameCreate};
use crate::domain::GameStatic;
use crate::entities::games;
use crate::errors::domain::{DomainError, NotFoundKind};

fn from_model(model: games::Model) -> Result<GameStatic, DomainError> {
    Ok(GameStatic {
        id: model.id,
        hangout: model.hangout,
        created_at: model.created_at,
        setup: decode(model.setup, "setup")?,
        players: decode(model.players, "players")?,
        bots: decode(model.bots, "bots")?,
        roles: decode(model.roles, "roles")?,
        rng_seed: model.rng_seed,
    })
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Option<GameStatic>, DomainError> {
    games_adapter::find_by_id(conn, game_id)
        .await?
        .map(from_model)
        .transpose()
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<GameStatic, DomainError> {
    find_by_id(conn, game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
    })
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<bool, DomainError> {
    Ok(games_adapter::exists(conn, game_id).await?)
}

pub async fn find_latest_for_hangout<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hangout: &str,
) -> Result<Option<GameStatic>, DomainError> {
    games_adapter::find_latest_for_hangout(conn, hangout)
        .await?
        .map(from_model)
        .transpose()
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    info: &GameStatic,
) -> Result<GameStatic, DomainError> {
    let dto = GameCreate {
        id: info.id.clone(),
        hangout: info.hangout.clone(),
        created_at: info.created_at,
        setup: encode(&info.setup, "setup")?,
        players: encode(&info.players, "players")?,
        bots: encode(&info.bots, "bots")?,
        roles: encode(&info.roles, "roles")?,
        rng_seed: info.rng_seed,
    };
    let model = games_adapter::create_game(conn, dto).await?;
    from_model(model)
}
