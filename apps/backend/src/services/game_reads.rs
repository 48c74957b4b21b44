//! Cached reads for display paths.
//!
//! Nothing here may be used to decide whether a mutation is legal; the game
//! transaction wrapper always loads fresh.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{get_json, set_json, CacheKey, LONG_TTL, SHORT_TTL};
use crate::db::require_db;
use crate::domain::setup::MISSION_COUNT;
use crate::domain::{Actions, Game, GameState, GameStatic, MissionResult, PlayerId, Proposal, Seat, VoteResult};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::errors::ErrorCode;
use crate::repos::{game_states, games, player_ids, results, rounds};
use crate::state::app_state::AppState;

/// Cache first; on a miss load from the database and populate the cache.
async fn read_through<T, F, Fut>(
    state: &AppState,
    key: CacheKey,
    ttl: Duration,
    load: F,
) -> Result<Option<T>, AppError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<T>, DomainError>>,
{
    if let Some(hit) = get_json::<T>(state.cache.as_ref(), &key).await {
        return Ok(Some(hit));
    }
    let loaded = load().await?;
    if let Some(value) = &loaded {
        set_json(state.cache.as_ref(), &key, value, ttl).await;
    }
    Ok(loaded)
}

pub async fn game_static(state: &AppState, game_id: &str) -> Result<GameStatic, AppError> {
    let db = require_db(state)?;
    read_through(state, CacheKey::game_static(game_id), LONG_TTL, || {
        games::find_by_id(db, game_id)
    })
    .await?
    .ok_or_else(|| {
        AppError::not_found(ErrorCode::GameNotFound, format!("Game {game_id} not found"))
    })
}

pub async fn game_state(state: &AppState, game_id: &str) -> Result<GameState, AppError> {
    let db = require_db(state)?;
    read_through(state, CacheKey::game_state(game_id), SHORT_TTL, || {
        game_states::find_by_game(db, game_id)
    })
    .await?
    .ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::GameState,
            format!("State for game {game_id} not found"),
        )
        .into()
    })
}

pub async fn game(state: &AppState, game_id: &str) -> Result<Game, AppError> {
    let info = game_static(state, game_id).await?;
    let state = game_state(state, game_id).await?;
    Ok(Game { info, state })
}

pub async fn proposal(
    state: &AppState,
    game_id: &str,
    mission: usize,
    attempt: usize,
) -> Result<Option<Proposal>, AppError> {
    let db = require_db(state)?;
    read_through(
        state,
        CacheKey::proposal(game_id, mission, attempt),
        SHORT_TTL,
        || rounds::find_proposal(db, game_id, mission, attempt),
    )
    .await
}

pub async fn actions(
    state: &AppState,
    game_id: &str,
    mission: usize,
) -> Result<Option<Actions>, AppError> {
    let db = require_db(state)?;
    read_through(state, CacheKey::actions(game_id, mission), SHORT_TTL, || {
        rounds::find_actions(db, game_id, mission)
    })
    .await
}

pub async fn player_id(
    state: &AppState,
    game_id: &str,
    seat: Seat,
) -> Result<Option<PlayerId>, AppError> {
    let db = require_db(state)?;
    read_through(state, CacheKey::player_id(game_id, seat), LONG_TTL, || {
        player_ids::find_by_seat(db, game_id, seat)
    })
    .await
}

/// Results of every completed mission, in mission order.
pub async fn mission_results(state: &AppState, game: &Game) -> Result<Vec<MissionResult>, AppError> {
    let db = require_db(state)?;
    let game_id = game.id();
    let mut out = Vec::new();
    for mission in (0..MISSION_COUNT).filter(|m| game.state.missions_complete[*m]) {
        let found = read_through(
            state,
            CacheKey::mission_result(game_id, mission),
            LONG_TTL,
            || results::find_mission_result(db, game_id, mission),
        )
        .await?;
        out.extend(found);
    }
    Ok(out)
}

/// Every resolved vote round, in order.
pub async fn vote_results(state: &AppState, game: &Game) -> Result<Vec<VoteResult>, AppError> {
    let db = require_db(state)?;
    let game_id = game.id();
    let mut out = Vec::with_capacity(game.state.this_vote);
    for index in 0..game.state.this_vote {
        let found = read_through(
            state,
            CacheKey::vote_result(game_id, index),
            LONG_TTL,
            || results::find_vote_result(db, game_id, index),
        )
        .await?;
        out.extend(found);
    }
    Ok(out)
}
