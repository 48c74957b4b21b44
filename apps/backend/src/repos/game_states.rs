//! Mutable per-game progress.

use sea_orm::ConnectionTrait;

use super::{decode, encode, index_from_db, index_to_db};
use crate::adapters::game_states_sea::{self as states_adapter, GameStateWrite};
use crate::domain::GameState;
use crate::entities::game_states;
use crate::errors::domain::{DomainError, NotFoundKind};

fn score_from_db(value: i32) -> Result<u8, DomainError> {
    let value = index_from_db(value, "score")?;
    Ok(u8::try_from(value).unwrap_or(u8::MAX))
}

fn from_model(model: game_states::Model) -> Result<GameState, DomainError> {
    Ok(GameState {
        data_version: model.data_version,
        game_begun: model.game_begun,
        have_proposal: model.have_proposal,
        leader: index_from_db(model.leader, "leader")?,
        this_mission: index_from_db(model.this_mission, "this_mission")?,
        this_proposal: index_from_db(model.this_proposal, "this_proposal")?,
        this_vote: index_from_db(model.this_vote, "this_vote")?,
        have_actions: model.have_actions,
        missions_complete: decode(model.missions_complete, "missions_complete")?,
        good_score: score_from_db(model.good_score)?,
        evil_score: score_from_db(model.evil_score)?,
        assassin_target: model
            .assassin_target
            .map(|t| index_from_db(t, "assassin_target"))
            .transpose()?,
        game_over: model.game_over,
        lock_version: model.lock_version,
    })
}

fn to_write(game_id: &str, state: &GameState) -> Result<GameStateWrite, DomainError> {
    Ok(GameStateWrite {
        game_id: game_id.to_string(),
        data_version: state.data_version,
        game_begun: state.game_begun,
        have_proposal: state.have_proposal,
        leader: index_to_db(state.leader),
        this_mission: index_to_db(state.this_mission),
        this_proposal: index_to_db(state.this_proposal),
        this_vote: index_to_db(state.this_vote),
        have_actions: state.have_actions,
        missions_complete: encode(&state.missions_complete, "missions_complete")?,
        good_score: i32::from(state.good_score),
        evil_score: i32::from(state.evil_score),
        assassin_target: state.assassin_target.map(index_to_db),
        game_over: state.game_over,
    })
}

pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Option<GameState>, DomainError> {
    states_adapter::find_by_game(conn, game_id)
        .await?
        .map(from_model)
        .transpose()
}

pub async fn require_state<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<GameState, DomainError> {
    find_by_game(conn, game_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::GameState,
            format!("State for game {game_id} not found"),
        )
    })
}

pub async fn create_state<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    state: &GameState,
) -> Result<GameState, DomainError> {
    let model = states_adapter::create_state(conn, to_write(game_id, state)?).await?;
    from_model(model)
}

/// Persist `state` if nobody else wrote since it was loaded.
///
/// On success `state.lock_version` is advanced to the stored value.
pub async fn save_with_lock<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    state: &mut GameState,
) -> Result<(), DomainError> {
    let dto = to_write(game_id, state)?;
    let next = states_adapter::update_with_lock(conn, dto, state.lock_version).await?;
    state.lock_version = next;
    Ok(())
}
