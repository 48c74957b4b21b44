//! Append-only mission and vote history.

use sea_orm::ConnectionTrait;

use super::{decode, encode, index_from_db, index_to_db};
use crate::adapters::results_sea::{self as results_adapter, MissionResultCreate, VoteResultCreate};
use crate::domain::{MissionResult, VoteResult};
use crate::entities::{mission_results, vote_results};
use crate::errors::domain::DomainError;

fn mission_from_model(model: mission_results::Model) -> Result<MissionResult, DomainError> {
    Ok(MissionResult {
        mission: index_from_db(model.mission, "mission")?,
        attempt: index_from_db(model.attempt, "attempt")?,
        leader: index_from_db(model.leader, "leader")?,
        players: decode(model.players, "mission players")?,
        fails: index_from_db(model.fails, "fails")?,
        fails_allowed: index_from_db(model.fails_allowed, "fails_allowed")?,
    })
}

fn vote_from_model(model: vote_results::Model) -> Result<VoteResult, DomainError> {
    Ok(VoteResult {
        index: index_from_db(model.vote_index, "vote_index")?,
        mission: index_from_db(model.mission, "mission")?,
        attempt: index_from_db(model.attempt, "attempt")?,
        leader: index_from_db(model.leader, "leader")?,
        players: decode(model.players, "vote players")?,
        votes: decode(model.votes, "vote record")?,
    })
}

pub async fn create_mission_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    result: &MissionResult,
) -> Result<(), DomainError> {
    let dto = MissionResultCreate {
        game_id: game_id.to_string(),
        mission: index_to_db(result.mission),
        attempt: index_to_db(result.attempt),
        leader: index_to_db(result.leader),
        players: encode(&result.players, "mission players")?,
        fails: index_to_db(result.fails),
        fails_allowed: index_to_db(result.fails_allowed),
    };
    results_adapter::create_mission_result(conn, dto).await?;
    Ok(())
}

pub async fn find_mission_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    mission: usize,
) -> Result<Option<MissionResult>, DomainError> {
    results_adapter::find_mission_result(conn, game_id, index_to_db(mission))
        .await?
        .map(mission_from_model)
        .transpose()
}

pub async fn list_mission_results<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Vec<MissionResult>, DomainError> {
    results_adapter::list_mission_results(conn, game_id)
        .await?
        .into_iter()
        .map(mission_from_model)
        .collect()
}

pub async fn create_vote_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    result: &VoteResult,
) -> Result<(), DomainError> {
    let dto = VoteResultCreate {
        game_id: game_id.to_string(),
        vote_index: index_to_db(result.index),
        mission: index_to_db(result.mission),
        attempt: index_to_db(result.attempt),
        leader: index_to_db(result.leader),
        players: encode(&result.players, "vote players")?,
        votes: encode(&result.votes, "vote record")?,
    };
    results_adapter::create_vote_result(conn, dto).await?;
    Ok(())
}

pub async fn find_vote_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    index: usize,
) -> Result<Option<VoteResult>, DomainError> {
    results_adapter::find_vote_result(conn, game_id, index_to_db(index))
        .await?
        .map(vote_from_model)
        .transpose()
}

pub async fn list_vote_results<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Vec<VoteResult>, DomainError> {
    results_adapter::list_vote_results(conn, game_id)
        .await?
        .into_iter()
        .map(vote_from_model)
        .collect()
}
