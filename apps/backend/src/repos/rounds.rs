//! Proposals and mission actions, keyed by (mission, attempt) and mission.

use sea_orm::ConnectionTrait;

use super::{decode, encode, index_from_db, index_to_db};
use crate::adapters::rounds_sea::{
    self as rounds_adapter, ActionsCreate, ActionsUpdate, ProposalCreate, ProposalVotesUpdate,
};
use crate::domain::{Actions, Proposal};
use crate::entities::{mission_actions, proposals};
use crate::errors::domain::DomainError;

fn proposal_from_model(model: proposals::Model) -> Result<Proposal, DomainError> {
    Ok(Proposal {
        leader: index_from_db(model.leader, "leader")?,
        players: decode(model.players, "proposal players")?,
        votes: decode(model.votes, "votes")?,
        voted: decode(model.voted, "voted")?,
    })
}

fn actions_from_model(model: mission_actions::Model) -> Result<Actions, DomainError> {
    Ok(Actions {
        mission: index_from_db(model.mission, "mission")?,
        attempt: index_from_db(model.attempt, "attempt")?,
        actions: decode(model.actions, "actions")?,
        acted: decode(model.acted, "acted")?,
    })
}

pub async fn find_proposal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    mission: usize,
    attempt: usize,
) -> Result<Option<Proposal>, DomainError> {
    rounds_adapter::find_proposal(conn, game_id, index_to_db(mission), index_to_db(attempt))
        .await?
        .map(proposal_from_model)
        .transpose()
}

/// Insert the proposal for (mission, attempt). A second insert for the
/// same key fails with a conflict.
pub async fn create_proposal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    mission: usize,
    attempt: usize,
    proposal: &Proposal,
) -> Result<(), DomainError> {
    let dto = ProposalCreate {
        game_id: game_id.to_string(),
        mission: index_to_db(mission),
        attempt: index_to_db(attempt),
        leader: index_to_db(proposal.leader),
        players: encode(&proposal.players, "proposal players")?,
        votes: encode(&proposal.votes, "votes")?,
        voted: encode(&proposal.voted, "voted")?,
    };
    rounds_adapter::create_proposal(conn, dto).await?;
    Ok(())
}

pub async fn save_proposal_votes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    mission: usize,
    attempt: usize,
    proposal: &Proposal,
) -> Result<(), DomainError> {
    let dto = ProposalVotesUpdate {
        game_id: game_id.to_string(),
        mission: index_to_db(mission),
        attempt: index_to_db(attempt),
        votes: encode(&proposal.votes, "votes")?,
        voted: encode(&proposal.voted, "voted")?,
    };
    rounds_adapter::update_proposal_votes(conn, dto).await?;
    Ok(())
}

pub async fn find_actions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    mission: usize,
) -> Result<Option<Actions>, DomainError> {
    rounds_adapter::find_actions(conn, game_id, index_to_db(mission))
        .await?
        .map(actions_from_model)
        .transpose()
}

pub async fn create_actions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    actions: &Actions,
) -> Result<(), DomainError> {
    let dto = ActionsCreate {
        game_id: game_id.to_string(),
        mission: index_to_db(actions.mission),
        attempt: index_to_db(actions.attempt),
        actions: encode(&actions.actions, "actions")?,
        acted: encode(&actions.acted, "acted")?,
    };
    rounds_adapter::create_actions(conn, dto).await?;
    Ok(())
}

pub async fn save_actions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    actions: &Actions,
) -> Result<(), DomainError> {
    let dto = ActionsUpdate {
        game_id: game_id.to_string(),
        mission: index_to_db(actions.mission),
        actions: encode(&actions.actions, "actions")?,
        acted: encode(&actions.acted, "acted")?,
    };
    rounds_adapter::update_actions(conn, dto).await?;
    Ok(())
}
