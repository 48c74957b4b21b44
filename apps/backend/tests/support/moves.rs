//! One-line wrappers around the game transitions. Mission and proposal
//! numbers are the 1-based wire values.

use avalon_backend::domain::Seat;
use avalon_backend::services::game_txn::{with_game_txn, Act, Assassinate, Poke, Propose, Vote};
use avalon_backend::{AppError, AppState};

pub async fn propose(
    state: &AppState,
    game_id: &str,
    user: &str,
    mission: usize,
    proposal: usize,
    players: &[Seat],
) -> Result<(), AppError> {
    let transition = Propose {
        user_id: user.to_string(),
        mission,
        proposal,
        players: players.to_vec(),
    };
    with_game_txn(state, game_id, transition).await
}

pub async fn vote(
    state: &AppState,
    game_id: &str,
    user: &str,
    mission: usize,
    proposal: usize,
    vote: &str,
) -> Result<(), AppError> {
    let transition = Vote {
        user_id: user.to_string(),
        mission,
        proposal,
        vote: vote.to_string(),
    };
    with_game_txn(state, game_id, transition).await
}

pub async fn act(
    state: &AppState,
    game_id: &str,
    user: &str,
    mission: usize,
    proposal: usize,
    action: &str,
) -> Result<(), AppError> {
    let transition = Act {
        user_id: user.to_string(),
        mission,
        proposal,
        action: action.to_string(),
    };
    with_game_txn(state, game_id, transition).await
}

pub async fn assassinate(
    state: &AppState,
    game_id: &str,
    user: &str,
    target: Seat,
) -> Result<(), AppError> {
    let transition = Assassinate {
        user_id: user.to_string(),
        target,
    };
    with_game_txn(state, game_id, transition).await
}

pub async fn poke(state: &AppState, game_id: &str, user: &str) -> Result<(), AppError> {
    let transition = Poke {
        user_id: user.to_string(),
    };
    with_game_txn(state, game_id, transition).await
}

/// Every listed user casts the same vote.
pub async fn vote_all(
    state: &AppState,
    game_id: &str,
    users: &[&str],
    mission: usize,
    proposal: usize,
    choice: &str,
) -> Result<(), AppError> {
    for user in users {
        vote(state, game_id, user, mission, proposal, choice).await?;
    }
    Ok(())
}

/// Propose `team`, have the whole table approve, then have every team
/// member play `action_for(seat)`.
pub async fn run_mission(
    state: &AppState,
    game_id: &str,
    users: &[&str],
    leader: usize,
    mission: usize,
    team: &[Seat],
    action_for: impl Fn(Seat) -> &'static str,
) -> Result<(), AppError> {
    propose(state, game_id, users[leader], mission, 1, team).await?;
    vote_all(state, game_id, users, mission, 1, "approve").await?;
    for seat in team {
        act(state, game_id, users[*seat], mission, 1, action_for(*seat)).await?;
    }
    Ok(())
}
