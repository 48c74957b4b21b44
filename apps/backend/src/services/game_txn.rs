//! Game transaction wrapper.
//!
//! One call = one database transaction: load the game fresh, begin it if
//! needed, drain pending steps, apply the transition, drain again, save the
//! state under its lock version and commit. After commit the per-round cache
//! entries for every position the game occupied are deleted; failures there
//! are logged and left to expire.

use async_trait::async_trait;
use sea_orm::DatabaseTransaction;
use tracing::{info, warn};

use crate::cache::{self, CacheKey};
use crate::db::txn::with_txn;
use crate::domain::{Game, GameSnapshot, Seat};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{game_states, games, rounds};
use crate::services::game_flow::GameFlowService;
use crate::state::app_state::AppState;

/// A state change applied to a freshly loaded game inside its transaction.
#[async_trait]
pub trait GameTransition: Send {
    type Output: Send + 'static;

    async fn apply(
        self,
        flow: &GameFlowService,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
    ) -> Result<Self::Output, AppError>;
}

/// Load the authoritative snapshot, bypassing the cache.
pub async fn load_snapshot(
    txn: &DatabaseTransaction,
    game_id: &str,
) -> Result<GameSnapshot, AppError> {
    let info = games::require_game(txn, game_id).await?;
    let state = game_states::require_state(txn, game_id).await?;
    let game = Game { info, state };

    let (mission, attempt) = (game.state.this_mission, game.state.this_proposal);
    let proposal = if game.state.have_proposal {
        rounds::find_proposal(txn, game_id, mission, attempt).await?
    } else {
        None
    };
    let actions = if game.state.have_actions {
        rounds::find_actions(txn, game_id, mission).await?
    } else {
        None
    };

    Ok(GameSnapshot {
        game,
        proposal,
        actions,
    })
}

fn round_keys(game_id: &str, snap: &GameSnapshot) -> [CacheKey; 2] {
    let state = &snap.game.state;
    [
        CacheKey::proposal(game_id, state.this_mission, state.this_proposal),
        CacheKey::actions(game_id, state.this_mission),
    ]
}

async fn run_in_txn<T: GameTransition>(
    txn: &DatabaseTransaction,
    game_id: &str,
    transition: T,
) -> Result<(T::Output, Vec<CacheKey>), AppError> {
    let flow = GameFlowService::new();
    let mut snap = load_snapshot(txn, game_id).await?;
    let before = snap.clone();

    flow.process_game_state(txn, &mut snap).await?;
    let output = transition.apply(&flow, txn, &mut snap).await?;
    flow.process_game_state(txn, &mut snap).await?;

    if snap != before {
        game_states::save_with_lock(txn, game_id, &mut snap.game.state).await?;
        info!(
            game_id,
            mission = snap.game.state.this_mission,
            attempt = snap.game.state.this_proposal,
            phase = snap.game.phase().as_str(),
            lock_version = snap.game.state.lock_version,
            "Game state saved"
        );
    }

    let mut keys = vec![CacheKey::game_state(game_id)];
    for key in round_keys(game_id, &before)
        .into_iter()
        .chain(round_keys(game_id, &snap))
    {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    Ok((output, keys))
}

/// Run `transition` against `game_id` in its own transaction.
pub async fn with_game_txn<T>(
    state: &AppState,
    game_id: &str,
    transition: T,
) -> Result<T::Output, AppError>
where
    T: GameTransition + 'static,
{
    let id = game_id.to_string();
    let (output, keys) = with_txn(state, move |txn| {
        Box::pin(async move { run_in_txn(txn, &id, transition).await })
    })
    .await?;

    let failures = cache::delete_all(state.cache.as_ref(), &keys).await;
    if failures > 0 {
        warn!(
            game_id,
            failures, "Cache flush incomplete; stale entries will expire"
        );
    }
    Ok(output)
}

fn seat_of(snap: &GameSnapshot, user_id: &str) -> Result<Seat, AppError> {
    snap.game.seat_of(user_id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NotParticipant,
            "You are not a player in this game",
        )
        .into()
    })
}

/// Wire mission/proposal numbers are 1-based.
fn from_wire(mission: usize, proposal: usize) -> Result<(usize, usize), AppError> {
    match (mission.checked_sub(1), proposal.checked_sub(1)) {
        (Some(m), Some(p)) => Ok((m, p)),
        _ => Err(DomainError::validation(
            ValidationKind::RoundMismatch,
            "Mission and proposal do not match the current round",
        )
        .into()),
    }
}

#[derive(Debug, Clone)]
pub struct Propose {
    pub user_id: String,
    pub mission: usize,
    pub proposal: usize,
    pub players: Vec<Seat>,
}

#[async_trait]
impl GameTransition for Propose {
    type Output = ();

    async fn apply(
        self,
        flow: &GameFlowService,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
    ) -> Result<(), AppError> {
        let seat = seat_of(snap, &self.user_id)?;
        let (mission, attempt) = from_wire(self.mission, self.proposal)?;
        flow.propose(txn, snap, seat, mission, attempt, self.players)
            .await
    }
}

#[derive(Debug, Clone)]
pub struct Vote {
    pub user_id: String,
    pub mission: usize,
    pub proposal: usize,
    pub vote: String,
}

#[async_trait]
impl GameTransition for Vote {
    type Output = ();

    async fn apply(
        self,
        flow: &GameFlowService,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
    ) -> Result<(), AppError> {
        let seat = seat_of(snap, &self.user_id)?;
        let (mission, attempt) = from_wire(self.mission, self.proposal)?;
        flow.vote(txn, snap, seat, mission, attempt, &self.vote).await
    }
}

#[derive(Debug, Clone)]
pub struct Act {
    pub user_id: String,
    pub mission: usize,
    pub proposal: usize,
    pub action: String,
}

#[async_trait]
impl GameTransition for Act {
    type Output = ();

    async fn apply(
        self,
        flow: &GameFlowService,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
    ) -> Result<(), AppError> {
        let seat = seat_of(snap, &self.user_id)?;
        let (mission, attempt) = from_wire(self.mission, self.proposal)?;
        flow.act(txn, snap, seat, mission, attempt, &self.action)
            .await
    }
}

#[derive(Debug, Clone)]
pub struct Assassinate {
    pub user_id: String,
    pub target: Seat,
}

#[async_trait]
impl GameTransition for Assassinate {
    type Output = ();

    async fn apply(
        self,
        flow: &GameFlowService,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
    ) -> Result<(), AppError> {
        let seat = seat_of(snap, &self.user_id)?;
        flow.assassinate(txn, snap, seat, self.target).await
    }
}

/// Re-check pending rounds without new input. The wrapper's own drain does
/// the work; this only verifies the caller is seated.
#[derive(Debug, Clone)]
pub struct Poke {
    pub user_id: String,
}

#[async_trait]
impl GameTransition for Poke {
    type Output = ();

    async fn apply(
        self,
        _flow: &GameFlowService,
        _txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
    ) -> Result<(), AppError> {
        seat_of(snap, &self.user_id).map(|_| ())
    }
}
