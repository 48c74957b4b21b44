//! Game creation, membership and the read-side documents.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::cache::{self, CacheKey};
use crate::db::txn::with_txn;
use crate::domain::creation::{generate_game_id, new_game};
use crate::domain::setup::{setup_catalog, validate_game_start, SetupCatalog};
use crate::domain::{
    game_reveal, state_document, DocumentInputs, Game, GameStatic, PlayerId, RevealEntry,
    StateDocument,
};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{game_states, games, player_ids};
use crate::services::game_reads;
use crate::state::app_state::AppState;

/// Table layout and card catalog for a player count.
pub fn setup(players: usize) -> Result<SetupCatalog, AppError> {
    Ok(setup_catalog(players)?)
}

/// Return the hangout's running game, or create one.
pub async fn start_game(
    state: &AppState,
    hangout: &str,
    players: Vec<String>,
    cards: Vec<String>,
) -> Result<GameStatic, AppError> {
    start_game_with_rng(state, hangout, players, cards, StdRng::from_os_rng()).await
}

/// [`start_game`] with an explicit random source for seats, roles and ids.
pub async fn start_game_with_rng(
    state: &AppState,
    hangout: &str,
    players: Vec<String>,
    cards: Vec<String>,
    mut rng: StdRng,
) -> Result<GameStatic, AppError> {
    let hangout = hangout.to_string();
    with_txn(state, move |txn| {
        Box::pin(async move { find_or_create(txn, &hangout, players, &cards, &mut rng).await })
    })
    .await
}

async fn find_or_create(
    txn: &DatabaseTransaction,
    hangout: &str,
    players: Vec<String>,
    cards: &[String],
    rng: &mut StdRng,
) -> Result<GameStatic, AppError> {
    if let Some(info) = games::find_latest_for_hangout(txn, hangout).await? {
        let running = game_states::find_by_game(txn, &info.id)
            .await?
            .is_some_and(|s| !s.game_over);
        if running {
            debug!(game_id = %info.id, hangout, "Hangout already has a running game");
            return Ok(info);
        }
    }

    let start = validate_game_start(players, cards)?;
    let id = unused_game_id(txn, rng).await?;
    let Game { info, state } = new_game(id, hangout.to_string(), OffsetDateTime::now_utc(), start, rng);

    let info = games::create_game(txn, &info).await?;
    game_states::create_state(txn, &info.id, &state).await?;
    info!(
        game_id = %info.id,
        hangout,
        seats = info.players.len(),
        bots = info.bots.len(),
        "Game created"
    );
    Ok(info)
}

async fn unused_game_id(txn: &DatabaseTransaction, rng: &mut StdRng) -> Result<String, AppError> {
    loop {
        let id = generate_game_id(rng);
        if !games::exists(txn, &id).await? {
            return Ok(id);
        }
        warn!(game_id = %id, "Generated game id already in use; retrying");
    }
}

/// Record the caller's participant id for their seat.
pub async fn join_game(
    state: &AppState,
    game_id: &str,
    user_id: &str,
    participant_id: &str,
) -> Result<PlayerId, AppError> {
    let info = game_reads::game_static(state, game_id).await?;
    let seat = info.players.iter().position(|p| p == user_id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NotParticipant,
            "You are not a player in this game",
        )
    })?;

    let id = game_id.to_string();
    let participant = participant_id.to_string();
    let record = with_txn(state, move |txn| {
        Box::pin(async move { Ok(player_ids::upsert(txn, &id, seat, &participant).await?) })
    })
    .await?;

    cache::delete_all(state.cache.as_ref(), &[CacheKey::player_id(game_id, seat)]).await;
    info!(game_id, seat, "Player joined");
    Ok(record)
}

/// Game as shown to a seated user, plus their seat.
async fn seated_game(
    state: &AppState,
    game_id: &str,
    user_id: &str,
) -> Result<(Game, usize), AppError> {
    let game = game_reads::game(state, game_id).await?;
    let seat = game.seat_of(user_id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NotParticipant,
            "You are not a player in this game",
        )
    })?;
    Ok((game, seat))
}

/// State document for `user_id`, built from cached reads.
pub async fn state_document_for(
    state: &AppState,
    game_id: &str,
    user_id: &str,
) -> Result<StateDocument, AppError> {
    let (game, seat) = seated_game(state, game_id, user_id).await?;
    let s = &game.state;

    let proposal = if s.have_proposal {
        game_reads::proposal(state, game_id, s.this_mission, s.this_proposal).await?
    } else {
        None
    };
    let actions = if s.have_actions {
        game_reads::actions(state, game_id, s.this_mission).await?
    } else {
        None
    };
    let mission_results = game_reads::mission_results(state, &game).await?;
    let votes = game_reads::vote_results(state, &game).await?;

    Ok(state_document(
        DocumentInputs {
            game: &game,
            viewer: seat,
            proposal: proposal.as_ref(),
            actions: actions.as_ref(),
        },
        mission_results,
        votes,
    ))
}

/// The caller's card and what it lets them see.
pub async fn reveal_for(
    state: &AppState,
    game_id: &str,
    user_id: &str,
) -> Result<Vec<RevealEntry>, AppError> {
    let (game, seat) = seated_game(state, game_id, user_id).await?;
    Ok(game_reveal(&game, seat))
}
