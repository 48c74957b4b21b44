//! Game HTTP routes.
//!
//! Handlers only translate between the wire and the services. Every
//! mutation runs through the game transaction wrapper and answers with the
//! caller's state document read after commit.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::Seat;
use crate::error::AppError;
use crate::extractors::{CurrentUser, GameId, ValidatedJson};
use crate::services::game_txn::{with_game_txn, Act, Assassinate, GameTransition, Poke, Propose, Vote};
use crate::services::games;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct SetupRequest {
    players: usize,
}

#[derive(Debug, Deserialize)]
struct StartRequest {
    #[serde(default)]
    players: Vec<String>,
    cards: Vec<String>,
    /// Hangout participant id to record for the caller's seat.
    #[serde(default)]
    participant_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct StartResponse {
    game_id: String,
    players: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct JoinRequest {
    participant_id: String,
}

#[derive(Debug, Serialize)]
struct JoinResponse {
    seat: Seat,
}

#[derive(Debug, Deserialize)]
struct ProposeRequest {
    mission: usize,
    proposal: usize,
    players: Vec<Seat>,
}

#[derive(Debug, Deserialize)]
struct VoteRequest {
    mission: usize,
    proposal: usize,
    vote: String,
}

#[derive(Debug, Deserialize)]
struct MissionRequest {
    mission: usize,
    proposal: usize,
    action: String,
}

#[derive(Debug, Deserialize)]
struct AssassinateRequest {
    target: Seat,
}

/// POST /api/setup
async fn setup(body: ValidatedJson<SetupRequest>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(games::setup(body.players)?))
}

/// POST /api/hangouts/{hangout}/games
///
/// The caller is always seated; bot seats pad the table to five. A
/// `participant_id` is stored for the caller's seat once the game exists.
async fn start(
    path: web::Path<String>,
    user: CurrentUser,
    body: ValidatedJson<StartRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let hangout = path.into_inner();
    let StartRequest {
        mut players,
        cards,
        participant_id,
    } = body.into_inner();
    if !players.contains(&user.user_id) {
        players.insert(0, user.user_id.clone());
    }

    let info = games::start_game(&app_state, &hangout, players, cards).await?;
    if let Some(participant_id) = participant_id {
        // A reused game may not seat the caller.
        if info.players.contains(&user.user_id) {
            games::join_game(&app_state, &info.id, &user.user_id, &participant_id).await?;
        }
    }
    Ok(HttpResponse::Ok().json(StartResponse {
        game_id: info.id,
        players: info.players,
    }))
}

/// POST /api/games/{game_id}/join
async fn join(
    game_id: GameId,
    user: CurrentUser,
    body: ValidatedJson<JoinRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let record = games::join_game(
        &app_state,
        game_id.as_str(),
        &user.user_id,
        &body.participant_id,
    )
    .await?;
    Ok(HttpResponse::Ok().json(JoinResponse { seat: record.seat }))
}

/// GET /api/games/{game_id}/state
async fn state(
    game_id: GameId,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let doc = games::state_document_for(&app_state, game_id.as_str(), &user.user_id).await?;
    Ok(HttpResponse::Ok().json(doc))
}

/// GET /api/games/{game_id}/reveal
async fn reveal(
    game_id: GameId,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let entries = games::reveal_for(&app_state, game_id.as_str(), &user.user_id).await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// Apply `transition`, then answer with the caller's fresh state document.
async fn transition_and_render<T>(
    app_state: &AppState,
    game_id: &GameId,
    user: &CurrentUser,
    transition: T,
) -> Result<HttpResponse, AppError>
where
    T: GameTransition + 'static,
{
    with_game_txn(app_state, game_id.as_str(), transition).await?;
    let doc = games::state_document_for(app_state, game_id.as_str(), &user.user_id).await?;
    Ok(HttpResponse::Ok().json(doc))
}

/// POST /api/games/{game_id}/propose
async fn propose(
    game_id: GameId,
    user: CurrentUser,
    body: ValidatedJson<ProposeRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ProposeRequest {
        mission,
        proposal,
        players,
    } = body.into_inner();
    let transition = Propose {
        user_id: user.user_id.clone(),
        mission,
        proposal,
        players,
    };
    transition_and_render(&app_state, &game_id, &user, transition).await
}

/// POST /api/games/{game_id}/vote
async fn vote(
    game_id: GameId,
    user: CurrentUser,
    body: ValidatedJson<VoteRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let VoteRequest {
        mission,
        proposal,
        vote,
    } = body.into_inner();
    let transition = Vote {
        user_id: user.user_id.clone(),
        mission,
        proposal,
        vote,
    };
    transition_and_render(&app_state, &game_id, &user, transition).await
}

/// POST /api/games/{game_id}/mission
async fn mission(
    game_id: GameId,
    user: CurrentUser,
    body: ValidatedJson<MissionRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let MissionRequest {
        mission,
        proposal,
        action,
    } = body.into_inner();
    let transition = Act {
        user_id: user.user_id.clone(),
        mission,
        proposal,
        action,
    };
    transition_and_render(&app_state, &game_id, &user, transition).await
}

/// POST /api/games/{game_id}/assassinate
async fn assassinate(
    game_id: GameId,
    user: CurrentUser,
    body: ValidatedJson<AssassinateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let transition = Assassinate {
        user_id: user.user_id.clone(),
        target: body.target,
    };
    transition_and_render(&app_state, &game_id, &user, transition).await
}

/// POST /api/games/{game_id}/poke
///
/// No input; lets a waiting client push pending bot moves along.
async fn poke(
    game_id: GameId,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let transition = Poke {
        user_id: user.user_id.clone(),
    };
    transition_and_render(&app_state, &game_id, &user, transition).await
}

/// Routes relative to `/api`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/setup", web::post().to(setup))
        .route("/hangouts/{hangout}/games", web::post().to(start))
        .service(
            web::scope("/games/{game_id}")
                .route("/join", web::post().to(join))
                .route("/state", web::get().to(state))
                .route("/reveal", web::get().to(reveal))
                .route("/propose", web::post().to(propose))
                .route("/vote", web::post().to(vote))
                .route("/mission", web::post().to(mission))
                .route("/assassinate", web::post().to(assassinate))
                .route("/poke", web::post().to(poke)),
        );
}
