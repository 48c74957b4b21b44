use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Longest id the backend ever issues is 43 characters; leave some slack.
const MAX_GAME_ID_LEN: usize = 64;

/// Game ID extracted from the route path parameter.
///
/// Only the shape is checked here; existence is decided by the service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameId(pub String);

impl GameId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_game_id(raw: &str) -> Result<GameId, AppError> {
    if raw.is_empty() || raw.len() > MAX_GAME_ID_LEN {
        return Err(AppError::bad_request(
            ErrorCode::InvalidGameId,
            format!("Invalid game id: {raw}"),
        ));
    }
    if !raw
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            ErrorCode::InvalidGameId,
            format!("Invalid game id: {raw}"),
        ));
    }
    Ok(GameId(raw.to_string()))
}

impl FromRequest for GameId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("game_id")
            .ok_or_else(|| {
                AppError::bad_request(ErrorCode::InvalidGameId, "Missing game_id parameter")
            })
            .and_then(parse_game_id);
        ready(result)
    }
}
