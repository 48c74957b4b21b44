use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Header set by the authenticating proxy in front of the backend.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity as asserted by the upstream proxy.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        ready(match user_id {
            Some(user_id) => Ok(CurrentUser { user_id }),
            None => Err(AppError::Unauthorized),
        })
    }
}
