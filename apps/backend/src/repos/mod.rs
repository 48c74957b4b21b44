//! Repository functions for the domain layer.
//!
//! Repos convert between stored rows and domain records. Structured columns
//! are JSON; a value that fails to decode is reported as data corruption.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as Json;

use crate::errors::domain::{DomainError, InfraErrorKind};

pub mod game_states;
pub mod games;
pub mod player_ids;
pub mod results;
pub mod rounds;

pub(crate) fn decode<T: DeserializeOwned>(value: Json, column: &str) -> Result<T, DomainError> {
    serde_json::from_value(value).map_err(|e| {
        tracing::error!(column, error = %e, "Stored column failed to decode");
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Stored {column} could not be decoded"),
        )
    })
}

pub(crate) fn encode<T: Serialize>(value: &T, column: &str) -> Result<Json, DomainError> {
    serde_json::to_value(value).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("encode".into()),
            format!("Failed to encode {column}: {e}"),
        )
    })
}

/// Stored small integers (seats, indices) back to `usize`.
pub(crate) fn index_from_db(value: i32, column: &str) -> Result<usize, DomainError> {
    usize::try_from(value).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Negative {column} in stored game"),
        )
    })
}

pub(crate) fn index_to_db(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
