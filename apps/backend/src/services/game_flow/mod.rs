//! Game flow service - applies player actions and drains pending steps
//! against a game snapshot loaded inside the caller's transaction.
//!
//! Every method here expects a fresh snapshot and writes create-once
//! records as it goes. The mutable [`GameState`](crate::domain::GameState)
//! row is persisted by the game transaction wrapper once the whole
//! transition has been applied.

mod orchestration;
mod player_actions;

pub use orchestration::MAX_ITERATIONS;

use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};

/// Game flow service - stateless; all state lives in the snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameFlowService;

impl GameFlowService {
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn reject(kind: ValidationKind, detail: &str) -> AppError {
    DomainError::validation(kind, detail).into()
}
