//! Bot player trait definition.

use std::fmt;

use crate::domain::{Game, Proposal, Seat};
use crate::error::AppError;

#[derive(Debug)]
pub enum BotError {
    /// Bot encountered an internal error
    Internal(String),
    /// Bot produced an invalid move
    InvalidMove(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Internal(msg) => write!(f, "bot internal error: {msg}"),
            BotError::InvalidMove(msg) => write!(f, "bot invalid move: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<BotError> for AppError {
    fn from(err: BotError) -> Self {
        AppError::internal(format!("Bot error: {err}"))
    }
}

/// What a bot is shown when asked to decide.
#[derive(Debug, Clone, Copy)]
pub struct BotView<'a> {
    pub game: &'a Game,
    pub seat: Seat,
    pub proposal: Option<&'a Proposal>,
}

/// Decisions a bot seat makes. Implementations are pure with respect to the
/// view; any randomness comes from the bot's own seeded source.
pub trait BotPlayer: Send + Sync {
    /// Team for the current mission, sized by the mission table.
    fn choose_team(&self, view: &BotView<'_>) -> Result<Vec<Seat>, BotError>;

    /// `true` approves.
    fn choose_vote(&self, view: &BotView<'_>) -> Result<bool, BotError>;

    /// `true` is success. Bots never bluff: a role that may fail always fails.
    fn choose_action(&self, view: &BotView<'_>) -> Result<bool, BotError> {
        let proposal = view
            .proposal
            .ok_or_else(|| BotError::InvalidMove("No proposal to act on".into()))?;
        let permitted = view.game.card_at(view.seat).permitted_actions(proposal);
        Ok(!permitted.failure)
    }

    /// Assassination target.
    fn choose_target(&self, view: &BotView<'_>) -> Result<Seat, BotError>;
}
