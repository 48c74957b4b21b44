//! Domain layer: pure game logic types and helpers.

pub mod cards;
pub mod creation;
pub mod flow;
pub mod reveal;
pub mod scoring;
pub mod seed_derivation;
pub mod setup;
pub mod snapshot;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use cards::{Card, PermittedActions};
pub use flow::{next_step, FlowStep, GameSnapshot};
pub use reveal::{game_reveal, RevealEntry};
pub use setup::{GameSetup, Mission};
pub use snapshot::{state_document, DocumentInputs, PhaseState, StateDocument};
pub use state::{
    Actions, Game, GameState, GameStatic, MissionResult, Phase, PlayerId, Proposal, Seat,
    VoteResult,
};
