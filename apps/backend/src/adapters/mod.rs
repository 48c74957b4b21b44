//! Adapters for external dependencies.

pub mod game_states_sea;
pub mod games_sea;
pub mod player_ids_sea;
pub mod results_sea;
pub mod rounds_sea;
