#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod ai;
pub mod cache;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

pub use config::cache::CacheKind;
pub use config::db::DbKind;
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::{CurrentUser, GameId};
pub use infra::state::build_state;
pub use middleware::{RequestTrace, StructuredLogger, TraceSpan};
pub use state::app_state::AppState;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
