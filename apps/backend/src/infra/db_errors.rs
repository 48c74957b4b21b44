//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert through `map_db_err` and
//! higher layers map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

/// Prefix used by adapters when a versioned update matched no row.
pub const OPTIMISTIC_LOCK_PREFIX: &str = "OPTIMISTIC_LOCK:";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Map a unique-index name (Postgres) or `table.column` list (SQLite) to the
/// create-once record it protects.
fn create_once_record(error_msg: &str) -> Option<&'static str> {
    const RECORDS: [(&str, &str, &str); 6] = [
        ("idx_proposals_round", "proposals.game_id", "Proposal"),
        ("idx_mission_actions_mission", "mission_actions.game_id", "Mission actions"),
        ("idx_mission_results_mission", "mission_results.game_id", "Mission result"),
        ("idx_vote_results_index", "vote_results.game_id", "Vote result"),
        ("idx_player_ids_seat", "player_ids.game_id", "Player id"),
        ("games_pkey", "games.id", "Game"),
    ];
    RECORDS
        .iter()
        .find(|(pg, sqlite, _)| error_msg.contains(pg) || error_msg.contains(sqlite))
        .map(|(_, _, name)| *name)
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(NotFoundKind::Other(what.clone()), "Record not found");
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(OPTIMISTIC_LOCK_PREFIX) => {
            warn!(trace_id = %trace_id, detail = %msg, "Optimistic lock conflict detected");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Game was modified by another request; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        sea_orm::DbErr::Json(_) | sea_orm::DbErr::Type(_) => {
            error!(trace_id = %trace_id, raw_error = %error_msg, "Stored game data could not be decoded");
            return DomainError::infra(
                InfraErrorKind::DataCorruption,
                "Stored game data could not be decoded",
            );
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        let detail = match create_once_record(&error_msg) {
            Some(record) => format!("{record} already exists"),
            None => "Unique constraint violation".to_string(),
        };
        return DomainError::conflict(ConflictKind::AlreadyExists, detail);
    }

    // Serialization failure (Postgres) or writer contention (SQLite): the
    // competing transaction won, the caller may retry.
    if mentions_sqlstate(&error_msg, "40001")
        || mentions_sqlstate(&error_msg, "40P01")
        || error_msg.contains("database is locked")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Concurrent transaction conflict");
        return DomainError::conflict(
            ConflictKind::OptimisticLock,
            "Game was modified by another request; please retry",
        );
    }

    if error_msg.contains("timeout") || error_msg.contains("pool timed out") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
