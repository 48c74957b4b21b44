//! Shared fixtures for the integration suites.

pub mod moves;

use avalon_backend::{build_state, AppError, AppState, CacheKind, DbKind};

/// Fresh in-memory SQLite database (migrated) with an in-process cache.
///
/// The database lives on a single connection, so tests drive one
/// transaction at a time.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_cache(CacheKind::Memory { capacity: 1_000 })
        .build()
        .await
}

/// Unwrap the error of a refused move and check its code and detail.
#[track_caller]
pub fn assert_rejected<T: std::fmt::Debug>(
    result: Result<T, AppError>,
    code: avalon_backend::ErrorCode,
    detail: &str,
) {
    let err = result.expect_err("move should have been refused");
    assert_eq!(err.code(), code, "unexpected error: {err:?}");
    assert!(
        err.to_string().contains(detail),
        "expected '{detail}' in '{err}'"
    );
}
