use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_BACKOFF: Duration = Duration::from_millis(500);

fn connect_options(kind: DbKind, url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url.to_string());
    match kind {
        // Every in-memory connection is its own database; keep exactly one.
        DbKind::SqliteMemory => {
            opt.min_connections(1).max_connections(1);
        }
        DbKind::SqliteFile => {
            opt.max_connections(4);
        }
        DbKind::Postgres => {
            opt.max_connections(16);
        }
    }
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    opt
}

/// Connect to the configured database. Postgres is retried briefly for
/// startup ordering; SQLite is local and tried once.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;
    let attempts = if kind.is_sqlite() { 1 } else { CONNECT_ATTEMPTS };

    let mut attempt = 0;
    loop {
        attempt += 1;
        match Database::connect(connect_options(kind, &url)).await {
            Ok(conn) => return Ok(conn),
            Err(e) if attempt < attempts => {
                warn!(db_kind = ?kind, attempt, error = %e, "database connect failed; retrying");
                tokio::time::sleep(CONNECT_BACKOFF).await;
            }
            Err(e) => {
                return Err(AppError::config(format!(
                    "failed to connect to database ({kind:?}): {e}"
                )))
            }
        }
    }
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    info!(db_kind = ?kind, "bootstrap=start");
    let conn = connect_db(kind).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(db_kind = ?kind, "bootstrap=ready");
    Ok(conn)
}
