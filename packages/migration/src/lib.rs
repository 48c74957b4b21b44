pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
pub use sea_orm_migration::sea_orm::DatabaseConnection;

mod m20250901_000001_game_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250901_000001_game_tables::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Run `command` against `db`, logging applied/defined counts before and after.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let before = snapshot(db).await?;
    tracing::info!(
        ?command,
        backend = %before.backend,
        database = %before.database,
        defined = before.defined,
        applied = before.applied,
        "migration starting"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    if let Err(e) = result {
        tracing::error!(?command, backend = %before.backend, error = %e, "migration failed");
        return Err(e);
    }

    if command != MigrationCommand::Status {
        let after = snapshot(db).await?;
        tracing::info!(?command, applied = after.applied, "migration finished");
    }
    Ok(())
}

#[derive(Debug)]
struct Snapshot {
    backend: String,
    database: String,
    applied: usize,
    defined: usize,
}

async fn snapshot(db: &DatabaseConnection) -> Result<Snapshot, DbErr> {
    let backend = db.get_database_backend();
    let query = match backend {
        DatabaseBackend::Postgres => Some("SELECT current_database() AS name"),
        DatabaseBackend::Sqlite => Some("SELECT file AS name FROM pragma_database_list WHERE name = 'main'"),
        _ => None,
    };

    let mut database = "<unknown>".to_string();
    if let Some(sql) = query {
        if let Some(row) = db.query_one(Statement::from_string(backend, sql)).await? {
            if let Ok(name) = row.try_get::<String>("", "name") {
                database = if name.is_empty() { ":memory:".to_string() } else { name };
            }
        }
    }

    Ok(Snapshot {
        backend: format!("{backend:?}"),
        database,
        applied: count_applied_migrations(db).await.unwrap_or(0),
        defined: Migrator::migrations().len(),
    })
}

/// Number of applied migrations; 0 before the migrations table exists.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

