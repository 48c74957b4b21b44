use std::env;

use clap::{Parser, ValueEnum};
use migration::MigrationCommand;
use sea_orm::Database;

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

/// In-memory SQLite is not offered: the database would vanish when the
/// command exits.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Avalon database migration tool")]
struct Args {
    #[arg(value_enum)]
    command: Command,

    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

fn must_var(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("Required environment variable '{name}' is not set"))
}

/// Owner credentials fall back to the application user.
fn database_url(db: Db) -> Result<String, String> {
    match db {
        Db::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let name = must_var("PROD_DB")?;
            let user = env::var("OWNER_DB_USER").or_else(|_| must_var("APP_DB_USER"))?;
            let password =
                env::var("OWNER_DB_PASSWORD").or_else(|_| must_var("APP_DB_PASSWORD"))?;
            Ok(format!("postgresql://{user}:{password}@{host}:{port}/{name}"))
        }
        Db::SqliteFile => Ok(format!("sqlite://{}?mode=rwc", must_var("SQLITE_PATH")?)),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let url = match database_url(args.db) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, args.command.into()).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
