use actix_web::{web, App, HttpServer};
use avalon_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use avalon_backend::telemetry::init_tracing;
use avalon_backend::{build_state, routes, CacheKind, DbKind};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(e) => {
            error!(error = %e, "BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let kinds = DbKind::from_env().and_then(|db| Ok((db, CacheKind::from_env()?)));
    let (db_kind, cache_kind) = match kinds {
        Ok(kinds) => kinds,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(db_kind)
        .with_cache(cache_kind)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };
    info!(%host, port, ?db_kind, "Starting Avalon backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
