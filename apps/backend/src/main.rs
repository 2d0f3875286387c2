use actix_web::{web, App, HttpServer};
use bingo_backend::config::db::{DbKind, RuntimeEnv};
use bingo_backend::config::env_lookup;
use bingo_backend::config::server::ServerConfig;
use bingo_backend::infra::state::build_state;
use bingo_backend::middleware::cors::cors_middleware;
use bingo_backend::middleware::request_trace::RequestTrace;
use bingo_backend::middleware::structured_logger::StructuredLogger;
use bingo_backend::routes;
use bingo_backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: docker-compose env_file or docker run --env-file
    // - Local dev: source env files manually (e.g., set -a; . ./.env; set +a)
    let server = ServerConfig::from_env().unwrap_or_else(|e| fail("invalid server config", e));
    let db_kind = DbKind::from_lookup(env_lookup).unwrap_or_else(|e| fail("invalid DB_KIND", e));
    let security =
        SecurityConfig::from_env().unwrap_or_else(|e| fail("invalid security config", e));

    info!(host = %server.host, port = server.port, ?db_kind, "starting bingo backend");

    // Connects and applies pending migrations.
    let app_state = build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(db_kind)
        .with_security(security)
        .build()
        .await
        .unwrap_or_else(|e| fail("failed to build application state", e));

    info!("database ready");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}

fn fail<T>(context: &str, err: impl std::fmt::Display) -> T {
    error!(error = %err, "{context}");
    eprintln!("{context}: {err}");
    std::process::exit(1)
}
