use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{make_conn_spec_with, sqlite_file_path, DbKind, RuntimeEnv};
use crate::config::env_lookup;
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(conn) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(conn);
            }
            Err(e) if attempt < max_attempts => {
                warn!(attempt, max_attempts, interval_ms, error = %e, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Mask the password part of a connection URL for logging.
pub fn sanitize_db_url(url: &str) -> String {
    match url.rsplit_once('@') {
        Some((auth, host)) => match auth.rfind(':') {
            Some(colon) if auth[..colon].contains("://") => {
                format!("{}:***@{host}", &auth[..colon])
            }
            _ => url.to_string(),
        },
        None => url.to_string(),
    }
}

fn connect_options(url: &str, kind: DbKind) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url);
    opt.acquire_timeout(Duration::from_secs(5)).sqlx_logging(false);

    // Every connection to `sqlite::memory:` opens its own empty database.
    if kind == DbKind::SqliteMemory {
        opt.min_connections(1).max_connections(1);
    }
    opt
}

/// Open a pool for `env`/`kind`. Does not run migrations.
pub async fn connect_db(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    connect_db_with(env, kind, &env_lookup).await
}

/// [`connect_db`] with an injectable variable source.
pub async fn connect_db_with(
    env: RuntimeEnv,
    kind: DbKind,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec_with(env, kind, lookup)?;

    if kind == DbKind::SqliteFile {
        let path = sqlite_file_path(env, lookup);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| {
                AppError::config(format!(
                    "cannot create sqlite directory {}: {e}",
                    dir.display()
                ))
            })?;
        }
    }

    info!(env = ?env, db_kind = ?kind, url = %sanitize_db_url(&url), "db_connect=start");

    let opt = connect_options(&url, kind);
    let connect = || {
        let opt = opt.clone();
        async move {
            Database::connect(opt)
                .await
                .map_err(|e| AppError::db_unavailable(format!("failed to connect to database: {e}")))
        }
    };

    if kind == DbKind::Postgres {
        retry_connection(connect, CONNECT_ATTEMPTS, CONNECT_RETRY_INTERVAL_MS).await
    } else {
        connect().await
    }
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(env, kind).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;
    info!(env = ?env, db_kind = ?kind, "db_bootstrap=done");
    Ok(conn)
}

/// Run one migration command; the entry point of the migration CLI.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    kind: DbKind,
    command: MigrationCommand,
) -> Result<(), AppError> {
    let label = format!("{command:?}");
    let conn = connect_db(env, kind).await?;
    migrate(&conn, command)
        .await
        .map_err(|e| AppError::db(format!("migration {label} failed: {e}")))?;
    info!(env = ?env, db_kind = ?kind, command = %label, "db_migrate=done");
    Ok(())
}
