use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AppError;

/// Which database a process talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    /// Test profile enforces the `_test` database-name rule
    Test,
}

/// Database engine and storage mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    /// Private per-connection database; pools are pinned to one connection
    SqliteMemory,
}

impl FromStr for RuntimeEnv {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" => Ok(RuntimeEnv::Prod),
            "test" => Ok(RuntimeEnv::Test),
            other => Err(AppError::config(format!(
                "unknown runtime env '{other}' (expected prod or test)"
            ))),
        }
    }
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(DbKind::Postgres),
            "sqlite-file" => Ok(DbKind::SqliteFile),
            "sqlite-memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "unknown DB_KIND '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }
}

impl DbKind {
    /// `DB_KIND`, defaulting to Postgres.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        match lookup("DB_KIND") {
            Some(raw) => raw.parse(),
            None => Ok(DbKind::Postgres),
        }
    }

    pub fn is_sqlite(self) -> bool {
        matches!(self, DbKind::SqliteFile | DbKind::SqliteMemory)
    }
}

/// Connection URL for `env`/`kind`; `lookup` supplies the variables.
pub fn make_conn_spec_with(
    env: RuntimeEnv,
    kind: DbKind,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => {
            let host = lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string());
            let port = lookup("POSTGRES_PORT").unwrap_or_else(|| "5432".to_string());
            let db_name = db_name(env, &lookup)?;
            let username = must_var("APP_DB_USER", &lookup)?;
            let password = must_var("APP_DB_PASSWORD", &lookup)?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let path = sqlite_file_path(env, &lookup);
            Ok(format!("sqlite://{}?mode=rwc", path.display()))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// `SQLITE_DB_DIR` (default `./data`) joined with the per-env file name.
pub fn sqlite_file_path(env: RuntimeEnv, lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    let dir = lookup("SQLITE_DB_DIR").unwrap_or_else(|| "./data".to_string());
    let file = match env {
        RuntimeEnv::Prod => "bingo.db",
        RuntimeEnv::Test => "bingo_test.db",
    };
    PathBuf::from(dir).join(file)
}

fn db_name(env: RuntimeEnv, lookup: impl Fn(&str) -> Option<String>) -> Result<String, AppError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB", lookup),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB", lookup)?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn must_var(name: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String, AppError> {
    lookup(name)
        .ok_or_else(|| AppError::config(format!("Required environment variable '{name}' is not set")))
}
