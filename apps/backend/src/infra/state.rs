use sea_orm::DatabaseConnection;

use crate::config::db::{DbKind, RuntimeEnv};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, shared by `main` and the test suites.
pub struct StateBuilder {
    security_config: SecurityConfig,
    env: RuntimeEnv,
    db_kind: Option<DbKind>,
    connection: Option<DatabaseConnection>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            env: RuntimeEnv::Prod,
            db_kind: None,
            connection: None,
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    /// Use an already-open connection instead of bootstrapping one.
    pub fn with_connection(mut self, conn: DatabaseConnection) -> Self {
        self.connection = Some(conn);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        if let Some(conn) = self.connection {
            return Ok(AppState::new(conn, self.security_config));
        }
        match self.db_kind {
            Some(kind) => {
                let conn = bootstrap_db(self.env, kind).await?;
                Ok(AppState::new(conn, self.security_config))
            }
            None => Ok(AppState::new_without_db(self.security_config)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
