use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;

/// Shared per-process state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Absent only in tests that exercise the no-database path
    db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
        }
    }

    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self { db: None, security }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
