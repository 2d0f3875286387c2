use bingo_backend::config::db::{DbKind, RuntimeEnv};
use bingo_backend::infra::state::build_state;
use bingo_backend::state::app_state::AppState;
use bingo_backend::state::security_config::SecurityConfig;
use bingo_backend::AppError;
use sea_orm::DatabaseConnection;

/// Lowest bcrypt cost; keeps registration fast in tests.
pub const TEST_HASH_COST: u32 = 4;

/// Fresh, migrated in-memory SQLite state private to the calling test.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteMemory)
        .with_security(SecurityConfig::new(TEST_HASH_COST))
        .build()
        .await
}

/// Connection of a state built by [`build_test_state`].
pub fn db(state: &AppState) -> &DatabaseConnection {
    state.db().expect("test state has a database")
}
