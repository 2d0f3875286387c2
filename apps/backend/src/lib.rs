#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use config::db::{DbKind, RuntimeEnv};
pub use config::server::ServerConfig;
pub use domain::card::{CardDimensions, CardRequest, DealError};
pub use error::AppError;
pub use extractors::{AuthToken, CardQuery, CurrentUser, PathId, ValidatedJson};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use services::cards::{Card, CardService, CardSource, SeaCardSource};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Prelude for test convenience
pub mod prelude {
    pub use super::config::db::*;
    pub use super::error::*;
    pub use super::extractors::*;
    pub use super::middleware::*;
    pub use super::state::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
