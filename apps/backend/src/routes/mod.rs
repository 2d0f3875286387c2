use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod cards;
pub mod health;
pub mod squares;
pub mod themes;
pub mod users;

/// Register every route plus the query error handler.
///
/// Used by `main.rs` and by tests, which drive the same paths without the
/// outer middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::UnknownQueryParam, format!("Invalid query: {err}")).into()
    }));

    cfg.service(web::scope("/health").configure(health::configure_routes));
    cfg.service(web::scope("/api/card").configure(cards::configure_routes));
    cfg.service(web::scope("/api/square").configure(squares::configure_routes));
    cfg.service(web::scope("/api/theme").configure(themes::configure_routes));
    cfg.service(web::scope("/api/user").configure(users::configure_routes));
}
