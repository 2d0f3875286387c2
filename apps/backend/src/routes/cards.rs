use actix_web::{web, HttpResponse};
use tracing::info;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::CardQuery;
use crate::services::cards::{CardService, SeaCardSource};
use crate::state::app_state::AppState;

/// Deal one random card. Read-only; no transaction needed.
async fn get_card(
    query: CardQuery,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let request = query.into_inner();
    let db = require_db(&app_state)?;

    let card = CardService::new(SeaCardSource::new(db))
        .deal(&request)
        .await?;

    info!(
        dimensions = %request.dimensions,
        themes = request.theme_ids.as_ref().map_or(0, |ids| ids.len()),
        "card dealt"
    );
    Ok(HttpResponse::Ok().json(card))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(get_card)));
}
