use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentUser, PathId, ValidatedJson};
use crate::services::themes::ThemeService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeListQuery {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateThemeRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateThemeRequest {
    pub id: i64,
    pub name: String,
}

async fn list_themes(
    query: web::Query<ThemeListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let name = query.name.as_deref().filter(|n| !n.is_empty());
    let themes = ThemeService::new().list(db, name).await?;
    Ok(HttpResponse::Ok().json(themes))
}

async fn get_theme(id: PathId, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let theme = ThemeService::new().get(db, id.0).await?;
    Ok(HttpResponse::Ok().json(theme))
}

async fn create_theme(
    body: ValidatedJson<CreateThemeRequest>,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name;
    let theme = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            ThemeService::new()
                .create(txn, &name)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(theme))
}

async fn update_theme(
    id: PathId,
    body: ValidatedJson<UpdateThemeRequest>,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let UpdateThemeRequest { id: body_id, name } = body.into_inner();
    if body_id != id.0 {
        return Err(AppError::bad_request(
            ErrorCode::IdMismatch,
            format!("Body id {body_id} does not match path id {}", id.0),
        ));
    }

    let theme_id = id.0;
    let theme = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            ThemeService::new()
                .update(txn, theme_id, &name)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(theme))
}

async fn delete_theme(
    id: PathId,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let theme_id = id.0;
    with_txn(&app_state, move |txn| {
        Box::pin(async move {
            ThemeService::new()
                .delete(txn, theme_id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_themes))
            .route(web::post().to(create_theme)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_theme))
            .route(web::put().to(update_theme))
            .route(web::delete().to(delete_theme)),
    );
}
