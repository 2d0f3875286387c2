use std::collections::BTreeSet;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentUser, PathId, ValidatedJson};
use crate::repos::squares::SquareChanges;
use crate::services::squares::SquareService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SquareListQuery {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateSquareRequest {
    pub text: String,
    #[serde(default)]
    pub theme_id: Vec<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct UpdateSquareRequest {
    pub id: i64,
    pub text: Option<String>,
    pub theme_id: Option<Vec<i64>>,
}

async fn list_squares(
    query: web::Query<SquareListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let text = query.text.as_deref().filter(|t| !t.is_empty());
    let squares = SquareService::new().list(db, text).await?;
    Ok(HttpResponse::Ok().json(squares))
}

async fn get_square(
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let square = SquareService::new().get(db, id.0).await?;
    Ok(HttpResponse::Ok().json(square))
}

async fn create_square(
    body: ValidatedJson<CreateSquareRequest>,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreateSquareRequest { text, theme_id } = body.into_inner();
    let theme_ids: BTreeSet<i64> = theme_id.into_iter().collect();

    let square = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            SquareService::new()
                .create(txn, &text, &theme_ids)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(square))
}

async fn update_square(
    id: PathId,
    body: ValidatedJson<UpdateSquareRequest>,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    if body.id != id.0 {
        return Err(AppError::bad_request(
            ErrorCode::IdMismatch,
            format!("Body id {} does not match path id {}", body.id, id.0),
        ));
    }

    let changes = SquareChanges {
        text: body.text,
        theme_ids: body.theme_id.map(|ids| ids.into_iter().collect()),
    };
    let square_id = id.0;

    let square = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            SquareService::new()
                .update(txn, square_id, changes)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(square))
}

async fn delete_square(
    id: PathId,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let square_id = id.0;
    with_txn(&app_state, move |txn| {
        Box::pin(async move {
            SquareService::new()
                .delete(txn, square_id)
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
            .route(web::get().to(list_squares))
            .route(web::post().to(create_square)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_square))
            .route(web::put().to(update_square))
            .route(web::delete().to(delete_square)),
    );
}
