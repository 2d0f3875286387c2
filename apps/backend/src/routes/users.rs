use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson, SESSION_COOKIE};
use crate::services::users::UserService;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let RegisterRequest {
        username,
        name,
        password,
    } = body.into_inner();
    let security = app_state.security.clone();

    let user = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            UserService::new()
                .register(txn, &security, &username, &name, &password)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(user))
}

/// Open a session; the token is returned in the body and as the `token` cookie.
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { username, password } = body.into_inner();

    let token = with_txn(&app_state, move |txn| {
        Box::pin(async move { UserService::new().login(txn, &username, &password).await })
    })
    .await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&app_state.security, token.clone()))
        .json(LoginResponse { token }))
}

async fn logout(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = user.token;
    with_txn(&app_state, move |txn| {
        Box::pin(async move { UserService::new().logout(txn, &token).await })
    })
    .await?;

    let mut removal = session_cookie(&app_state.security, String::new());
    removal.make_removal();
    Ok(HttpResponse::NoContent().cookie(removal).finish())
}

fn session_cookie(security: &SecurityConfig, token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(security.session_cookie_secure)
        .finish()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout));
}
