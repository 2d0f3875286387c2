use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::Serialize;

use super::auth_token::AuthToken;
use crate::db::require_db;
use crate::error::AppError;
use crate::services::users::UserService;
use crate::state::app_state::AppState;

/// The user owning the request's session token.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub name: String,
    /// The session token the user authenticated with
    #[serde(skip)]
    pub token: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        let token = AuthToken::from_request(&req, payload).into_inner();

        Box::pin(async move {
            let AuthToken { token } = token?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;
            let db = require_db(app_state)?;

            let user = UserService::new().authenticate(db, &token).await?;

            Ok(CurrentUser {
                id: user.id,
                username: user.username,
                name: user.name,
                token,
            })
        })
    }
}
