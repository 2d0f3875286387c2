use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;

/// Name of the session cookie set by login.
pub const SESSION_COOKIE: &str = "token";

/// Session token from `Authorization: Bearer <token>` or the `token` cookie.
///
/// The header wins when both are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token: String,
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract_token(req).ok_or_else(AppError::unauthorized))
    }
}

fn extract_token(req: &HttpRequest) -> Option<AuthToken> {
    if let Some(value) = req.headers().get(header::AUTHORIZATION) {
        return bearer_token(value.to_str().ok()?).map(|token| AuthToken { token });
    }

    let cookie = req.cookie(SESSION_COOKIE)?;
    let token = cookie.value().trim();
    if token.is_empty() {
        return None;
    }
    Some(AuthToken {
        token: token.to_string(),
    })
}

fn bearer_token(value: &str) -> Option<String> {
    let mut parts = value.split_whitespace();
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };
    if scheme != "Bearer" {
        return None;
    }
    Some(token.to_string())
}
