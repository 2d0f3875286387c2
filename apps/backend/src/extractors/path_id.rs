use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Positive `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i64);

impl FromRequest for PathId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_path_id(req.match_info().get("id")))
    }
}

fn parse_path_id(raw: Option<&str>) -> Result<PathId, AppError> {
    let raw = raw.ok_or_else(|| AppError::bad_request(ErrorCode::InvalidId, "Missing id parameter"))?;

    let id = raw
        .parse::<i64>()
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidId, format!("Invalid id: {raw}")))?;

    if id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidId,
            format!("Id must be positive, got: {id}"),
        ));
    }

    Ok(PathId(id))
}
