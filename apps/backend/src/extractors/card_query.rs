//! `GET /api/card` query parsing into a single validated [`CardRequest`].

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::card::{CardDimensions, CardRequest};
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Accepted range for `rows` and `columns`.
pub const DIMENSION_RANGE: RangeInclusive<usize> = 2..=100;

/// Validated card query.
///
/// `themeId` may be single, repeated, bracketed (`themeId[]`) or
/// comma-separated; duplicates collapse. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardQuery(pub CardRequest);

impl CardQuery {
    pub fn into_inner(self) -> CardRequest {
        self.0
    }
}

impl FromRequest for CardQuery {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_card_query(req.query_string()).map(CardQuery))
    }
}

pub fn parse_card_query(query: &str) -> Result<CardRequest, AppError> {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(query)
        .map_err(|e| AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {e}")))?
        .into_inner();

    let mut rows = None;
    let mut columns = None;
    let mut theme_ids = BTreeSet::new();

    for (key, value) in &pairs {
        match key.as_str() {
            "rows" => set_once(&mut rows, "rows", parse_dimension("rows", value)?)?,
            "columns" => set_once(&mut columns, "columns", parse_dimension("columns", value)?)?,
            "themeId" | "themeId[]" => {
                for part in value.split(',') {
                    theme_ids.insert(parse_theme_id(part)?);
                }
            }
            other => {
                return Err(AppError::bad_request(
                    ErrorCode::UnknownQueryParam,
                    format!("Unknown query parameter: {other}"),
                ))
            }
        }
    }

    let rows = rows.ok_or_else(|| missing("rows"))?;
    let columns = columns.ok_or_else(|| missing("columns"))?;
    let dimensions = CardDimensions::new(rows, columns)?;

    Ok(CardRequest::new(dimensions).with_theme_ids(theme_ids))
}

fn set_once(slot: &mut Option<usize>, name: &str, value: usize) -> Result<(), AppError> {
    if slot.replace(value).is_some() {
        return Err(AppError::invalid(
            ErrorCode::InvalidDimensions,
            format!("{name} given more than once"),
        ));
    }
    Ok(())
}

fn parse_dimension(name: &str, raw: &str) -> Result<usize, AppError> {
    let value = raw.trim().parse::<usize>().map_err(|_| {
        AppError::invalid(
            ErrorCode::InvalidDimensions,
            format!("{name} must be an integer, got: {raw}"),
        )
    })?;
    if !DIMENSION_RANGE.contains(&value) {
        return Err(AppError::invalid(
            ErrorCode::InvalidDimensions,
            format!(
                "{name} must be between {} and {}, got: {value}",
                DIMENSION_RANGE.start(),
                DIMENSION_RANGE.end()
            ),
        ));
    }
    Ok(value)
}

fn parse_theme_id(raw: &str) -> Result<i64, AppError> {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::invalid(
            ErrorCode::InvalidThemeId,
            format!("themeId must be a positive integer, got: {raw:?}"),
        )),
    }
}

fn missing(name: &str) -> AppError {
    AppError::invalid(
        ErrorCode::InvalidDimensions,
        format!("{name} is required"),
    )
}
