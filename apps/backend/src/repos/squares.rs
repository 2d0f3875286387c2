//! Square repository functions (generic over ConnectionTrait).
//!
//! Squares come back hydrated with their full theme list, sorted by theme id.

use std::collections::{BTreeSet, HashMap};

use sea_orm::ConnectionTrait;
use serde::Serialize;

use super::themes::Theme;
use crate::adapters::squares_sea::{self as squares_adapter, SquareCreate, SquareUpdate};
use crate::entities::squares;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Square domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Square {
    pub id: i64,
    pub text: String,
    pub themes: Vec<Theme>,
}

/// Fields to change on an existing square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SquareChanges {
    pub text: Option<String>,
    /// Replaces the link set when present
    pub theme_ids: Option<BTreeSet<i64>>,
}

/// Up to `count` distinct squares in random order, optionally restricted to
/// squares carrying at least one of `theme_ids`.
pub async fn find_random_distinct<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    count: usize,
    theme_ids: Option<&BTreeSet<i64>>,
) -> Result<Vec<Square>, DomainError> {
    let ids: Option<Vec<i64>> = theme_ids.map(|set| set.iter().copied().collect());
    let limit = u64::try_from(count).unwrap_or(u64::MAX);
    let models = squares_adapter::find_random(conn, limit, ids.as_deref()).await?;
    hydrate(conn, models).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Square>, DomainError> {
    match squares_adapter::find_by_id(conn, id).await? {
        Some(model) => Ok(hydrate(conn, vec![model]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    text_contains: Option<&str>,
) -> Result<Vec<Square>, DomainError> {
    let models = squares_adapter::list(conn, text_contains).await?;
    hydrate(conn, models).await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    text: &str,
    theme_ids: &BTreeSet<i64>,
) -> Result<Square, DomainError> {
    let dto = SquareCreate::new(text).with_theme_ids(theme_ids.iter().copied());
    let model = squares_adapter::create(conn, dto).await?;
    let mut hydrated = hydrate(conn, vec![model]).await?;
    hydrated
        .pop()
        .ok_or_else(|| DomainError::infra(InfraErrorKind::DataCorruption, "created square was not reloaded"))
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    changes: SquareChanges,
) -> Result<Option<Square>, DomainError> {
    let mut dto = SquareUpdate::new(id);
    if let Some(text) = changes.text {
        dto = dto.with_text(text);
    }
    if let Some(theme_ids) = changes.theme_ids {
        dto = dto.with_theme_ids(theme_ids);
    }
    match squares_adapter::update(conn, dto).await? {
        Some(model) => Ok(hydrate(conn, vec![model]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<bool, DomainError> {
    Ok(squares_adapter::delete(conn, id).await?)
}

/// Attach theme lists with one batched link query, keeping the input order.
async fn hydrate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    models: Vec<squares::Model>,
) -> Result<Vec<Square>, DomainError> {
    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let mut by_square: HashMap<i64, Vec<Theme>> = HashMap::new();
    for (square_id, theme) in squares_adapter::themes_for_squares(conn, &ids).await? {
        by_square
            .entry(square_id)
            .or_default()
            .push(Theme::from(theme));
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let mut themes = by_square.remove(&model.id).unwrap_or_default();
            themes.sort_by_key(|t| t.id);
            Square {
                id: model.id,
                text: model.text,
                themes,
            }
        })
        .collect())
}
