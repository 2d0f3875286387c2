//! Square CRUD service.

use std::collections::BTreeSet;

use sea_orm::ConnectionTrait;
use tracing::info;

use super::themes::ensure_themes_exist;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::squares::{self, Square, SquareChanges};

/// Longest accepted square text, in characters.
pub const MAX_TEXT_LEN: usize = 255;

/// Square domain service.
pub struct SquareService;

impl SquareService {
    pub fn new() -> Self {
        Self
    }

    pub async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Square, DomainError> {
        squares::find_by_id(conn, id)
            .await?
            .ok_or_else(|| square_not_found(id))
    }

    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        text_contains: Option<&str>,
    ) -> Result<Vec<Square>, DomainError> {
        squares::list(conn, text_contains).await
    }

    /// Create a square linked to `theme_ids`, all of which must exist.
    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        text: &str,
        theme_ids: &BTreeSet<i64>,
    ) -> Result<Square, DomainError> {
        let text = validate_text(text)?;
        ensure_themes_exist(conn, theme_ids).await?;
        let square = squares::create(conn, text, theme_ids).await?;
        info!(square_id = square.id, themes = theme_ids.len(), "square created");
        Ok(square)
    }

    /// Apply `changes`; a theme id set replaces the current links.
    pub async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
        changes: SquareChanges,
    ) -> Result<Square, DomainError> {
        if changes.text.is_none() && changes.theme_ids.is_none() {
            return Err(DomainError::validation_other(
                "update requires text or themeId",
            ));
        }
        let text = match changes.text.as_deref() {
            Some(text) => Some(validate_text(text)?.to_string()),
            None => None,
        };
        if let Some(ids) = &changes.theme_ids {
            ensure_themes_exist(conn, ids).await?;
        }

        let changes = SquareChanges {
            text,
            theme_ids: changes.theme_ids,
        };
        squares::update(conn, id, changes)
            .await?
            .ok_or_else(|| square_not_found(id))
    }

    pub async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<(), DomainError> {
        if !squares::delete(conn, id).await? {
            return Err(square_not_found(id));
        }
        info!(square_id = id, "square deleted");
        Ok(())
    }
}

impl Default for SquareService {
    fn default() -> Self {
        Self::new()
    }
}

fn square_not_found(id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Square, format!("Square {id} not found"))
}

fn validate_text(text: &str) -> Result<&str, DomainError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::validation_other("text must not be empty"));
    }
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(DomainError::validation_other(format!(
            "text must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(text)
}
