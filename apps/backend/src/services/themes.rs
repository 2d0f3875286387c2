//! Theme CRUD service.

use std::collections::BTreeSet;

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::card::missing_ids;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::themes::{self, Theme};

/// Longest accepted theme name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Theme domain service.
pub struct ThemeService;

impl ThemeService {
    pub fn new() -> Self {
        Self
    }

    pub async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Theme, DomainError> {
        themes::find_by_id(conn, id)
            .await?
            .ok_or_else(|| theme_not_found(id))
    }

    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name_contains: Option<&str>,
    ) -> Result<Vec<Theme>, DomainError> {
        themes::list(conn, name_contains).await
    }

    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<Theme, DomainError> {
        let name = validate_name(name)?;
        let theme = themes::create(conn, name).await?;
        info!(theme_id = theme.id, "theme created");
        Ok(theme)
    }

    pub async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
        name: &str,
    ) -> Result<Theme, DomainError> {
        let name = validate_name(name)?;
        themes::update(conn, id, name)
            .await?
            .ok_or_else(|| theme_not_found(id))
    }

    /// Delete a theme and, through the link cascade, its square associations.
    pub async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<(), DomainError> {
        if !themes::delete(conn, id).await? {
            return Err(theme_not_found(id));
        }
        info!(theme_id = id, "theme deleted");
        Ok(())
    }
}

impl Default for ThemeService {
    fn default() -> Self {
        Self::new()
    }
}

/// Fails with `ThemeNotFound` naming every id in `ids` that has no theme row.
pub(crate) async fn ensure_themes_exist<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &BTreeSet<i64>,
) -> Result<(), DomainError> {
    if ids.is_empty() {
        return Ok(());
    }
    let wanted: Vec<i64> = ids.iter().copied().collect();
    let found = themes::find_by_ids(conn, &wanted).await?;
    let missing = missing_ids(ids, found.iter().map(|t| t.id));
    if missing.is_empty() {
        return Ok(());
    }
    let list = missing
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Err(DomainError::validation(
        ValidationKind::ThemeNotFound,
        format!("Theme(s) not found: {list}"),
    ))
}

fn theme_not_found(id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Theme, format!("Theme {id} not found"))
}

fn validate_name(name: &str) -> Result<&str, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation_other("name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation_other(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name)
}
