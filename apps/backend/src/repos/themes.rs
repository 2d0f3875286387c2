//! Theme repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::themes_sea as themes_adapter;
use crate::errors::domain::DomainError;

/// Theme domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub id: i64,
    pub name: String,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Theme>, DomainError> {
    let theme = themes_adapter::find_by_id(conn, id).await?;
    Ok(theme.map(Theme::from))
}

/// Existing themes among `ids`, ordered by id. Omission signals non-existence.
pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<Theme>, DomainError> {
    let themes = themes_adapter::find_by_ids(conn, ids).await?;
    Ok(themes.into_iter().map(Theme::from).collect())
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name_contains: Option<&str>,
) -> Result<Vec<Theme>, DomainError> {
    let themes = themes_adapter::list(conn, name_contains).await?;
    Ok(themes.into_iter().map(Theme::from).collect())
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Theme, DomainError> {
    let theme = themes_adapter::create(conn, name.to_string()).await?;
    Ok(Theme::from(theme))
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    name: &str,
) -> Result<Option<Theme>, DomainError> {
    let theme = themes_adapter::rename(conn, id, name.to_string()).await?;
    Ok(theme.map(Theme::from))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<bool, DomainError> {
    Ok(themes_adapter::delete(conn, id).await?)
}

impl From<crate::entities::themes::Model> for Theme {
    fn from(model: crate::entities::themes::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
