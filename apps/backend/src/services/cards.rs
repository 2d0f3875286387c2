//! Card assembler: theme validation, random sampling, grid shaping.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::debug;

use crate::domain::card::{missing_ids, shape_grid, CardRequest, DealError};
use crate::errors::domain::DomainError;
use crate::repos::squares::{self, Square};
use crate::repos::themes::{self, Theme};

/// The store contract the assembler needs.
#[async_trait]
pub trait CardSource {
    /// Existing themes among `ids`; absent ids do not exist.
    async fn find_themes_by_ids(&self, ids: &BTreeSet<i64>) -> Result<Vec<Theme>, DomainError>;

    /// Up to `count` distinct squares in random order, filtered to squares
    /// carrying any of `theme_ids` when given. Each square has its full theme list.
    async fn find_random_squares(
        &self,
        count: usize,
        theme_ids: Option<&BTreeSet<i64>>,
    ) -> Result<Vec<Square>, DomainError>;
}

/// `CardSource` over a SeaORM connection or transaction.
pub struct SeaCardSource<'a, C> {
    conn: &'a C,
}

impl<'a, C> SeaCardSource<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> CardSource for SeaCardSource<'_, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_themes_by_ids(&self, ids: &BTreeSet<i64>) -> Result<Vec<Theme>, DomainError> {
        let ids: Vec<i64> = ids.iter().copied().collect();
        themes::find_by_ids(self.conn, &ids).await
    }

    async fn find_random_squares(
        &self,
        count: usize,
        theme_ids: Option<&BTreeSet<i64>>,
    ) -> Result<Vec<Square>, DomainError> {
        squares::find_random_distinct(self.conn, count, theme_ids).await
    }
}

/// A dealt card: `rows[r][c]`, every square distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    #[serde(rename = "card")]
    pub rows: Vec<Vec<Square>>,
}

impl Card {
    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.rows.iter().flatten()
    }
}

/// Deals cards from any [`CardSource`].
pub struct CardService<S: CardSource> {
    source: S,
}

impl<S: CardSource> CardService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Deal one card for `request`.
    ///
    /// Fails with `ThemeNotFound` before sampling when any filter theme is
    /// missing, and with `TooFewCards` when the matching pool cannot fill
    /// every cell. Never returns a partial grid.
    pub async fn deal(&self, request: &CardRequest) -> Result<Card, DealError> {
        if let Some(ids) = &request.theme_ids {
            let found = self.source.find_themes_by_ids(ids).await?;
            if found.len() < ids.len() {
                let missing = missing_ids(ids, found.iter().map(|t| t.id));
                debug!(missing = ?missing, "card filter references unknown themes");
                return Err(DealError::ThemeNotFound { missing });
            }
        }

        let count = request.dimensions.cell_count();
        let mut sampled = self
            .source
            .find_random_squares(count, request.theme_ids.as_ref())
            .await?;

        if sampled.len() < count {
            debug!(
                requested = count,
                available = sampled.len(),
                "not enough squares for card"
            );
            return Err(DealError::TooFewCards {
                requested: count,
                available: sampled.len(),
            });
        }
        sampled.truncate(count);

        let available = sampled.len();
        let rows = shape_grid(request.dimensions, sampled).ok_or(DealError::TooFewCards {
            requested: count,
            available,
        })?;

        debug!(
            dimensions = %request.dimensions,
            filtered = request.theme_ids.is_some(),
            "card dealt"
        );
        Ok(Card { rows })
    }
}
