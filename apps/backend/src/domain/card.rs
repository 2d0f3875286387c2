//! Card shape, deal request and the typed deal failures.
//!
//! Nothing here touches storage: the store is queried by
//! `services::cards`, which hands the sampled squares to [`shape_grid`].

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::errors::domain::DomainError;

/// Smallest row or column count the assembler accepts.
pub const MIN_DIMENSION: usize = 1;

/// Grid shape of a card. Both sides are at least [`MIN_DIMENSION`] and the
/// cell count fits in `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardDimensions {
    rows: usize,
    columns: usize,
}

impl CardDimensions {
    pub fn new(rows: usize, columns: usize) -> Result<Self, DomainError> {
        if rows < MIN_DIMENSION || columns < MIN_DIMENSION {
            return Err(DomainError::validation_other(format!(
                "rows and columns must be at least {MIN_DIMENSION}, got {rows}x{columns}"
            )));
        }
        if rows.checked_mul(columns).is_none() {
            return Err(DomainError::validation_other(format!(
                "card of {rows}x{columns} cells is too large"
            )));
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }
}

impl fmt::Display for CardDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// A validated request for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRequest {
    pub dimensions: CardDimensions,
    /// Deduplicated theme filter; `None` means every square qualifies
    pub theme_ids: Option<BTreeSet<i64>>,
}

impl CardRequest {
    pub fn new(dimensions: CardDimensions) -> Self {
        Self {
            dimensions,
            theme_ids: None,
        }
    }

    /// Restrict to squares carrying any of `theme_ids`. An empty set clears the filter.
    pub fn with_theme_ids(mut self, theme_ids: impl IntoIterator<Item = i64>) -> Self {
        let set: BTreeSet<i64> = theme_ids.into_iter().collect();
        self.theme_ids = if set.is_empty() { None } else { Some(set) };
        self
    }
}

/// Why a card could not be dealt.
#[derive(Debug, Error, PartialEq)]
pub enum DealError {
    /// At least one filter theme does not exist; nothing was sampled.
    #[error("Theme(s) not found: {}", join_ids(.missing))]
    ThemeNotFound { missing: Vec<i64> },
    /// The matching pool is smaller than the card.
    #[error("Not enough squares to fill the card: need {requested}, found {available}")]
    TooFewCards { requested: usize, available: usize },
    /// The store failed; surfaces as a server error.
    #[error(transparent)]
    Store(#[from] DomainError),
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ids from `requested` with no counterpart in `found`, ascending.
pub fn missing_ids(requested: &BTreeSet<i64>, found: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let found: BTreeSet<i64> = found.into_iter().collect();
    requested.difference(&found).copied().collect()
}

/// Lay `items` out row-major: row 0 left to right, then row 1, and so on.
///
/// Returns `None` unless `items.len()` equals the cell count exactly.
pub fn shape_grid<T>(dimensions: CardDimensions, items: Vec<T>) -> Option<Vec<Vec<T>>> {
    if items.len() != dimensions.cell_count() {
        return None;
    }
    let mut rows = Vec::with_capacity(dimensions.rows());
    let mut cells = items.into_iter();
    for _ in 0..dimensions.rows() {
        rows.push(cells.by_ref().take(dimensions.columns()).collect());
    }
    Some(rows)
}
