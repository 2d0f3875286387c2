//! DTOs for the squares_sea adapter.

/// New square text plus the theme ids to link.
#[derive(Debug, Clone)]
pub struct SquareCreate {
    pub text: String,
    pub theme_ids: Vec<i64>,
}

impl SquareCreate {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            theme_ids: Vec::new(),
        }
    }

    pub fn with_theme_ids(mut self, theme_ids: impl IntoIterator<Item = i64>) -> Self {
        self.theme_ids = theme_ids.into_iter().collect();
        self
    }
}

/// Partial update; `None` fields are left as they are.
#[derive(Debug, Clone)]
pub struct SquareUpdate {
    pub id: i64,
    pub text: Option<String>,
    /// Replaces the whole link set when present
    pub theme_ids: Option<Vec<i64>>,
}

impl SquareUpdate {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            text: None,
            theme_ids: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_theme_ids(mut self, theme_ids: impl IntoIterator<Item = i64>) -> Self {
        self.theme_ids = Some(theme_ids.into_iter().collect());
        self
    }
}
