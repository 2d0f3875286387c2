//! Error codes for the bingo backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the bingo backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Authentication required
    Unauthorized,
    /// Unknown username or wrong password
    InvalidCredentials,

    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Path id is not a positive integer
    InvalidId,
    /// Body id does not match the path id
    IdMismatch,
    /// Card rows/columns missing or out of range
    InvalidDimensions,
    /// Theme id in a filter or body is not a positive integer
    InvalidThemeId,
    /// Query string carries a key the endpoint does not accept
    UnknownQueryParam,

    // Card dealing
    /// A referenced theme does not exist
    ThemeNotFound,
    /// Not enough matching squares to fill the card
    TooFewSquares,

    // Resource Not Found
    /// General not found error
    NotFound,

    // Conflicts
    /// Username already registered
    UsernameTaken,
    /// Unique constraint violation
    UniqueViolation,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidId => "INVALID_ID",
            Self::IdMismatch => "ID_MISMATCH",
            Self::InvalidDimensions => "INVALID_DIMENSIONS",
            Self::InvalidThemeId => "INVALID_THEME_ID",
            Self::UnknownQueryParam => "UNKNOWN_QUERY_PARAM",

            Self::ThemeNotFound => "THEME_NOT_FOUND",
            Self::TooFewSquares => "TOO_FEW_SQUARES",

            Self::NotFound => "NOT_FOUND",

            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
