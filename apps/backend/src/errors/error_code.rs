//! Error codes for the tarot backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the tarot backend API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Invalid reading ID provided
    InvalidReadingId,
    /// Invalid card ID provided
    InvalidCardId,
    /// Group order is not a permutation of A, B, C
    InvalidGroupOrder,
    /// Shuffle pass count outside 1..=50
    InvalidShuffleTimes,
    /// Question empty or too long
    InvalidQuestion,
    /// Unsupported language code
    InvalidLanguage,
    /// Deck too small to draw from
    InsufficientCards,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Reading not found
    ReadingNotFound,
    /// Card not found
    CardNotFound,
    /// Share slug not found
    ShareSlugNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Could not mint a unique share slug
    ShareSlugConflict,
    /// General conflict
    Conflict,

    // System Errors
    /// General database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Operation timed out
    Timeout,
    /// Stored data failed to decode
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidReadingId => "INVALID_READING_ID",
            Self::InvalidCardId => "INVALID_CARD_ID",
            Self::InvalidGroupOrder => "INVALID_GROUP_ORDER",
            Self::InvalidShuffleTimes => "INVALID_SHUFFLE_TIMES",
            Self::InvalidQuestion => "INVALID_QUESTION",
            Self::InvalidLanguage => "INVALID_LANGUAGE",
            Self::InsufficientCards => "INSUFFICIENT_CARDS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::ReadingNotFound => "READING_NOT_FOUND",
            Self::CardNotFound => "CARD_NOT_FOUND",
            Self::ShareSlugNotFound => "SHARE_SLUG_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::ShareSlugConflict => "SHARE_SLUG_CONFLICT",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
