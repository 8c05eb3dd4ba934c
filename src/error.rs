//! Error types for relayout.

use std::io;
use thiserror::Error;

/// Result type alias for relayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing a document.
///
/// Heuristic misses (a line that matches no rule) are never errors; they
/// simply pass through as plain text.
#[derive(Error, Debug)]
pub enum Error {
    /// The extraction collaborator could not produce tokens for a page.
    #[error("Extraction failed on page {page}: {message}")]
    Extraction {
        /// 1-indexed page number
        page: usize,
        /// Collaborator's description of the failure
        message: String,
    },

    /// A page index (0-indexed) past the end of the source was requested.
    #[error("Page {} is out of range (document has {} pages)", .0 + 1, .1)]
    PageOutOfRange(usize, usize),

    /// A token dump was syntactically valid but structurally unusable.
    #[error("Invalid token data: {0}")]
    InvalidTokens(String),

    /// I/O error when reading a token dump.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap any collaborator error as an extraction failure of `page` (1-indexed).
    pub fn extraction(page: usize, err: impl std::fmt::Display) -> Self {
        Error::Extraction {
            page,
            message: err.to_string(),
        }
    }

    /// The 1-indexed page that triggered the failure, if the error is
    /// page-specific.
    pub fn page(&self) -> Option<usize> {
        match self {
            Error::Extraction { page, .. } => Some(*page),
            Error::PageOutOfRange(index, _) => Some(index + 1),
            _ => None,
        }
    }
}
