//! Error types for the export pipeline.
//!
//! - [`ReferenceError`] - Reference table loading errors (logged, never shown to users)
//! - [`FetchError`] - Remote playlist fetch errors
//! - [`ExportError`] - User-facing errors of a single export
//!
//! Every remote failure collapses into [`ExportError::InvalidAccessToken`];
//! the underlying [`FetchError`] is kept as its source for logging.

use thiserror::Error;

// =============================================================================
// Reference Table Errors
// =============================================================================

/// Errors while loading the reference table.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// Failed to read the resource.
    #[error("Failed to read reference table: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV.
    #[error("Invalid reference table: {0}")]
    Csv(#[from] csv::Error),

    /// Resource has no header row.
    #[error("Reference table is empty")]
    Empty,

    /// Resource could not be retrieved over HTTP.
    #[error("Failed to fetch reference table: {0}")]
    Http(String),
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Errors from a [`crate::PlaylistSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Non-success HTTP status.
    #[error("HTTP {0}")]
    Status(u16),

    /// Request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// Response body was not a playlist.
    #[error("Invalid playlist response: {0}")]
    Decode(String),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Input field an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorField {
    Link,
    AccessToken,
}

/// Errors of one export operation.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The link is not a Spotify playlist URL. No request was made.
    #[error("Invalid Spotify playlist link")]
    InvalidLink,

    /// The playlist request failed, whatever the cause.
    #[error("Invalid access token")]
    InvalidAccessToken(#[source] FetchError),

    /// Writing a normalized CSV row failed.
    #[error("Failed to render CSV: {0}")]
    Render(#[from] csv::Error),
}

impl ExportError {
    /// Field the presentation layer should flag.
    ///
    /// `None` for failures that are not about user input.
    pub fn field(&self) -> Option<ErrorField> {
        match self {
            ExportError::InvalidLink => Some(ErrorField::Link),
            ExportError::InvalidAccessToken(_) => Some(ErrorField::AccessToken),
            ExportError::Render(_) => None,
        }
    }
}

impl From<FetchError> for ExportError {
    fn from(err: FetchError) -> Self {
        ExportError::InvalidAccessToken(err)
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for reference table operations.
pub type ReferenceResult<T> = Result<T, ReferenceError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
