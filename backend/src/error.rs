//! Error types for the CLI and the HTTP server.
//!
//! - [`BackendError`] - Everything a CLI command can fail with
//! - [`ServerError`] - HTTP server startup errors
//!
//! Core errors convert automatically so `?` works across crate boundaries.

use thiserror::Error;
use tunestats_core::{ExportError, FetchError, ReferenceError};

// =============================================================================
// Backend Errors
// =============================================================================

/// Errors from CLI commands.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Reference table could not be loaded.
    #[error("Reference error: {0}")]
    Reference(#[from] ReferenceError),

    /// Export failed (bad link or token).
    #[error("{0}")]
    Export(#[from] ExportError),

    /// Saved playlist response could not be read.
    #[error("Playlist error: {0}")]
    Playlist(#[from] FetchError),

    /// Link is not a Spotify playlist URL.
    #[error("Not a Spotify playlist link: {0}")]
    InvalidLink(String),

    /// Failed to write output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind or serve.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Static directory does not exist.
    #[error("Static directory not found: {0}")]
    MissingStaticDir(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CLI operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
