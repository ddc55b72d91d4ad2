//! # Tunestats - playlist audio features as CSV
//!
//! Native side of Tunestats: a CLI and an HTTP server around
//! [`tunestats_core`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ features.csv│────▶│  Reference  │────▶│   Matcher   │────▶│  <name>.csv │
//! │ (any enc.)  │     │  (decoded)  │     │   (core)    │     │ file / HTTP │
//! └─────────────┘     └─────────────┘     └──────▲──────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌──────┴──────┐
//!                     │  Web API    │────▶│  Spotify    │
//!                     │  /playlists │     │  client     │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tunestats::{load_reference_file, SpotifyClient};
//! use tunestats_core::{export_playlist, RowStyle};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = load_reference_file("features.csv")?;
//!     let client = SpotifyClient::new();
//!     let export = export_playlist(&client, &table, link, token, RowStyle::Legacy).await?;
//!     println!("{}", export.document);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Backend error types
//! - [`reference`] - Reference table loading from disk
//! - [`spotify`] - Web API playlist client
//! - [`emit`] - Writing exports to disk or stdout
//! - [`api`] - HTTP API server

pub mod error;

// Input
pub mod reference;
pub mod spotify;

// Output
pub mod emit;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{BackendError, BackendResult, ServerError};

pub use reference::{
    decode_content,
    detect_encoding,
    load_reference_file,
    load_reference_or_empty,
};

pub use spotify::{SpotifyClient, SPOTIFY_API_BASE};

pub use emit::{default_output_path, write_export, Destination};

pub use api::types::{error_response, ExportRequest, HealthResponse};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server, AppState, ServerOptions};
}
