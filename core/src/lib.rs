//! # Tunestats core - playlist audio features to CSV
//!
//! Joins the tracks of a Spotify playlist against a preloaded reference table
//! of audio features and renders the matches as a CSV document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Playlist   │────▶│  Resolver   │────▶│   Source    │────▶│   Matcher   │
//! │    link     │     │  (id regex) │     │ (Spotify)   │     │ (ref table) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                    │
//!                                         ┌─────────────┐     ┌──────▼──────┐
//!                                         │  <name>.csv │◀────│   Export    │
//!                                         └─────────────┘     └─────────────┘
//! ```
//!
//! This crate has no I/O runtime of its own: the playlist fetch sits behind
//! [`PlaylistSource`], implemented natively by the backend (reqwest) and in
//! the browser by the frontend (gloo-net).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tunestats_core::{export_playlist, ReferenceTable, RowStyle};
//!
//! let table = ReferenceTable::load_or_empty(&features_csv);
//! let export = export_playlist(&client, &table, link, token, RowStyle::Legacy).await?;
//! std::fs::write(export.filename(), export.document.to_string())?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Feature records and playlist types
//! - [`reference`] - Reference table loader
//! - [`resolver`] - Playlist link parsing
//! - [`matcher`] - Track to feature record matching
//! - [`export`] - CSV document rendering
//! - [`pipeline`] - One export, end to end

// Core modules
pub mod error;
pub mod models;

// Steps
pub mod reference;
pub mod resolver;
pub mod matcher;
pub mod export;

// Orchestration
pub mod pipeline;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{
    ErrorField,
    ExportError,
    ExportResult,
    FetchError,
    ReferenceError,
    ReferenceResult,
};

pub use models::{
    Artist,
    FeatureRecord,
    Playlist,
    PlaylistTrack,
};

pub use reference::ReferenceTable;

pub use resolver::{parse_playlist_id, PLAYLIST_URL_PREFIX};

pub use matcher::{find_features, match_tracks, MatchReport, MatchResult};

pub use export::{render_document, CsvDocument, RowStyle, FEATURE_COLUMNS, HEADER};

pub use pipeline::{build_export, export_playlist, PlaylistExport, PlaylistSource};
