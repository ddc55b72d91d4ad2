//! Application configuration.
//!
//! The page is served next to its reference table, so paths are relative
//! to the document.

/// Reference table of audio features, fetched once at startup.
pub const REFERENCE_TABLE_PATH: &str = "scripts/features.csv";

/// Spotify Web API base URL.
pub const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;

/// MIME type of downloaded documents.
pub const CSV_MIME_TYPE: &str = "text/csv";
