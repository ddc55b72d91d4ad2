//! One export, end to end: link → id → playlist → matches → CSV.
//!
//! The playlist fetch is the only I/O and sits behind [`PlaylistSource`].
//! An invalid link fails before the source is touched, and nothing is
//! rendered unless the fetch succeeded.

use log::{debug, info};

use crate::error::{ExportError, ExportResult, FetchError};
use crate::export::{render_document, CsvDocument, RowStyle};
use crate::matcher::{match_tracks, MatchReport};
use crate::models::Playlist;
use crate::reference::ReferenceTable;
use crate::resolver::parse_playlist_id;

/// Something that can fetch a playlist by id with a bearer token.
#[allow(async_fn_in_trait)]
pub trait PlaylistSource {
    async fn fetch_playlist(&self, playlist_id: &str, access_token: &str) -> Result<Playlist, FetchError>;
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct PlaylistExport {
    pub playlist_id: String,
    pub playlist_name: String,
    pub document: CsvDocument,
    pub report: MatchReport,
}

impl PlaylistExport {
    /// Download name: the playlist's display name plus `.csv`.
    pub fn filename(&self) -> String {
        format!("{}.csv", self.playlist_name)
    }
}

/// Run a full export for `link`.
///
/// # Errors
/// - [`ExportError::InvalidLink`] if `link` is not a playlist URL. No fetch is made.
/// - [`ExportError::InvalidAccessToken`] for any fetch failure.
pub async fn export_playlist<S: PlaylistSource>(
    source: &S,
    table: &ReferenceTable,
    link: &str,
    access_token: &str,
    style: RowStyle,
) -> ExportResult<PlaylistExport> {
    let playlist_id = parse_playlist_id(link).ok_or(ExportError::InvalidLink)?;

    debug!("Fetching playlist {}", playlist_id);
    let playlist = source.fetch_playlist(playlist_id, access_token).await?;

    build_export(playlist_id, &playlist, table, style)
}

/// Match and render an already fetched playlist.
pub fn build_export(
    playlist_id: &str,
    playlist: &Playlist,
    table: &ReferenceTable,
    style: RowStyle,
) -> ExportResult<PlaylistExport> {
    let matches = match_tracks(table, &playlist.tracks);
    let document = render_document(&playlist.name, &matches.records, style)?;

    info!(
        "Playlist '{}': matched {} of {} tracks",
        playlist.name, matches.report.matched, matches.report.total
    );

    Ok(PlaylistExport {
        playlist_id: playlist_id.to_string(),
        playlist_name: playlist.name.clone(),
        document,
        report: matches.report,
    })
}
