//! Domain models.
//!
//! - [`FeatureRecord`] - One row of the reference table
//! - [`Playlist`] - A fetched playlist (name + tracks)
//! - [`PlaylistTrack`] - A track as returned by the Web API
//! - [`Artist`] - Track artist

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::FetchError;

/// Reference table column holding the Spotify track id.
pub const TRACK_ID: &str = "track_id";

/// Reference table column holding the track title.
pub const TRACK_NAME: &str = "track_name";

/// Reference table column holding the (single) artist name.
pub const ARTIST_NAME: &str = "artist_name";

// =============================================================================
// Feature Records
// =============================================================================

/// One reference table row, keyed by header name.
///
/// Values are kept as text exactly as they appear in the resource. A row
/// shorter than the header simply lacks the trailing keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureRecord {
    fields: HashMap<String, String>,
}

impl FeatureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `column`, if the row has one.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn track_id(&self) -> Option<&str> {
        self.get(TRACK_ID)
    }

    pub fn track_name(&self) -> Option<&str> {
        self.get(TRACK_NAME)
    }

    pub fn artist_name(&self) -> Option<&str> {
        self.get(ARTIST_NAME)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Number of columns present in this row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FeatureRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// =============================================================================
// Playlist Types
// =============================================================================

/// Track artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub name: String,
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A playlist track.
///
/// Local files have no Spotify id; they carry an empty `id` and can only
/// match by name and artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

impl PlaylistTrack {
    pub fn new(id: impl Into<String>, name: impl Into<String>, artists: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artists: artists.iter().map(|a| Artist::new(*a)).collect(),
        }
    }

    /// Whether any of the track's artists is named `name`.
    pub fn has_artist(&self, name: &str) -> bool {
        self.artists.iter().any(|a| a.name == name)
    }
}

/// A fetched playlist.
///
/// Deserializes from the Web API playlist object:
/// `{"name": ..., "tracks": {"items": [{"track": {...}}]}}`.
/// Items whose `track` is `null` (removed or unavailable) are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawPlaylist")]
pub struct Playlist {
    pub name: String,
    pub tracks: Vec<PlaylistTrack>,
}

impl Playlist {
    pub fn new(name: impl Into<String>, tracks: Vec<PlaylistTrack>) -> Self {
        Self {
            name: name.into(),
            tracks,
        }
    }

    /// Parse a Web API playlist response body.
    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        serde_json::from_str(json).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[derive(Deserialize)]
struct RawPlaylist {
    name: String,
    tracks: RawTracks,
}

#[derive(Deserialize)]
struct RawTracks {
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Deserialize)]
struct RawItem {
    track: Option<PlaylistTrack>,
}

impl From<RawPlaylist> for Playlist {
    fn from(raw: RawPlaylist) -> Self {
        Self {
            name: raw.name,
            tracks: raw.tracks.items.into_iter().filter_map(|i| i.track).collect(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_from_api_response() {
        let json = r#"{
            "id": "37i9dQZF1",
            "name": "Road Trip",
            "tracks": {
                "href": "https://api.spotify.com/v1/playlists/37i9dQZF1/tracks",
                "items": [
                    {"added_at": "2024-01-01T00:00:00Z", "track": {
                        "id": "4uLU6hMCjMI75M1A2tKUQC",
                        "name": "Never Gonna Give You Up",
                        "artists": [{"id": "0gxyHStUsqpMadRV0Di1Qt", "name": "Rick Astley"}]
                    }},
                    {"track": null},
                    {"track": {"id": null, "name": "demo.mp3", "artists": []}}
                ],
                "total": 3
            }
        }"#;

        let playlist = Playlist::from_json(json).unwrap();
        assert_eq!(playlist.name, "Road Trip");
        assert_eq!(playlist.tracks.len(), 2);
        assert_eq!(playlist.tracks[0].id, "4uLU6hMCjMI75M1A2tKUQC");
        assert!(playlist.tracks[0].has_artist("Rick Astley"));
        assert_eq!(playlist.tracks[1].id, "");
        assert_eq!(playlist.tracks[1].name, "demo.mp3");
    }

    #[test]
    fn test_playlist_missing_tracks_is_decode_error() {
        let err = Playlist::from_json(r#"{"name": "x"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_feature_record_accessors() {
        let record: FeatureRecord = [
            ("track_id", "abc"),
            ("track_name", "Song"),
            ("artist_name", "Band"),
        ]
        .into_iter()
        .collect();

        assert_eq!(record.track_id(), Some("abc"));
        assert_eq!(record.track_name(), Some("Song"));
        assert_eq!(record.artist_name(), Some("Band"));
        assert_eq!(record.get("tempo"), None);
        assert_eq!(record.len(), 3);
    }
}
