//! Track to feature record matching.
//!
//! A track matches the first reference row, in table order, that either
//! has the same `track_id`, or has the same `track_name` and an
//! `artist_name` equal to one of the track's artists. Comparison is exact
//! string equality: no case folding, trimming or punctuation handling.
//!
//! Lookups are a linear scan of the table per track.

use log::debug;

use crate::models::{FeatureRecord, PlaylistTrack};
use crate::reference::ReferenceTable;

/// Match statistics for one playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    /// Tracks in the playlist.
    pub total: usize,
    /// Tracks with a reference row.
    pub matched: usize,
    /// Names of tracks without a reference row, in playlist order.
    pub unmatched: Vec<String>,
}

impl MatchReport {
    /// Fraction of tracks matched, `0.0` for an empty playlist.
    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }
}

/// Matched rows in playlist order plus statistics.
#[derive(Debug, Clone)]
pub struct MatchResult<'t> {
    pub records: Vec<&'t FeatureRecord>,
    pub report: MatchReport,
}

/// Find the reference row for one track.
pub fn find_features<'t>(table: &'t ReferenceTable, track: &PlaylistTrack) -> Option<&'t FeatureRecord> {
    table.iter().find(|record| is_match(record, track))
}

fn is_match(record: &FeatureRecord, track: &PlaylistTrack) -> bool {
    // An id-less local file must not pair with a row that has a blank id.
    let same_id = !track.id.is_empty() && record.track_id() == Some(track.id.as_str());
    if same_id {
        return true;
    }

    match (record.track_name(), record.artist_name()) {
        (Some(name), Some(artist)) => name == track.name && track.has_artist(artist),
        _ => false,
    }
}

/// Match every track of a playlist. Unmatched tracks are left out of
/// `records` and listed in the report.
pub fn match_tracks<'t>(table: &'t ReferenceTable, tracks: &[PlaylistTrack]) -> MatchResult<'t> {
    let mut records = Vec::with_capacity(tracks.len());
    let mut unmatched = Vec::new();

    for track in tracks {
        match find_features(table, track) {
            Some(record) => records.push(record),
            None => {
                debug!("No features for '{}' ({})", track.name, track.id);
                unmatched.push(track.name.clone());
            }
        }
    }

    let report = MatchReport {
        total: tracks.len(),
        matched: records.len(),
        unmatched,
    };

    MatchResult { records, report }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ReferenceTable {
        ReferenceTable::parse(
            "track_id,track_name,artist_name,tempo\n\
             id-1,Song A,Artist A,100\n\
             id-2,Song B,Artist B,110\n\
             id-3,Song B,Artist B,120\n\
             ,Local Song,Local Artist,130\n",
        )
        .unwrap()
    }

    #[test]
    fn test_id_match_ignores_name_and_artist() {
        let table = table();
        let track = PlaylistTrack::new("id-1", "Completely Different", &["Nobody"]);

        let record = find_features(&table, &track).unwrap();
        assert_eq!(record.get("tempo"), Some("100"));
    }

    #[test]
    fn test_name_and_artist_fallback() {
        let table = table();
        let track = PlaylistTrack::new("unknown", "Song A", &["Feat", "Artist A"]);

        let record = find_features(&table, &track).unwrap();
        assert_eq!(record.track_id(), Some("id-1"));
    }

    #[test]
    fn test_name_without_artist_misses() {
        let table = table();
        let track = PlaylistTrack::new("unknown", "Song A", &["Someone Else"]);
        assert!(find_features(&table, &track).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let table = table();
        let track = PlaylistTrack::new("unknown", "Song B", &["Artist B"]);

        let record = find_features(&table, &track).unwrap();
        assert_eq!(record.get("tempo"), Some("110"));
    }

    #[test]
    fn test_exact_comparison() {
        let table = table();
        let track = PlaylistTrack::new("ID-1", "song a", &["artist a"]);
        assert!(find_features(&table, &track).is_none());
    }

    #[test]
    fn test_empty_id_does_not_match_blank_row_id() {
        let table = table();
        let track = PlaylistTrack::new("", "Something", &["Anyone"]);
        assert!(find_features(&table, &track).is_none());

        let local = PlaylistTrack::new("", "Local Song", &["Local Artist"]);
        assert_eq!(find_features(&table, &local).unwrap().get("tempo"), Some("130"));
    }

    #[test]
    fn test_match_tracks_report() {
        let table = table();
        let tracks = vec![
            PlaylistTrack::new("id-2", "Song B", &["Artist B"]),
            PlaylistTrack::new("nope", "Missing", &["Ghost"]),
            PlaylistTrack::new("id-1", "Song A", &["Artist A"]),
        ];

        let result = match_tracks(&table, &tracks);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].track_id(), Some("id-2"));
        assert_eq!(result.records[1].track_id(), Some("id-1"));
        assert_eq!(result.report.total, 3);
        assert_eq!(result.report.matched, 2);
        assert_eq!(result.report.unmatched, vec!["Missing".to_string()]);
        assert!((result.report.match_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_table_always_misses() {
        let table = ReferenceTable::empty();
        let tracks = vec![PlaylistTrack::new("id-1", "Song A", &["Artist A"])];

        let result = match_tracks(&table, &tracks);
        assert!(result.records.is_empty());
        assert_eq!(result.report.matched, 0);
        assert_eq!(result.report.match_rate(), 0.0);
    }
}
