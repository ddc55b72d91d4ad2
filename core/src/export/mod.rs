//! CSV document rendering.
//!
//! # Format
//!
//! ```text
//! description,acousticness,danceability,...,valence      <- fixed header
//! <playlist name>, 0.14, 0.727, ..., 0.916               <- one row per matched track
//! ```
//!
//! The first column is the playlist name on every row, not the track name.
//! The header is always the same literal, whatever matched.
//!
//! Rows come in two styles, see [`RowStyle`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ExportResult;
use crate::models::FeatureRecord;

/// The document's first line.
pub const HEADER: &str = "description,acousticness,danceability,energy,instrumentalness,key,liveness,loudness,mode,speechiness,tempo,time_signature,valence";

/// Reference columns copied into each row, after the description.
pub const FEATURE_COLUMNS: [&str; 12] = [
    "acousticness",
    "danceability",
    "energy",
    "instrumentalness",
    "key",
    "liveness",
    "loudness",
    "mode",
    "speechiness",
    "tempo",
    "time_signature",
    "valence",
];

/// How data rows are delimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStyle {
    /// Fields joined by `", "` with no quoting. The header keeps bare commas.
    /// This is what existing consumers of the tool's files expect.
    #[default]
    Legacy,
    /// Fields joined by `,` with RFC 4180 quoting, same as the header.
    Normalized,
}

/// Rendered CSV document, one entry per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    lines: Vec<String>,
}

impl CsvDocument {
    fn with_header() -> Self {
        Self {
            lines: vec![HEADER.to_string()],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of data rows (lines after the header).
    pub fn row_count(&self) -> usize {
        self.lines.len() - 1
    }

    /// Size of the text as produced by `to_string()`.
    pub fn byte_len(&self) -> usize {
        self.lines.iter().map(String::len).sum::<usize>() + self.lines.len() - 1
    }
}

impl fmt::Display for CsvDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Render matched records under the fixed header.
///
/// `description` is written as the first field of every row. Feature values
/// missing from a record render as empty fields.
///
/// # Example
/// ```
/// use tunestats_core::{render_document, FeatureRecord, RowStyle, HEADER};
///
/// let record: FeatureRecord = [("tempo", "120")].into_iter().collect();
/// let doc = render_document("Mix", &[&record], RowStyle::Legacy).unwrap();
///
/// assert_eq!(doc.lines()[0], HEADER);
/// assert_eq!(doc.lines()[1], "Mix, , , , , , , , , , 120, , ");
/// ```
pub fn render_document(
    description: &str,
    records: &[&FeatureRecord],
    style: RowStyle,
) -> ExportResult<CsvDocument> {
    let mut document = CsvDocument::with_header();

    for record in records {
        let fields = row_fields(description, record);
        let line = match style {
            RowStyle::Legacy => fields.join(", "),
            RowStyle::Normalized => quoted_row(&fields)?,
        };
        document.lines.push(line);
    }

    Ok(document)
}

fn row_fields<'a>(description: &'a str, record: &'a FeatureRecord) -> Vec<&'a str> {
    std::iter::once(description)
        .chain(FEATURE_COLUMNS.iter().map(|col| record.get(col).unwrap_or("")))
        .collect()
}

fn quoted_row(fields: &[&str]) -> ExportResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let line = String::from_utf8_lossy(&bytes);

    Ok(line.trim_end_matches('\n').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(track_id: &str) -> FeatureRecord {
        let mut record: FeatureRecord = FEATURE_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, col)| (*col, format!("{}", i)))
            .collect();
        record.insert("track_id", track_id);
        record
    }

    #[test]
    fn test_header_has_thirteen_columns() {
        assert_eq!(HEADER.split(',').count(), 13);
        assert_eq!(&HEADER.split(',').skip(1).collect::<Vec<_>>(), &FEATURE_COLUMNS);
    }

    #[test]
    fn test_empty_document_is_header_only() {
        let doc = render_document("Test", &[], RowStyle::Legacy).unwrap();
        assert_eq!(doc.lines().len(), 1);
        assert_eq!(doc.row_count(), 0);
        assert_eq!(doc.to_string(), HEADER);
    }

    #[test]
    fn test_legacy_row_uses_comma_space() {
        let rec = record("a");
        let doc = render_document("Test", &[&rec], RowStyle::Legacy).unwrap();

        assert_eq!(doc.lines()[1], "Test, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11");
        assert_eq!(doc.to_string(), format!("{}\nTest, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11", HEADER));
    }

    #[test]
    fn test_description_repeated_on_every_row() {
        let a = record("a");
        let b = record("b");
        let doc = render_document("Chill", &[&a, &b], RowStyle::Legacy).unwrap();

        assert_eq!(doc.row_count(), 2);
        for line in &doc.lines()[1..] {
            assert!(line.starts_with("Chill, "));
            assert_eq!(line.split(", ").count(), 13);
        }
    }

    #[test]
    fn test_legacy_does_not_quote() {
        let rec = record("a");
        let doc = render_document("Rock, Pop", &[&rec], RowStyle::Legacy).unwrap();
        assert!(doc.lines()[1].starts_with("Rock, Pop, 0, "));
    }

    #[test]
    fn test_normalized_row_quotes() {
        let rec = record("a");
        let doc = render_document("Rock, \"Pop\"", &[&rec], RowStyle::Normalized).unwrap();

        assert_eq!(doc.lines()[0], HEADER);
        assert_eq!(doc.lines()[1], "\"Rock, \"\"Pop\"\"\",0,1,2,3,4,5,6,7,8,9,10,11");
    }

    #[test]
    fn test_missing_feature_renders_empty() {
        let rec: FeatureRecord = [("energy", "0.9")].into_iter().collect();
        let doc = render_document("X", &[&rec], RowStyle::Normalized).unwrap();
        assert_eq!(doc.lines()[1], "X,,,0.9,,,,,,,,,");
    }

    #[test]
    fn test_byte_len_matches_text() {
        let a = record("a");
        let doc = render_document("Test", &[&a, &a], RowStyle::Legacy).unwrap();
        assert_eq!(doc.byte_len(), doc.to_string().len());
    }
}
