//! Reference table of precomputed audio features.
//!
//! The table is a comma-separated resource with a header row. Each data row
//! becomes a [`FeatureRecord`] keyed by header name, in source order. Values
//! stay text; nothing is coerced or validated.
//!
//! The table is built once at startup and passed by reference into every
//! export. It is never mutated afterwards.

use log::{debug, error};

use crate::error::{ReferenceError, ReferenceResult};
use crate::models::FeatureRecord;

/// Loaded reference table.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    headers: Vec<String>,
    records: Vec<FeatureRecord>,
}

impl ReferenceTable {
    /// A table with no rows. Every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from already parsed rows.
    pub fn from_records(headers: Vec<String>, records: Vec<FeatureRecord>) -> Self {
        Self { headers, records }
    }

    /// Parse CSV text into a table.
    ///
    /// Every non-blank line after the header is one record. Rows shorter
    /// than the header lack the missing keys; extra fields are ignored.
    /// Fully quoted fields may contain commas, but a quote never spans lines.
    ///
    /// # Example
    /// ```
    /// use tunestats_core::ReferenceTable;
    ///
    /// let table = ReferenceTable::parse("track_id,tempo\nabc,120.0\ndef").unwrap();
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.records()[0].get("tempo"), Some("120.0"));
    /// assert_eq!(table.records()[1].get("tempo"), None);
    /// ```
    pub fn parse(content: &str) -> ReferenceResult<Self> {
        let content = content.trim_start_matches('\u{feff}');
        let mut lines = content.lines().filter(|line| !line.trim().is_empty());

        let header_line = lines.next().ok_or(ReferenceError::Empty)?;
        let headers = split_line(header_line)?;
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ReferenceError::Empty);
        }

        let mut records = Vec::new();
        for line in lines {
            let record: FeatureRecord = headers
                .iter()
                .zip(split_line(line)?)
                .map(|(header, value)| (header.as_str(), value))
                .collect();
            records.push(record);
        }

        debug!("Loaded {} reference rows ({} columns)", records.len(), headers.len());

        Ok(Self { headers, records })
    }

    /// Parse CSV text, falling back to an empty table on failure.
    ///
    /// The failure is logged and otherwise swallowed: exports still run and
    /// simply match nothing.
    pub fn load_or_empty(content: &str) -> Self {
        Self::parse(content).unwrap_or_else(|e| {
            error!("Error: {}", e);
            Self::empty()
        })
    }

    /// Unwrap a load result the same way [`Self::load_or_empty`] does.
    pub fn or_empty(result: ReferenceResult<Self>) -> Self {
        result.unwrap_or_else(|e| {
            error!("Error: {}", e);
            Self::empty()
        })
    }

    /// Header column names, in resource order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Rows, in resource order.
    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReferenceTable {
    type Item = &'a FeatureRecord;
    type IntoIter = std::slice::Iter<'a, FeatureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Split one line into fields.
///
/// Quoting is honoured only when every quoted field is closed and ends at a
/// comma or the end of the line. Otherwise quotes are kept as literal text.
fn split_line(line: &str) -> ReferenceResult<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(is_well_quoted(line))
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(row) => Ok(row?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

fn is_well_quoted(line: &str) -> bool {
    let mut chars = line.chars().peekable();
    let mut at_field_start = true;

    while let Some(c) = chars.next() {
        match c {
            '"' if at_field_start => {
                // Closing quote, skipping doubled `""`.
                loop {
                    match chars.next() {
                        None => return false,
                        Some('"') if chars.peek() == Some(&'"') => {
                            chars.next();
                        }
                        Some('"') => break,
                        Some(_) => {}
                    }
                }
                match chars.next() {
                    None => return true,
                    Some(',') => at_field_start = true,
                    Some(_) => return false,
                }
            }
            ',' => at_field_start = true,
            _ => at_field_start = false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEATURES: &str = "\
track_id,track_name,artist_name,acousticness,danceability,energy,instrumentalness,key,liveness,loudness,mode,speechiness,tempo,time_signature,valence
4uLU6hMCjMI75M1A2tKUQC,Never Gonna Give You Up,Rick Astley,0.14,0.727,0.939,0,8,0.151,-11.855,1,0.0369,113.309,4,0.916
7GhIk7Il098yCjg4BQjzvb,Never Let Me Go,Florence + The Machine,0.4,0.35,0.6,0.0001,2,0.1,-6.2,0,0.03,140.0,4,0.2
";

    #[test]
    fn test_rows_have_every_header_key() {
        let table = ReferenceTable::parse(FEATURES).unwrap();

        assert_eq!(table.headers().len(), 15);
        assert_eq!(table.len(), 2);
        for record in &table {
            assert_eq!(record.len(), 15);
            for header in table.headers() {
                assert!(record.contains(header), "missing {}", header);
            }
        }
    }

    #[test]
    fn test_source_order_preserved() {
        let table = ReferenceTable::parse(FEATURES).unwrap();
        assert_eq!(table.records()[0].track_name(), Some("Never Gonna Give You Up"));
        assert_eq!(table.records()[1].artist_name(), Some("Florence + The Machine"));
    }

    #[test]
    fn test_values_stay_text() {
        let table = ReferenceTable::parse(FEATURES).unwrap();
        assert_eq!(table.records()[0].get("loudness"), Some("-11.855"));
        assert_eq!(table.records()[0].get("instrumentalness"), Some("0"));
    }

    #[test]
    fn test_short_row_lacks_trailing_keys() {
        let table = ReferenceTable::parse("a,b,c\n1,2").unwrap();
        let record = &table.records()[0];

        assert_eq!(record.get("a"), Some("1"));
        assert_eq!(record.get("b"), Some("2"));
        assert!(!record.contains("c"));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let table = ReferenceTable::parse("a,b\n1,2,3,4").unwrap();
        assert_eq!(table.records()[0].len(), 2);
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let table = ReferenceTable::parse("a,b\r\n1,2\r\n\r\n3,4\r\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.headers(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.records()[1].get("b"), Some("4"));
    }

    #[test]
    fn test_quoted_track_name_with_comma() {
        let table = ReferenceTable::parse("track_id,track_name,artist_name\nx,\"Hello, Goodbye\",The Beatles").unwrap();
        let record = &table.records()[0];

        assert_eq!(record.track_name(), Some("Hello, Goodbye"));
        assert_eq!(record.artist_name(), Some("The Beatles"));
    }

    #[test]
    fn test_unclosed_quote_stays_on_its_line() {
        let table = ReferenceTable::parse("track_id,track_name,artist_name\nx,\"Oops,A\ny,Song,B\n").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].track_name(), Some("\"Oops"));
        assert_eq!(table.records()[0].artist_name(), Some("A"));
        assert_eq!(table.records()[1].track_id(), Some("y"));
        assert_eq!(table.records()[1].track_name(), Some("Song"));
    }

    #[test]
    fn test_partly_quoted_field_kept_verbatim() {
        let table = ReferenceTable::parse(
            "track_id,track_name,artist_name\nh1,\"Heroes\" - 2017 Remaster,David Bowie",
        )
        .unwrap();
        let record = &table.records()[0];

        assert_eq!(record.track_name(), Some("\"Heroes\" - 2017 Remaster"));
        assert_eq!(record.artist_name(), Some("David Bowie"));
    }

    #[test]
    fn test_doubled_quotes_inside_quoted_field() {
        let table = ReferenceTable::parse("track_id,track_name\nq,\"Say \"\"Hi\"\", Bye\"").unwrap();
        assert_eq!(table.records()[0].track_name(), Some("Say \"Hi\", Bye"));
    }

    #[test]
    fn test_all_empty_fields_row_is_kept() {
        let table = ReferenceTable::parse("a,b,c\n1,2,3\n,,\n4,5,6").unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.records()[1].get("a"), Some(""));
        assert_eq!(table.records()[1].len(), 3);
        assert_eq!(table.records()[2].get("a"), Some("4"));
    }

    #[test]
    fn test_empty_resource_is_error() {
        assert!(matches!(ReferenceTable::parse(""), Err(ReferenceError::Empty)));
        assert!(matches!(ReferenceTable::parse("\n\n"), Err(ReferenceError::Empty)));
    }

    #[test]
    fn test_load_or_empty_degrades() {
        let table = ReferenceTable::load_or_empty("");
        assert!(table.is_empty());
        assert!(table.headers().is_empty());
    }

    #[test]
    fn test_header_only() {
        let table = ReferenceTable::parse("track_id,track_name\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 2);
    }
}
