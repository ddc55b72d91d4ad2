//! Reference table loading from disk, with encoding auto-detection.
//!
//! Feature tables exported from spreadsheets are not always UTF-8, so the
//! raw bytes go through charset detection before being handed to
//! [`ReferenceTable::parse`].

use log::warn;
use std::path::Path;
use tunestats_core::{ReferenceResult, ReferenceTable};

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string. Unknown encodings and invalid UTF-8 fall back
/// to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Read and parse a reference table file.
///
/// # Example
/// ```ignore
/// let table = load_reference_file("features.csv")?;
/// println!("{} rows, columns: {}", table.len(), table.headers().join(", "));
/// ```
pub fn load_reference_file<P: AsRef<Path>>(path: P) -> ReferenceResult<ReferenceTable> {
    let bytes = std::fs::read(path.as_ref())?;
    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding);

    ReferenceTable::parse(&content)
}

/// Load the reference table, degrading to an empty table on any failure.
///
/// With no path at all every export produces a header-only document, which
/// is logged as a warning.
pub fn load_reference_or_empty(path: Option<&Path>) -> ReferenceTable {
    match path {
        Some(p) => ReferenceTable::or_empty(load_reference_file(p)),
        None => {
            warn!("No reference table configured, exports will match nothing");
            ReferenceTable::empty()
        }
    }
}
