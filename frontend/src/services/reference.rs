//! HTTP service for the reference table.

use gloo_net::http::Request;
use tunestats_core::{ReferenceError, ReferenceResult, ReferenceTable};

/// Fetch and parse the reference table at `path`.
pub async fn fetch_reference_table(path: &str) -> ReferenceResult<ReferenceTable> {
    let response = Request::get(path)
        .send()
        .await
        .map_err(|e| ReferenceError::Http(e.to_string()))?;

    if !response.ok() {
        return Err(ReferenceError::Http(format!(
            "Failed to load CSV file (HTTP {})",
            response.status()
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ReferenceError::Http(e.to_string()))?;

    ReferenceTable::parse(&body)
}

/// Load the reference table, falling back to an empty one.
///
/// Exports still work against an empty table; they just match nothing.
pub async fn load_reference_table(path: &str) -> ReferenceTable {
    let table = ReferenceTable::or_empty(fetch_reference_table(path).await);
    log::info!("📚 Reference table: {} rows", table.len());
    table
}
