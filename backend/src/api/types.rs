//! REST API types for frontend integration.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tunestats_core::{ErrorField, ExportError, RowStyle};

/// Body of `POST /api/export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Spotify playlist link
    pub link: String,

    /// Bearer token for the Web API
    pub access_token: String,

    /// Row style, `legacy` when omitted
    #[serde(default)]
    pub style: RowStyle,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Rows in the loaded reference table
    pub reference_rows: usize,
}

/// Wire name of the field an error belongs to.
pub fn field_name(field: ErrorField) -> &'static str {
    match field {
        ErrorField::Link => "link",
        ErrorField::AccessToken => "accessToken",
    }
}

/// Create an error response. `field` is `null` when no input is at fault.
pub fn error_response(error: &ExportError) -> Value {
    json!({
        "status": "error",
        "field": error.field().map(field_name),
        "error": error.to_string(),
    })
}
