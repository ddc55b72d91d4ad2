//! HTTP API module.
//!
//! Serves the browser app and exposes the export operation over HTTP.

pub mod server;
pub mod types;
pub mod logs;

pub use server::{router, start_server, AppState, ServerOptions, REFERENCE_TABLE_ROUTE};
pub use types::*;
pub use logs::*;
