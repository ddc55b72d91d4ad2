//! UI Components for the Tunestats application.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`ExportForm`] - Playlist link and token inputs with the download button
//! - [`LogsPanel`] - Status log of past exports

mod hero;
mod export_form;
mod footer;
mod logs;

pub use hero::*;
pub use export_form::*;
pub use footer::*;
pub use logs::*;
