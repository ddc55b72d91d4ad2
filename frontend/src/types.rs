//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Log Types** - Status log shown under the form
//! - **Form Types** - Inline field errors
//! - **Error Types** - Frontend error handling

use std::fmt;
use tunestats_core::{ErrorField, ExportError};

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level.
#[derive(Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// Informational message
    Info,
    /// Success/completion message
    Success,
    /// Error message
    Error,
    /// Warning message
    Warning,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Error => "log-error",
            LogLevel::Warning => "log-warning",
        }
    }
}

/// A single status log entry.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    /// Severity level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Inline errors of the export form, one slot per input plus one for
/// failures no input is responsible for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors {
    pub link: Option<String>,
    pub access_token: Option<String>,
    pub general: Option<String>,
}

impl FieldErrors {
    /// Place an export failure on the field it belongs to.
    pub fn from_error(error: &ExportError) -> Self {
        let message = Some(error.to_string());
        match error.field() {
            Some(ErrorField::Link) => Self {
                link: message,
                ..Self::default()
            },
            Some(ErrorField::AccessToken) => Self {
                access_token: message,
                ..Self::default()
            },
            None => Self {
                general: message,
                ..Self::default()
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.link.is_none() && self.access_token.is_none() && self.general.is_none()
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug)]
pub enum AppError {
    /// The browser refused to build or trigger the download.
    Download(String),
    /// A DOM object the page relies on is missing.
    Dom(&'static str),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Download(msg) => write!(f, "Download error: {}", msg),
            AppError::Dom(what) => write!(f, "No {} available", what),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
