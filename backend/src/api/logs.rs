//! Real-time export log streaming via Server-Sent Events (SSE).
//!
//! Export handlers report progress through the helpers here. Each entry is
//! printed to stdout and broadcast to every client of `/api/logs`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Log level for frontend display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Export request this entry belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

impl LogEntry {
    fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            request_id: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    pub fn for_request(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

/// Global log broadcaster
pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

/// Broadcasts log entries to all connected SSE clients
pub struct LogBroadcaster {
    sender: broadcast::Sender<LogEntry>,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Print an entry and send it to all subscribers
    pub fn log(&self, entry: LogEntry) {
        let prefix = match entry.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        match entry.request_id {
            Some(ref id) => println!("{} [{}] {}", prefix, short_id(id), entry.message),
            None => println!("{} {}", prefix, entry.message),
        }

        // No receivers is fine
        let _ = self.sender.send(entry);
    }

    /// Get a receiver for SSE streaming
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Per-request logger tagging every entry with the request id.
#[derive(Debug, Clone)]
pub struct RequestLog {
    request_id: String,
}

impl RequestLog {
    pub fn new() -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn info(&self, msg: impl Into<String>) {
        LOG_BROADCASTER.log(LogEntry::info(msg).for_request(&self.request_id));
    }

    pub fn success(&self, msg: impl Into<String>) {
        LOG_BROADCASTER.log(LogEntry::success(msg).for_request(&self.request_id));
    }

    pub fn warning(&self, msg: impl Into<String>) {
        LOG_BROADCASTER.log(LogEntry::warning(msg).for_request(&self.request_id));
    }

    pub fn error(&self, msg: impl Into<String>) {
        LOG_BROADCASTER.log(LogEntry::error(msg).for_request(&self.request_id));
    }
}

impl Default for RequestLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Log a server-level entry with no request id.
pub fn log_info(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::info(msg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serialization() {
        let entry = LogEntry::success("Matched 2 of 3 tracks").for_request("abc");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["level"], "success");
        assert_eq!(json["message"], "Matched 2 of 3 tracks");
        assert_eq!(json["requestId"], "abc");
        assert!(json["timestamp"].as_str().is_some());
    }

    #[test]
    fn test_untagged_entry_omits_request_id() {
        let json = serde_json::to_value(LogEntry::info("hello")).unwrap();
        assert!(json.get("requestId").is_none());
    }

    #[tokio::test]
    async fn test_subscribers_receive_entries() {
        let broadcaster = LogBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.log(LogEntry::warning("careful"));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.level, LogLevel::Warning);
        assert_eq!(received.message, "careful");
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestLog::new().request_id(), RequestLog::new().request_id());
    }
}
