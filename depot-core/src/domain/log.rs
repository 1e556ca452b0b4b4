//! Log domain types

use serde::{Deserialize, Serialize};

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

/// One element of a run's log
///
/// Run logs are stored as a JSON array whose elements are either plain lines
/// (`"[INFO] Loaded to Data Warehouse"`) or structured [`LogEntry`] objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunLogEntry {
    Line(String),
    Entry(LogEntry),
}

impl From<&str> for RunLogEntry {
    fn from(line: &str) -> Self {
        RunLogEntry::Line(line.to_string())
    }
}

impl From<String> for RunLogEntry {
    fn from(line: String) -> Self {
        RunLogEntry::Line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_log_accepts_lines_and_objects() {
        let raw = r#"[
            "[INFO] Sync started",
            {"timestamp": "2026-01-01T00:00:00Z", "level": "Error", "message": "boom"}
        ]"#;

        let logs: Vec<RunLogEntry> = serde_json::from_str(raw).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0], RunLogEntry::from("[INFO] Sync started"));
        match &logs[1] {
            RunLogEntry::Entry(entry) => {
                assert_eq!(entry.level, LogLevel::Error);
                assert_eq!(entry.message, "boom");
            }
            other => panic!("expected structured entry, got {other:?}"),
        }
    }

    #[test]
    fn test_line_serializes_as_bare_string() {
        let json = serde_json::to_value(RunLogEntry::from("[FATAL] Pipeline aborted")).unwrap();
        assert_eq!(json, serde_json::json!("[FATAL] Pipeline aborted"));
    }
}
