//! Structured telemetry records for prediction activity.
//!
//! Events append as JSON lines to a session log file when telemetry is
//! enabled; the `log` facade carries the human-readable copy.

use crate::errors::{ScreenError, ScreenResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

/// LogLevel classifies the severity of a telemetry event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// One structured record of runtime activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub trace_id: String,
    pub component: String,
    pub event_type: String,
    pub context: String,
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    pub fn new(component: &str, event_type: &str, context: impl Into<String>) -> Self {
        LogEvent {
            trace_id: Uuid::new_v4().to_string(),
            component: component.to_string(),
            event_type: event_type.to_string(),
            context: context.into(),
            level: LogLevel::Info,
            timestamp: Utc::now(),
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Append this event as one JSON line, creating parent directories
    /// on first write.
    pub fn write_to(&self, path: &Path) -> ScreenResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)
                    .map_err(|e| ScreenError::io(format!("create {}", parent.display()), e))?;
            }
        }
        let line = serde_json::to_string(self)
            .map_err(|e| ScreenError::serialization("log event", e))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ScreenError::io(format!("open {}", path.display()), e))?;
        writeln!(file, "{line}")
            .map_err(|e| ScreenError::io(format!("append {}", path.display()), e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_append_as_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("predictions.log");

        LogEvent::new("session", "prediction", "first")
            .write_to(&path)
            .unwrap();
        LogEvent::new("session", "prediction", "second")
            .with_level(LogLevel::Debug)
            .write_to(&path)
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: LogEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.event_type, "prediction");
        assert_eq!(first.level, LogLevel::Info);

        let second: LogEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.level, LogLevel::Debug);
    }

    #[test]
    fn level_ordering_supports_filtering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
