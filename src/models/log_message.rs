use chrono::{Local, NaiveDateTime};
use std::fmt;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

/// A human-readable log line stamped with the moment it was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    text: String,
    timestamp: String,
}

impl LogMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self::captured_at(text, Local::now().naive_local())
    }

    pub fn captured_at(text: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            text: text.into(),
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.text)
    }
}
