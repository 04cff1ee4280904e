//! Log entry structure

use super::error_record::ErrorRecord;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Call-site information captured by the logging macros
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub module_path: &'static str,
}

/// Expand to the [`Location`] of the macro call site
#[macro_export]
macro_rules! location {
    () => {
        $crate::Location {
            file: file!(),
            line: line!(),
            module_path: module_path!(),
        }
    };
}

/// A single log event, created per emission call and consumed by handlers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub logger_name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub module_path: Option<String>,
    pub thread_id: String,
    pub thread_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorRecord>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, logger_name: impl Into<String>, message: String) -> Self {
        Self {
            level,
            logger_name: logger_name.into(),
            message: Self::sanitize_message(&message),
            timestamp: Utc::now(),
            file: None,
            line: None,
            module_path: None,
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            error: None,
        }
    }

    pub fn with_location(mut self, file: &str, line: u32, module_path: &str) -> Self {
        self.file = Some(file.to_string());
        self.line = Some(line);
        self.module_path = Some(module_path.to_string());
        self
    }

    pub fn with_error(mut self, error: ErrorRecord) -> Self {
        self.error = Some(error);
        self
    }

    /// Thread name if the thread has one, otherwise its id
    pub fn thread_label(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }
}
