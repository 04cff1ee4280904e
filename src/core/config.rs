//! Root logger configuration
//!
//! [`BasicConfig`] describes the one-shot setup applied by
//! [`LoggingContext::basic_config`](crate::LoggingContext::basic_config): the
//! root level, the template, and where the root handler writes.

use super::error::{LoggerError, Result};
use super::formatter::{Formatter, DEFAULT_FORMAT};
use super::handler::{shared, SharedHandler};
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use crate::handlers::{ConsoleStream, FileHandler, FileMode, StreamHandler};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// # Example
///
/// ```
/// use logging_tour::{BasicConfig, LogLevel};
///
/// let config = BasicConfig::new()
///     .level(LogLevel::Debug)
///     .format("%(levelname)s - %(message)s");
/// assert_eq!(config.format, "%(levelname)s - %(message)s");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    /// Root level; `None` leaves the root level unchanged
    pub level: Option<LogLevel>,
    pub format: String,
    pub datefmt: TimestampFormat,
    /// Write to this file instead of a console stream
    pub filename: Option<PathBuf>,
    pub filemode: FileMode,
    /// Console stream for the root handler; `None` means stderr. Cannot be
    /// combined with `filename`.
    pub stream: Option<ConsoleStream>,
    /// Replace existing root handlers instead of leaving them in place
    pub force: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: DEFAULT_FORMAT.to_string(),
            datefmt: TimestampFormat::default(),
            filename: None,
            filemode: FileMode::default(),
            stream: None,
            force: false,
        }
    }
}

impl BasicConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn datefmt(mut self, datefmt: TimestampFormat) -> Self {
        self.datefmt = datefmt;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn filemode(mut self, filemode: FileMode) -> Self {
        self.filemode = filemode;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stream(mut self, stream: ConsoleStream) -> Self {
        self.stream = Some(stream);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Build the formatter described by `format` and `datefmt`
    pub fn build_formatter(&self) -> Result<Formatter> {
        Ok(Formatter::new(self.format.as_str())?.with_timestamp_format(self.datefmt.clone()))
    }

    /// Build the root handler: a file handler when `filename` is set,
    /// otherwise a console handler on `stream`
    pub fn build_handler(&self) -> Result<SharedHandler> {
        let formatter = self.build_formatter()?;
        let handler = match (&self.filename, self.stream) {
            (Some(_), Some(_)) => {
                return Err(LoggerError::config(
                    "BasicConfig",
                    "'stream' and 'filename' should not be specified together",
                ));
            }
            (Some(path), None) => {
                shared(FileHandler::with_mode(path, self.filemode)?.with_formatter(formatter))
            }
            (None, stream) => shared(
                StreamHandler::console(stream.unwrap_or_default()).with_formatter(formatter),
            ),
        };
        Ok(handler)
    }
}
