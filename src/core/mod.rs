//! Core logger types and traits

pub mod config;
pub mod context;
pub mod error;
pub mod error_record;
pub mod formatter;
pub mod handler;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use config::BasicConfig;
pub use context::LoggingContext;
pub use error::{LoggerError, Result};
pub use error_record::ErrorRecord;
pub use formatter::{Formatter, DEFAULT_FORMAT};
pub use handler::{shared, Handler, SharedHandler};
pub use log_entry::{Location, LogEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, ROOT_LOGGER_NAME};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
