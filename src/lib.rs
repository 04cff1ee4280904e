//! # Logging Tour
//!
//! A small leveled-logging library and a walkthrough binary that exercises it.
//!
//! ## Features
//!
//! - **Five levels**: `DEBUG < INFO < WARNING < ERROR < CRITICAL`
//! - **Named loggers**: a dot-separated hierarchy owned by a [`LoggingContext`]
//! - **Handlers**: console streams and files, each with its own level and
//!   `%(field)s` template
//! - **Error records**: failures and their backtraces attached to entries
//!
//! ```
//! use logging_tour::prelude::*;
//!
//! let ctx = LoggingContext::new();
//! ctx.basic_config(
//!     BasicConfig::new()
//!         .level(LogLevel::Debug)
//!         .format("%(levelname)s - %(message)s"),
//! )?;
//!
//! let logger = ctx.get_logger("app");
//! logger.info("ready");
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod handlers;
pub mod macros;
pub mod walkthrough;

pub mod prelude {
    pub use crate::core::{
        shared, BasicConfig, ErrorRecord, Formatter, Handler, LogEntry, LogLevel, Logger,
        LoggerError, LoggerMetrics, LoggingContext, Result, SharedHandler, TimestampFormat,
    };
    pub use crate::handlers::{ConsoleStream, FileHandler, FileMode, StreamHandler};
}

pub use crate::core::{
    shared, BasicConfig, ErrorRecord, Formatter, Handler, Location, LogEntry, LogLevel, Logger,
    LoggerError, LoggerMetrics, LoggingContext, Result, SharedHandler, TimestampFormat,
    DEFAULT_FORMAT, ROOT_LOGGER_NAME,
};
pub use crate::handlers::{ConsoleStream, FileHandler, FileMode, StreamHandler};
