//! Handler trait for log output destinations

use super::{error::Result, formatter::Formatter, log_entry::LogEntry, log_level::LogLevel};
use parking_lot::Mutex;
use std::sync::Arc;

/// A handler shared between every logger it is attached to.
///
/// Each handler has its own lock, so concurrent writers never interleave
/// within a single rendered entry.
pub type SharedHandler = Arc<Mutex<dyn Handler>>;

pub trait Handler: Send {
    /// Write one entry. Threshold checks have already been applied.
    fn emit(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Own minimum level; `None` accepts everything the logger lets through
    fn level(&self) -> Option<LogLevel>;
    fn set_level(&mut self, level: Option<LogLevel>);

    fn formatter(&self) -> &Formatter;
    fn set_formatter(&mut self, formatter: Formatter);

    /// Release the underlying resource. Further emits fail.
    fn close(&mut self) -> Result<()> {
        self.flush()
    }

    fn accepts(&self, level: LogLevel) -> bool {
        self.level().map_or(true, |min| level >= min)
    }
}

/// Wrap a handler for attachment to one or more loggers
pub fn shared<H: Handler + 'static>(handler: H) -> SharedHandler {
    Arc::new(Mutex::new(handler))
}
