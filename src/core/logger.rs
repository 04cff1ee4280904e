//! Main logger implementation

use super::{
    error::Result,
    error_record::ErrorRecord,
    handler::SharedHandler,
    log_entry::{Location, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Name of the ancestor of every logger in a [`LoggingContext`](crate::LoggingContext)
pub const ROOT_LOGGER_NAME: &str = "root";

/// A named source of log entries.
///
/// An entry passes the logger if its level is at least the logger's
/// [effective level](Logger::effective_level). It is then handed to this
/// logger's handlers and, while `propagate` is set, to the handlers of each
/// ancestor in turn. Ancestor levels are not consulted during propagation;
/// each handler applies only its own level.
pub struct Logger {
    name: String,
    level: RwLock<Option<LogLevel>>,
    handlers: RwLock<Vec<SharedHandler>>,
    propagate: AtomicBool,
    parent: Option<Arc<Logger>>,
    /// Metrics for observability (emitted, filtered, failed, unhandled)
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger with no parent and no level of its own.
    ///
    /// Loggers obtained through
    /// [`LoggingContext::get_logger`](crate::LoggingContext::get_logger) are
    /// linked into the context's hierarchy instead.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_parent(name, None, None)
    }

    pub(crate) fn with_parent(
        name: impl Into<String>,
        parent: Option<Arc<Logger>>,
        level: Option<LogLevel>,
    ) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(level),
            handlers: RwLock::new(Vec::new()),
            propagate: AtomicBool::new(true),
            parent,
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<Logger>> {
        self.parent.as_ref()
    }

    /// The level set on this logger, if any
    pub fn level(&self) -> Option<LogLevel> {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = Some(level);
    }

    /// Drop this logger's own level so it defers to its ancestors again
    pub fn clear_level(&self) {
        *self.level.write() = None;
    }

    /// The first level found walking from this logger up to the root.
    ///
    /// A logger chain with no level anywhere behaves as `Warning`.
    pub fn effective_level(&self) -> LogLevel {
        let mut current = Some(self);
        while let Some(logger) = current {
            if let Some(level) = logger.level() {
                return level;
            }
            current = logger.parent.as_deref();
        }
        LogLevel::default()
    }

    #[inline]
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.effective_level()
    }

    pub fn propagate(&self) -> bool {
        self.propagate.load(Ordering::Relaxed)
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.propagate.store(propagate, Ordering::Relaxed);
    }

    /// Attach a handler. Attaching the same handler twice has no effect.
    pub fn add_handler(&self, handler: SharedHandler) {
        let mut handlers = self.handlers.write();
        if !handlers.iter().any(|h| Arc::ptr_eq(h, &handler)) {
            handlers.push(handler);
        }
    }

    /// Detach a handler, returning whether it was attached
    pub fn remove_handler(&self, handler: &SharedHandler) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|h| !Arc::ptr_eq(h, handler));
        handlers.len() != before
    }

    /// Detach and return every handler attached to this logger
    pub fn clear_handlers(&self) -> Vec<SharedHandler> {
        std::mem::take(&mut *self.handlers.write())
    }

    /// Snapshot of the handlers attached directly to this logger
    pub fn handlers(&self) -> Vec<SharedHandler> {
        self.handlers.read().clone()
    }

    /// Whether any handler would see entries from this logger, following
    /// propagation up the chain
    pub fn has_handlers(&self) -> bool {
        let mut current = Some(self);
        while let Some(logger) = current {
            if !logger.handlers.read().is_empty() {
                return true;
            }
            if !logger.propagate() {
                break;
            }
            current = logger.parent.as_deref();
        }
        false
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use logging_tour::{LogLevel, Logger};
    ///
    /// let logger = Logger::new("app");
    /// logger.set_level(LogLevel::Info);
    /// logger.debug("hidden");
    ///
    /// assert_eq!(logger.metrics().filtered_count(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.check_enabled(level) {
            return;
        }
        let entry = LogEntry::new(level, self.name.as_str(), message.into());
        self.dispatch(&entry);
    }

    /// Log with a message built only if `level` passes. Used by the
    /// formatting macros.
    pub fn log_with<F>(&self, level: LogLevel, location: Location, message: F)
    where
        F: FnOnce() -> String,
    {
        if !self.check_enabled(level) {
            return;
        }
        let entry = LogEntry::new(level, self.name.as_str(), message()).with_location(
            location.file,
            location.line,
            location.module_path,
        );
        self.dispatch(&entry);
    }

    /// Log at `level` with `error` attached below the rendered line
    pub fn log_error(&self, level: LogLevel, message: impl Into<String>, error: &ErrorRecord) {
        if !self.check_enabled(level) {
            return;
        }
        let entry =
            LogEntry::new(level, self.name.as_str(), message.into()).with_error(error.clone());
        self.dispatch(&entry);
    }

    /// Macro counterpart of [`log_error`](Logger::log_error)
    pub fn log_error_with<F>(
        &self,
        level: LogLevel,
        location: Location,
        error: &ErrorRecord,
        message: F,
    ) where
        F: FnOnce() -> String,
    {
        if !self.check_enabled(level) {
            return;
        }
        let entry = LogEntry::new(level, self.name.as_str(), message())
            .with_location(location.file, location.line, location.module_path)
            .with_error(error.clone());
        self.dispatch(&entry);
    }

    /// Submit a prebuilt entry, subject to this logger's effective level
    pub fn log_entry(&self, entry: LogEntry) {
        if self.check_enabled(entry.level) {
            self.dispatch(&entry);
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }

    /// Log at `Error` with a captured failure attached
    ///
    /// # Example
    ///
    /// ```
    /// use logging_tour::{ErrorRecord, Logger};
    ///
    /// let logger = Logger::new("app");
    /// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
    /// logger.exception("could not load config", &ErrorRecord::capture("NotFound", &err));
    /// ```
    #[inline]
    pub fn exception(&self, message: impl Into<String>, error: &ErrorRecord) {
        self.log_error(LogLevel::Error, message, error);
    }

    /// Flush every handler attached directly to this logger
    pub fn flush(&self) -> Result<()> {
        for handler in self.handlers() {
            handler.lock().flush()?;
        }
        Ok(())
    }

    fn check_enabled(&self, level: LogLevel) -> bool {
        let enabled = self.is_enabled_for(level);
        if !enabled {
            self.metrics.record_filtered();
        }
        enabled
    }

    /// Hand `entry` to every accepting handler on this logger and, while
    /// propagating, on its ancestors.
    ///
    /// **Per-Handler Panic Isolation**: each handler call is wrapped in
    /// catch_unwind so one failing handler cannot keep the entry from the
    /// others.
    fn dispatch(&self, entry: &LogEntry) {
        let mut accepted = 0usize;
        let mut has_error = false;
        let mut current = Some(self);

        while let Some(logger) = current {
            for handler in &logger.handlers() {
                let mut guard = handler.lock();
                if !guard.accepts(entry.level) {
                    continue;
                }
                accepted += 1;

                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    guard.emit(entry)
                }));
                match result {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        eprintln!("[LOGGER ERROR] Handler '{}' failed: {}", guard.name(), e);
                        has_error = true;
                    }
                    Err(panic_info) => {
                        eprintln!(
                            "[LOGGER CRITICAL] Handler '{}' panicked: {}. \
                             Other handlers continue to function.",
                            guard.name(),
                            panic_message(&*panic_info)
                        );
                        has_error = true;
                    }
                }
            }

            if !logger.propagate() {
                break;
            }
            current = logger.parent.as_deref();
        }

        if accepted == 0 {
            self.metrics.record_unhandled();
        } else if has_error {
            self.metrics.record_handler_error();
        } else {
            self.metrics.record_emitted();
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handlers", &self.handlers.read().len())
            .field("propagate", &self.propagate())
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::handler::shared;
    use crate::core::{Formatter, LoggerError};
    use crate::handlers::StreamHandler;
    use crate::handlers::stream::SharedBuffer;

    fn capture(logger: &Logger, template: &str) -> SharedBuffer {
        let buffer = SharedBuffer::new();
        let handler = StreamHandler::new(buffer.clone())
            .with_formatter(Formatter::new(template).unwrap());
        logger.add_handler(shared(handler));
        buffer
    }

    #[test]
    fn test_effective_level_walks_parents() {
        let root = Arc::new(Logger::with_parent("root", None, Some(LogLevel::Debug)));
        let child = Logger::with_parent("child", Some(Arc::clone(&root)), None);

        assert_eq!(child.effective_level(), LogLevel::Debug);
        child.set_level(LogLevel::Error);
        assert_eq!(child.effective_level(), LogLevel::Error);
        child.clear_level();
        assert_eq!(child.effective_level(), LogLevel::Debug);
    }

    #[test]
    fn test_standalone_defaults_to_warning() {
        let logger = Logger::new("app");
        assert_eq!(logger.effective_level(), LogLevel::Warning);
        assert!(!logger.is_enabled_for(LogLevel::Info));
        assert!(logger.is_enabled_for(LogLevel::Warning));
    }

    #[test]
    fn test_each_level_writes_one_line() {
        let logger = Logger::new("app");
        logger.set_level(LogLevel::Debug);
        let buffer = capture(&logger, "%(levelname)s - %(message)s");

        logger.debug("d");
        logger.info("i");
        logger.warning("w");
        logger.error("e");
        logger.critical("c");

        assert_eq!(
            buffer.lines(),
            vec!["DEBUG - d", "INFO - i", "WARNING - w", "ERROR - e", "CRITICAL - c"]
        );
        assert_eq!(logger.metrics().emitted_count(), 5);
    }

    #[test]
    fn test_propagation_to_parent_handlers() {
        let root = Arc::new(Logger::with_parent("root", None, Some(LogLevel::Debug)));
        let root_buffer = capture(&root, "%(name)s:%(message)s");
        let child = Logger::with_parent("child", Some(Arc::clone(&root)), None);
        let child_buffer = capture(&child, "%(message)s");

        child.info("hello");
        assert_eq!(child_buffer.lines(), vec!["hello"]);
        assert_eq!(root_buffer.lines(), vec!["child:hello"]);

        child.set_propagate(false);
        child.info("again");
        assert_eq!(root_buffer.lines().len(), 1);
        assert_eq!(child_buffer.lines().len(), 2);
    }

    #[test]
    fn test_parent_level_not_rechecked() {
        let root = Arc::new(Logger::with_parent("root", None, Some(LogLevel::Error)));
        let root_buffer = capture(&root, "%(message)s");
        let child = Logger::with_parent("child", Some(Arc::clone(&root)), Some(LogLevel::Debug));

        child.debug("passes");
        assert_eq!(root_buffer.lines(), vec!["passes"]);
    }

    #[test]
    fn test_handler_level_filters() {
        let logger = Logger::new("app");
        logger.set_level(LogLevel::Debug);
        let buffer = SharedBuffer::new();
        let handler = StreamHandler::new(buffer.clone())
            .with_formatter(Formatter::new("%(message)s").unwrap())
            .with_level(LogLevel::Error);
        logger.add_handler(shared(handler));

        logger.info("dropped");
        logger.error("kept");
        assert_eq!(buffer.lines(), vec!["kept"]);
    }

    #[test]
    fn test_add_handler_is_idempotent() {
        let logger = Logger::new("app");
        let handler = shared(StreamHandler::new(SharedBuffer::new()));
        logger.add_handler(Arc::clone(&handler));
        logger.add_handler(Arc::clone(&handler));
        assert_eq!(logger.handlers().len(), 1);

        assert!(logger.remove_handler(&handler));
        assert!(!logger.remove_handler(&handler));
        assert!(!logger.has_handlers());
    }

    #[test]
    fn test_unhandled_and_filtered_metrics() {
        let logger = Logger::new("app");
        logger.warning("nobody listens");
        logger.debug("below threshold");

        assert_eq!(logger.metrics().unhandled_count(), 1);
        assert_eq!(logger.metrics().filtered_count(), 1);
    }

    #[test]
    fn test_entry_rejected_by_every_handler_is_unhandled() {
        let logger = Logger::new("app");
        logger.set_level(LogLevel::Debug);
        let buffer = SharedBuffer::new();
        let handler = StreamHandler::new(buffer.clone())
            .with_formatter(Formatter::new("%(message)s").unwrap())
            .with_level(LogLevel::Error);
        logger.add_handler(shared(handler));

        logger.info("rejected by handler");

        assert!(buffer.lines().is_empty());
        assert_eq!(logger.metrics().emitted_count(), 0);
        assert_eq!(logger.metrics().unhandled_count(), 1);
        assert_eq!(logger.metrics().filtered_count(), 0);

        logger.error("written");
        assert_eq!(logger.metrics().emitted_count(), 1);
    }

    #[test]
    fn test_failing_handler_does_not_block_others() {
        struct Failing(Formatter);

        impl crate::core::Handler for Failing {
            fn emit(&mut self, _entry: &LogEntry) -> Result<()> {
                Err(LoggerError::from(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "Simulated failure",
                )))
            }
            fn flush(&mut self) -> Result<()> {
                Ok(())
            }
            fn name(&self) -> &str {
                "failing"
            }
            fn level(&self) -> Option<LogLevel> {
                None
            }
            fn set_level(&mut self, _level: Option<LogLevel>) {}
            fn formatter(&self) -> &Formatter {
                &self.0
            }
            fn set_formatter(&mut self, formatter: Formatter) {
                self.0 = formatter;
            }
        }

        let logger = Logger::new("app");
        logger.add_handler(shared(Failing(Formatter::default())));
        let buffer = capture(&logger, "%(message)s");

        logger.error("still written");
        assert_eq!(buffer.lines(), vec!["still written"]);
        assert_eq!(logger.metrics().handler_error_count(), 1);
    }

    #[test]
    fn test_exception_attaches_record() {
        let logger = Logger::new("app");
        let buffer = capture(&logger, "%(levelname)s - %(message)s");

        logger.exception("boom", &ErrorRecord::from_parts("Kind", "detail"));
        assert_eq!(buffer.contents(), "ERROR - boom\nKind: detail\n");
    }
}
