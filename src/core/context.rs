//! Logging context: the logger registry and root configuration
//!
//! A [`LoggingContext`] owns the root logger and every named logger created
//! through it. It is built once at startup and passed by reference to code
//! that needs to log; there is no process-global state.

use super::config::BasicConfig;
use super::error::Result;
use super::handler::SharedHandler;
use super::log_level::LogLevel;
use super::logger::{Logger, ROOT_LOGGER_NAME};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct LoggingContext {
    root: Arc<Logger>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    /// Held across the check-and-install in `basic_config`
    config_lock: Mutex<()>,
    shut_down: AtomicBool,
}

impl LoggingContext {
    /// Create a context whose root logger has level `Warning` and no handlers
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Arc::new(Logger::with_parent(
                ROOT_LOGGER_NAME,
                None,
                Some(LogLevel::Warning),
            )),
            loggers: RwLock::new(HashMap::new()),
            config_lock: Mutex::new(()),
            shut_down: AtomicBool::new(false),
        }
    }

    pub fn root(&self) -> &Arc<Logger> {
        &self.root
    }

    /// Get or create the logger called `name`.
    ///
    /// Names are dot-separated; `a.b` is a child of `a`. Missing ancestors are
    /// created along the way. `""` and `"root"` return the root logger.
    ///
    /// # Example
    ///
    /// ```
    /// use logging_tour::LoggingContext;
    /// use std::sync::Arc;
    ///
    /// let ctx = LoggingContext::new();
    /// let a = ctx.get_logger("custom-logger");
    /// let b = ctx.get_logger("custom-logger");
    /// assert!(Arc::ptr_eq(&a, &b));
    /// ```
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        if name.is_empty() || name == ROOT_LOGGER_NAME {
            return Arc::clone(&self.root);
        }

        if let Some(logger) = self.loggers.read().get(name) {
            return Arc::clone(logger);
        }

        let mut loggers = self.loggers.write();
        Self::get_or_create(&mut loggers, &self.root, name)
    }

    fn get_or_create(
        loggers: &mut HashMap<String, Arc<Logger>>,
        root: &Arc<Logger>,
        name: &str,
    ) -> Arc<Logger> {
        if let Some(logger) = loggers.get(name) {
            return Arc::clone(logger);
        }

        let parent = match name.rsplit_once('.') {
            Some((parent_name, _)) if !parent_name.is_empty() => {
                Self::get_or_create(loggers, root, parent_name)
            }
            _ => Arc::clone(root),
        };

        let logger = Arc::new(Logger::with_parent(name, Some(parent), None));
        loggers.insert(name.to_string(), Arc::clone(&logger));
        logger
    }

    /// Names of every logger created so far, excluding the root
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Configure the root logger once.
    ///
    /// Installs the handler described by `config` and sets the root level.
    /// If the root logger already has handlers this does nothing and returns
    /// `Ok(false)`, unless `config.force` is set, in which case the existing
    /// root handlers are closed and replaced.
    ///
    /// Concurrent calls are serialized, so exactly one of them installs a
    /// handler on an unconfigured root.
    pub fn basic_config(&self, config: BasicConfig) -> Result<bool> {
        let _config_guard = self.config_lock.lock();

        if !self.root.handlers().is_empty() {
            if !config.force {
                return Ok(false);
            }
            for handler in self.root.clear_handlers() {
                close_handler(&handler);
            }
        }

        let handler = config.build_handler()?;
        self.root.add_handler(handler);
        if let Some(level) = config.level {
            self.root.set_level(level);
        }
        Ok(true)
    }

    /// Whether the root logger has been given a handler
    pub fn is_configured(&self) -> bool {
        !self.root.handlers().is_empty()
    }

    /// Flush every handler attached to any logger in this context
    pub fn flush(&self) -> Result<()> {
        for handler in self.all_handlers() {
            handler.lock().flush()?;
        }
        Ok(())
    }

    /// Flush and close every handler. Later calls do nothing.
    pub fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::AcqRel) {
            return;
        }
        for handler in self.all_handlers() {
            close_handler(&handler);
        }
    }

    /// Each handler once, even when attached to several loggers
    fn all_handlers(&self) -> Vec<SharedHandler> {
        let mut seen: Vec<SharedHandler> = self.root.handlers();
        for logger in self.loggers.read().values() {
            for handler in logger.handlers() {
                if !seen.iter().any(|h| Arc::ptr_eq(h, &handler)) {
                    seen.push(handler);
                }
            }
        }
        seen
    }
}

fn close_handler(handler: &SharedHandler) {
    let mut guard = handler.lock();
    if let Err(e) = guard.close() {
        eprintln!("[LOGGER ERROR] Failed to close handler '{}': {}", guard.name(), e);
    }
}

impl Default for LoggingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LoggingContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}
