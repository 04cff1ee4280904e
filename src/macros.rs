//! Logging macros for ergonomic log message formatting.
//!
//! These macros interpolate values with `format!` syntax, record the call
//! site for the `%(module)s`, `%(filename)s` and `%(lineno)d` fields, and
//! only build the message when the logger is enabled for the level.
//!
//! # Examples
//!
//! ```
//! use logging_tour::prelude::*;
//! use logging_tour::debug;
//!
//! let logger = Logger::new("demo");
//! logger.set_level(LogLevel::Debug);
//!
//! let x = 2;
//! let y = "hello world";
//! debug!(logger, "The value of x is {} and the value of y is {}", x, y);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use logging_tour::prelude::*;
/// # let logger = Logger::new("demo");
/// use logging_tour::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_with($level, $crate::location!(), || format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use logging_tour::prelude::*;
/// # let logger = Logger::new("demo");
/// use logging_tour::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log an error-level message with an [`ErrorRecord`](crate::ErrorRecord)
/// rendered below it.
///
/// # Examples
///
/// ```
/// # use logging_tour::prelude::*;
/// # let logger = Logger::new("demo");
/// use logging_tour::exception;
/// let record = ErrorRecord::from_parts("Timeout", "no reply after 5s");
/// exception!(logger, &record, "request {} failed", 42);
/// ```
#[macro_export]
macro_rules! exception {
    ($logger:expr, $error:expr, $($arg:tt)+) => {
        $logger.log_error_with(
            $crate::LogLevel::Error,
            $crate::location!(),
            $error,
            || format!($($arg)+),
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{shared, ErrorRecord, Formatter, LogLevel, Logger};
    use crate::handlers::{SharedBuffer, StreamHandler};
    use std::cell::Cell;

    fn capture(template: &str) -> (Logger, SharedBuffer) {
        let logger = Logger::new("macros");
        logger.set_level(LogLevel::Debug);
        let buffer = SharedBuffer::new();
        logger.add_handler(shared(
            StreamHandler::new(buffer.clone()).with_formatter(Formatter::new(template).unwrap()),
        ));
        (logger, buffer)
    }

    #[test]
    fn test_level_macros() {
        let (logger, buffer) = capture("%(levelname)s %(message)s");
        debug!(logger, "d {}", 1);
        info!(logger, "i {}", 2);
        warning!(logger, "w {}", 3);
        error!(logger, "e {}", 4);
        critical!(logger, "c {}", 5);
        log!(logger, LogLevel::Info, "plain");

        assert_eq!(
            buffer.lines(),
            vec!["DEBUG d 1", "INFO i 2", "WARNING w 3", "ERROR e 4", "CRITICAL c 5", "INFO plain"]
        );
    }

    #[test]
    fn test_interpolation() {
        let (logger, buffer) = capture("%(message)s");
        let x = 2;
        let y = "hello world";
        debug!(logger, "The value of x is {} and the value of y is {}", x, y);

        assert_eq!(
            buffer.lines(),
            vec!["The value of x is 2 and the value of y is hello world"]
        );
    }

    #[test]
    fn test_records_call_site() {
        let (logger, buffer) = capture("%(module)s:%(lineno)d");
        info!(logger, "here");

        let line = &buffer.lines()[0];
        assert!(line.starts_with("logging_tour::macros::tests:"));
        assert_ne!(line.rsplit(':').next(), Some("-"));
    }

    #[test]
    fn test_message_not_built_when_filtered() {
        let (logger, buffer) = capture("%(message)s");
        logger.set_level(LogLevel::Error);

        let built = Cell::new(false);
        debug!(logger, "{}", {
            built.set(true);
            "expensive"
        });

        assert!(!built.get());
        assert!(buffer.lines().is_empty());
    }

    #[test]
    fn test_exception_macro() {
        let (logger, buffer) = capture("%(levelname)s - %(message)s");
        let record = ErrorRecord::from_parts("ZeroDivisionError", "division by zero");
        exception!(logger, &record, "step {} failed", 3);

        assert_eq!(
            buffer.contents(),
            "ERROR - step 3 failed\nZeroDivisionError: division by zero\n"
        );
    }
}
