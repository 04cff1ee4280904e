//! The fixed walkthrough run by the `logging_tour` binary
//!
//! 1. configure the root logger for `DEBUG` with a `LEVEL - message` template
//! 2. log one message per level through the module logger
//! 3. log a message with interpolated values
//! 4. divide by zero, and log the failure with its backtrace
//! 5. attach a file handler to `custom-logger` and log one message through it
//!
//! The module logger is named after this module's path,
//! `logging_tour::walkthrough`, which is what `%(name)s` shows for steps 2-4.

use crate::core::{
    shared, BasicConfig, ErrorRecord, Formatter, LogLevel, LoggingContext, Result,
};
use crate::debug;
use crate::handlers::FileHandler;
use std::path::Path;

/// File written by the custom logger, relative to the working directory
pub const LOG_FILE: &str = "test.log";
pub const CUSTOM_LOGGER_NAME: &str = "custom-logger";
pub const CONSOLE_FORMAT: &str = "%(levelname)s - %(message)s";
pub const FILE_FORMAT: &str = "%(asctime)s - %(name)s - %(levelname)s - %(message)s";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in division")]
    Overflow,
}

impl ArithmeticError {
    /// Kind name shown on the last line of a logged trace
    pub fn kind(&self) -> &'static str {
        match self {
            ArithmeticError::DivisionByZero => "ZeroDivisionError",
            ArithmeticError::Overflow => "OverflowError",
        }
    }
}

pub fn divide(dividend: i64, divisor: i64) -> std::result::Result<i64, ArithmeticError> {
    if divisor == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    dividend
        .checked_div(divisor)
        .ok_or(ArithmeticError::Overflow)
}

/// Run every step against `ctx`, writing the custom logger's output to
/// `log_path`.
///
/// Fails only if the root handler or the log file cannot be set up.
pub fn run(ctx: &LoggingContext, log_path: &Path) -> Result<()> {
    let logger = ctx.get_logger(module_path!());

    ctx.basic_config(
        BasicConfig::new()
            .level(LogLevel::Debug)
            .format(CONSOLE_FORMAT),
    )?;

    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.critical("This is a critical message");

    let x = 2;
    let y = "hello world";
    debug!(logger, "The value of x is {} and the value of y is {}", x, y);

    match divide(1, 0) {
        Ok(quotient) => debug!(logger, "1 / 0 = {}", quotient),
        Err(err) => {
            let record = ErrorRecord::capture(err.kind(), &err);
            logger.exception(format!("An exception occurred: {}", err.kind()), &record);
        }
    }

    let custom_logger = ctx.get_logger(CUSTOM_LOGGER_NAME);
    let file_handler = FileHandler::new(log_path)?.with_formatter(Formatter::new(FILE_FORMAT)?);
    custom_logger.add_handler(shared(file_handler));
    custom_logger.info("This log message is sent to the file");

    Ok(())
}
