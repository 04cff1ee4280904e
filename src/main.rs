//! Runs the logging walkthrough: console output on stderr, and one line
//! appended to `test.log` in the working directory.

use logging_tour::walkthrough::{self, LOG_FILE};
use logging_tour::LoggingContext;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let ctx = LoggingContext::new();

    let outcome = walkthrough::run(&ctx, Path::new(LOG_FILE));
    ctx.shutdown();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[LOGGER ERROR] {}", e);
            ExitCode::FAILURE
        }
    }
}
