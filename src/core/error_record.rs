//! Captured failure information attached to a log entry
//!
//! An [`ErrorRecord`] is built at the call site that detected the failure and
//! handed to [`Logger::exception`](crate::Logger::exception) explicitly. It
//! carries the error kind, its message, the chain of underlying causes and,
//! when captured, a rendered stack backtrace.

use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backtrace: Option<String>,
}

impl ErrorRecord {
    /// Capture `error` together with the current stack backtrace.
    ///
    /// The backtrace is captured unconditionally, regardless of
    /// `RUST_BACKTRACE`.
    pub fn capture(kind: impl Into<String>, error: &(dyn Error + 'static)) -> Self {
        let mut record = Self::without_trace(kind, error);
        record.backtrace = Some(Backtrace::force_capture().to_string());
        record
    }

    /// Record `error` and its causes without a backtrace
    pub fn without_trace(kind: impl Into<String>, error: &(dyn Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            kind: kind.into(),
            message: error.to_string(),
            causes,
            backtrace: None,
        }
    }

    /// Build a record from a bare kind and message
    pub fn from_parts(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            causes: Vec::new(),
            backtrace: None,
        }
    }

    pub fn has_backtrace(&self) -> bool {
        self.backtrace.is_some()
    }

    /// Render the multi-line text appended below a formatted entry.
    ///
    /// Layout: an optional `Stack backtrace:` block, one `Caused by:` line per
    /// cause, and a final `Kind: message` line.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(ref backtrace) = self.backtrace {
            out.push_str("Stack backtrace:\n");
            for line in backtrace.lines().filter(|l| !l.trim().is_empty()) {
                out.push_str("  ");
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }

        for cause in &self.causes {
            out.push_str("Caused by: ");
            out.push_str(cause);
            out.push('\n');
        }

        out.push_str(&self.kind);
        out.push_str(": ");
        out.push_str(&self.message);
        out
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
