//! Stream handler implementation
//!
//! Writes formatted entries to any `Write` sink: the process's stderr or
//! stdout, or an in-memory [`SharedBuffer`].

use crate::core::{Formatter, Handler, LogEntry, LogLevel, LoggerError, Result};
use colored::Colorize;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::sync::Arc;

/// Which standard stream a console handler writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleStream {
    #[default]
    Stderr,
    Stdout,
}

/// `Write` adapter over the process's stderr or stdout
#[derive(Debug, Clone, Copy)]
pub struct ConsoleWriter {
    stream: ConsoleStream,
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.stream {
            ConsoleStream::Stderr => io::stderr().lock().write(buf),
            ConsoleStream::Stdout => io::stdout().lock().write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self.stream {
            ConsoleStream::Stderr => io::stderr().lock().write_all(buf),
            ConsoleStream::Stdout => io::stdout().lock().write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.stream {
            ConsoleStream::Stderr => io::stderr().flush(),
            ConsoleStream::Stdout => io::stdout().flush(),
        }
    }
}

/// Handler writing to stderr or stdout
pub type ConsoleHandler = StreamHandler<ConsoleWriter>;

pub struct StreamHandler<W: Write + Send> {
    writer: Option<W>,
    name: String,
    level: Option<LogLevel>,
    formatter: Formatter,
    use_colors: bool,
}

impl StreamHandler<ConsoleWriter> {
    /// Console handler on stderr
    pub fn stderr() -> Self {
        Self::console(ConsoleStream::Stderr)
    }

    /// Console handler on stdout
    pub fn stdout() -> Self {
        Self::console(ConsoleStream::Stdout)
    }

    pub fn console(stream: ConsoleStream) -> Self {
        let mut handler = Self::new(ConsoleWriter { stream });
        handler.name = match stream {
            ConsoleStream::Stderr => "stderr".to_string(),
            ConsoleStream::Stdout => "stdout".to_string(),
        };
        handler
    }
}

impl<W: Write + Send> StreamHandler<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            name: "stream".to_string(),
            level: None,
            formatter: Formatter::default(),
            use_colors: false,
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Colour each rendered entry by its level
    ///
    /// # Example
    ///
    /// ```
    /// use logging_tour::handlers::StreamHandler;
    ///
    /// let handler = StreamHandler::stderr().with_colors(true);
    /// ```
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn render(&self, entry: &LogEntry) -> String {
        let text = self.formatter.format(entry);
        if self.use_colors {
            text.color(entry.level.color_code()).to_string()
        } else {
            text
        }
    }
}

impl<W: Write + Send> Handler for StreamHandler<W> {
    fn emit(&mut self, entry: &LogEntry) -> Result<()> {
        let mut output = self.render(entry);
        output.push('\n');

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::handler_closed(self.name.as_str()))?;

        // One write per entry so multi-line traces stay contiguous
        writer.write_all(output.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> Option<LogLevel> {
        self.level
    }

    fn set_level(&mut self, level: Option<LogLevel>) {
        self.level = level;
    }

    fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    fn set_formatter(&mut self, formatter: Formatter) {
        self.formatter = formatter;
    }

    fn close(&mut self) -> Result<()> {
        self.flush()?;
        self.writer = None;
        Ok(())
    }
}

/// Cloneable in-memory sink; every clone appends to the same buffer
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
