//! File handler implementation

use crate::core::{Formatter, Handler, LogEntry, LogLevel, LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// How an existing log file is treated when the handler opens it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileMode {
    #[default]
    Append,
    Truncate,
}

pub struct FileHandler {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    level: Option<LogLevel>,
    formatter: Formatter,
}

impl FileHandler {
    /// Open `path` for appending, creating it if absent
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_mode(path, FileMode::Append)
    }

    pub fn with_mode(path: impl Into<PathBuf>, mode: FileMode) -> Result<Self> {
        let path = path.into();
        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            FileMode::Append => options.append(true),
            FileMode::Truncate => options.write(true).truncate(true),
        };

        let file = options.open(&path).map_err(|e| {
            LoggerError::io_operation("opening log file", path.display().to_string(), e)
        })?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            level: None,
            formatter: Formatter::default(),
        })
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

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }
}

impl Handler for FileHandler {
    fn emit(&mut self, entry: &LogEntry) -> Result<()> {
        let mut output = self.formatter.format(entry);
        output.push('\n');

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::handler_closed(self.path.display().to_string()))?;

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
        "file"
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
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        Ok(())
    }
}

impl Drop for FileHandler {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn entry(message: &str) -> LogEntry {
        LogEntry::new(LogLevel::Info, "custom-logger", message.to_string())
    }

    #[test]
    fn test_creates_and_appends() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("app.log");

        {
            let mut handler = FileHandler::new(&path).unwrap();
            handler.emit(&entry("first")).unwrap();
        }
        {
            let mut handler = FileHandler::new(&path).unwrap();
            handler.emit(&entry("second")).unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "INFO:custom-logger:first\nINFO:custom-logger:second\n"
        );
    }

    #[test]
    fn test_truncate_mode() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("app.log");
        fs::write(&path, "old contents\n").unwrap();

        let mut handler = FileHandler::with_mode(&path, FileMode::Truncate).unwrap();
        handler.emit(&entry("fresh")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "INFO:custom-logger:fresh\n");
    }

    #[test]
    fn test_written_before_emit_returns() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("app.log");

        let mut handler = FileHandler::new(&path).unwrap();
        handler.emit(&entry("visible")).unwrap();

        // No explicit flush: emit already wrote through
        assert!(fs::read_to_string(&path).unwrap().contains("visible"));
    }

    #[test]
    fn test_open_failure_names_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing-dir").join("app.log");

        let err = FileHandler::new(&path).err().expect("open should fail");
        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("missing-dir"));
    }

    #[test]
    fn test_close_then_emit_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut handler = FileHandler::new(temp_dir.path().join("app.log")).unwrap();

        handler.close().unwrap();
        assert!(handler.is_closed());
        assert!(matches!(
            handler.emit(&entry("late")),
            Err(LoggerError::HandlerClosed { .. })
        ));
    }
}
