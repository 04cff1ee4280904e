//! Template-based entry formatting
//!
//! A template is plain text with `%(field)s` placeholders. Supported fields:
//!
//! | field        | value                                         |
//! |--------------|-----------------------------------------------|
//! | `asctime`    | timestamp rendered with the formatter's [`TimestampFormat`] |
//! | `created`    | seconds since the Unix epoch, six decimals    |
//! | `name`       | logger name                                   |
//! | `levelname`  | `DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL` |
//! | `levelno`    | numeric level (10..=50)                       |
//! | `message`    | the entry message                             |
//! | `module`     | module path of the call site                  |
//! | `filename`   | source file of the call site                  |
//! | `lineno`     | source line of the call site                  |
//! | `thread`     | thread id                                     |
//! | `threadName` | thread name, or the id for unnamed threads    |
//!
//! A placeholder may carry `-` (left align) and a minimum width before the
//! conversion character, e.g. `%(levelname)-8s`. The conversion character
//! must be one of `s`, `d`, `i` or `f`. `%%` renders a literal `%`.
//! Location fields render as `-` when the entry has no call-site information.

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::timestamp::{epoch_seconds, TimestampFormat};

/// Template used when none is given
pub const DEFAULT_FORMAT: &str = "%(levelname)s:%(name)s:%(message)s";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    AscTime,
    Created,
    Name,
    LevelName,
    LevelNo,
    Message,
    Module,
    FileName,
    LineNo,
    Thread,
    ThreadName,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "asctime" => Field::AscTime,
            "created" => Field::Created,
            "name" => Field::Name,
            "levelname" => Field::LevelName,
            "levelno" => Field::LevelNo,
            "message" => Field::Message,
            "module" => Field::Module,
            "filename" => Field::FileName,
            "lineno" => Field::LineNo,
            "thread" => Field::Thread,
            "threadName" => Field::ThreadName,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field {
        field: Field,
        left_align: bool,
        width: usize,
    },
}

/// Renders a [`LogEntry`] into text according to a `%(field)s` template
///
/// # Examples
///
/// ```
/// use logging_tour::{Formatter, LogEntry, LogLevel};
///
/// let formatter = Formatter::new("%(levelname)s - %(message)s").unwrap();
/// let entry = LogEntry::new(LogLevel::Info, "app", "ready".to_string());
/// assert_eq!(formatter.format(&entry), "INFO - ready");
/// ```
#[derive(Debug, Clone)]
pub struct Formatter {
    template: String,
    segments: Vec<Segment>,
    timestamp_format: TimestampFormat,
}

impl Formatter {
    /// Parse `template`, rejecting unknown fields and malformed placeholders
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let segments = parse_template(&template)?;
        Ok(Self {
            template,
            segments,
            timestamp_format: TimestampFormat::default(),
        })
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    /// Whether the template references `%(asctime)s`
    pub fn uses_time(&self) -> bool {
        self.segments.iter().any(|s| {
            matches!(
                s,
                Segment::Field {
                    field: Field::AscTime,
                    ..
                }
            )
        })
    }

    /// Render `entry`. An attached error record is rendered on the lines
    /// following the templated line.
    pub fn format(&self, entry: &LogEntry) -> String {
        let mut out = String::with_capacity(self.template.len() + entry.message.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field {
                    field,
                    left_align,
                    width,
                } => {
                    let value = self.field_value(*field, entry);
                    if *left_align {
                        out.push_str(&format!("{:<width$}", value, width = *width));
                    } else {
                        out.push_str(&format!("{:>width$}", value, width = *width));
                    }
                }
            }
        }

        if let Some(ref error) = entry.error {
            out.push('\n');
            out.push_str(&error.render());
        }

        out
    }

    fn field_value(&self, field: Field, entry: &LogEntry) -> String {
        match field {
            Field::AscTime => self.timestamp_format.format(&entry.timestamp),
            Field::Created => format!("{:.6}", epoch_seconds(&entry.timestamp)),
            Field::Name => entry.logger_name.clone(),
            Field::LevelName => entry.level.to_str().to_string(),
            Field::LevelNo => entry.level.as_u8().to_string(),
            Field::Message => entry.message.clone(),
            Field::Module => entry.module_path.clone().unwrap_or_else(|| "-".to_string()),
            Field::FileName => entry.file.clone().unwrap_or_else(|| "-".to_string()),
            Field::LineNo => entry
                .line
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string()),
            Field::Thread => entry.thread_id.clone(),
            Field::ThreadName => entry.thread_label().to_string(),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            template: DEFAULT_FORMAT.to_string(),
            segments: vec![
                Segment::Field {
                    field: Field::LevelName,
                    left_align: false,
                    width: 0,
                },
                Segment::Literal(":".to_string()),
                Segment::Field {
                    field: Field::Name,
                    left_align: false,
                    width: 0,
                },
                Segment::Literal(":".to_string()),
                Segment::Field {
                    field: Field::Message,
                    left_align: false,
                    width: 0,
                },
            ],
            timestamp_format: TimestampFormat::default(),
        }
    }
}

fn parse_template(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }

        match chars.next() {
            Some((_, '%')) => literal.push('%'),
            Some((_, '(')) => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, ')')) => break,
                        Some((_, ch)) => name.push(ch),
                        None => {
                            return Err(LoggerError::formatter(
                                "template",
                                format!("unterminated placeholder at offset {}", pos),
                            ))
                        }
                    }
                }

                let field = Field::parse(&name).ok_or_else(|| {
                    LoggerError::formatter("template", format!("unknown field '{}'", name))
                })?;

                let left_align = chars.next_if(|&(_, ch)| ch == '-').is_some();
                let mut digits = String::new();
                while let Some((_, ch)) = chars.next_if(|(_, ch)| ch.is_ascii_digit()) {
                    digits.push(ch);
                }
                let width = if digits.is_empty() {
                    0
                } else {
                    digits.parse().map_err(|_| {
                        LoggerError::formatter("template", format!("invalid width '{}'", digits))
                    })?
                };

                match chars.next() {
                    Some((_, 's' | 'd' | 'i' | 'f')) => {}
                    Some((_, other)) => {
                        return Err(LoggerError::formatter(
                            "template",
                            format!("unsupported conversion '{}' for field '{}'", other, name),
                        ))
                    }
                    None => {
                        return Err(LoggerError::formatter(
                            "template",
                            format!("missing conversion for field '{}'", name),
                        ))
                    }
                }

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Field {
                    field,
                    left_align,
                    width,
                });
            }
            _ => {
                return Err(LoggerError::formatter(
                    "template",
                    format!("bare '%' at offset {}, use '%%' for a literal percent", pos),
                ))
            }
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}
