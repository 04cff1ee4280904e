//! Timestamp formatting utilities
//!
//! Controls how the `%(asctime)s` field of a template is rendered.
//! All timestamps are UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options for the `%(asctime)s` field
///
/// # Examples
///
/// ```
/// use logging_tour::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::AscTime.format(&at), "2025-01-08 10:30:45,000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Date, time and milliseconds after a comma: `2025-01-08 10:30:45,123`
    #[default]
    AscTime,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// ```
    /// use logging_tour::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::AscTime => datetime.format("%Y-%m-%d %H:%M:%S,%3f").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

/// Seconds since the Unix epoch with fractional part, as rendered by `%(created)s`
pub fn epoch_seconds(datetime: &DateTime<Utc>) -> f64 {
    datetime.timestamp_micros() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_asctime_format() {
        let result = TimestampFormat::AscTime.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08 10:30:45,123");
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.contains("+00:00") || result.ends_with('Z'));
    }

    #[test]
    fn test_unix_formats() {
        let secs: i64 = TimestampFormat::Unix
            .format(&fixed_datetime())
            .parse()
            .expect("valid unix timestamp");
        let millis: i64 = TimestampFormat::UnixMillis
            .format(&fixed_datetime())
            .parse()
            .expect("valid unix millis timestamp");
        assert_eq!(secs, 1736332245);
        assert_eq!(millis, 1736332245123);
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");
    }

    #[test]
    fn test_default_is_asctime() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::AscTime);
    }

    #[test]
    fn test_epoch_seconds() {
        let secs = epoch_seconds(&fixed_datetime());
        assert!((secs - 1736332245.123456).abs() < 1e-6);
    }
}
