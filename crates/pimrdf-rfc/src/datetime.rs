//! Date and date-time normalization.
//!
//! Accepts the iCalendar basic forms (`20250915`, `20250915T100000Z`) and the
//! ISO 8601 extended forms (`2025-09-15`, `2025-09-15T10:00:00Z`). A value is
//! a date-time iff it contains `T`.
//!
//! Zone handling is approximate: a date-time without a designator is taken as
//! UTC, and a numeric offset is cut off rather than applied.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{RfcError, RfcResult};

const DATE_FORMATS: [&str; 2] = ["%Y%m%d", "%Y-%m-%d"];
const TIME_FORMATS: [&str; 5] = ["%H%M%S", "%H:%M:%S", "%H:%M:%S%.f", "%H%M", "%H:%M"];

/// A normalized calendar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Date without time of day.
    Date(NaiveDate),
    /// Instant in UTC.
    DateTime(DateTime<Utc>),
}

impl Timestamp {
    /// ## Summary
    /// Parses a date or date-time string.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidDateTime` if the date or time part does not
    /// match any accepted form.
    pub fn parse(raw: &str) -> RfcResult<Self> {
        let value = raw.trim();

        let Some((date_part, time_part)) = value.split_once(['T', 't']) else {
            return parse_date(value).map(Self::Date);
        };

        let time_part = if let Some(utc) = time_part.strip_suffix(['Z', 'z']) {
            utc
        } else if let Some(idx) = time_part.find(['+', '-']) {
            tracing::warn!(
                value = %value,
                offset = %&time_part[idx..],
                "Discarding UTC offset, treating local time as UTC"
            );
            &time_part[..idx]
        } else {
            time_part
        };

        let date = parse_date(date_part)?;
        let time = TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(time_part, format).ok())
            .ok_or_else(|| RfcError::InvalidDateTime(value.to_string()))?;

        Ok(Self::DateTime(date.and_time(time).and_utc()))
    }

    /// ## Summary
    /// Converts milliseconds since the Unix epoch into a UTC date-time.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidTimestamp` if the value is out of range.
    pub fn from_epoch_millis(millis: i64) -> RfcResult<Self> {
        DateTime::from_timestamp_millis(millis)
            .map(Self::DateTime)
            .ok_or_else(|| RfcError::InvalidTimestamp(millis.to_string()))
    }

    #[must_use]
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// ISO 8601 extended form: `2025-09-15` or `2025-09-15T10:00:00Z`.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        match self {
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
            Self::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }

    /// iCalendar basic form: `20250915` or `20250915T100000Z`.
    #[must_use]
    pub fn to_ical(&self) -> String {
        match self {
            Self::Date(date) => date.format("%Y%m%d").to_string(),
            Self::DateTime(dt) => dt.format("%Y%m%dT%H%M%SZ").to_string(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn parse_date(value: &str) -> RfcResult<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .ok_or_else(|| RfcError::InvalidDateTime(value.to_string()))
}
