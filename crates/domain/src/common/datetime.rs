//! DateTime parsing utilities with consistent error handling.
//!
//! Timestamps keep the shape they were written in: a string without an
//! offset parses to a naive value, `Z` and `+HH:MM` suffixes parse to an
//! offset-aware value with that exact offset.

use std::fmt;

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
};
use serde::{Deserialize, Serialize};

/// A timestamp that is either naive or carries a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateTimeValue {
    Aware(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl DateTimeValue {
    /// Naive midnight of the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Naive(date.and_time(NaiveTime::MIN))
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Aware(dt) => dt.date_naive(),
            Self::Naive(dt) => dt.date(),
        }
    }

    /// The offset, if this value is aware.
    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            Self::Aware(dt) => Some(*dt.offset()),
            Self::Naive(_) => None,
        }
    }

    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Self::Aware(dt) => dt.naive_local(),
            Self::Naive(dt) => *dt,
        }
    }

    /// Swaps the day and month fields, keeping time and offset.
    ///
    /// Returns `None` when the swapped pair is not a valid calendar date.
    pub fn swap_day_month(&self) -> Option<Self> {
        let local = self.naive_local();
        let swapped = NaiveDate::from_ymd_opt(local.year(), local.day(), local.month())?
            .and_hms_nano_opt(
                local.hour(),
                local.minute(),
                local.second(),
                local.nanosecond(),
            )?;
        match self {
            Self::Naive(_) => Some(Self::Naive(swapped)),
            Self::Aware(dt) => dt
                .offset()
                .from_local_datetime(&swapped)
                .single()
                .map(Self::Aware),
        }
    }

    pub fn to_iso_string(&self) -> String {
        match self {
            Self::Aware(dt) => dt.to_rfc3339(),
            Self::Naive(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        }
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-8601 timestamp or date string.
///
/// Accepts date-only strings (`2020-01-12`, parsed as naive midnight),
/// naive timestamps, `Z`-suffixed timestamps and explicit offsets.
///
/// # Examples
///
/// ```
/// use alpha_domain::common::parse_iso8601;
/// use chrono::Datelike;
///
/// let dt = parse_iso8601("2020-01-12T00:00:00+02:00").unwrap();
/// assert_eq!(dt.date().day(), 12);
/// assert_eq!(dt.offset().unwrap().local_minus_utc(), 7200);
/// ```
///
/// # Errors
///
/// Returns `chrono::ParseError` if the string matches none of the accepted forms.
pub fn parse_iso8601(s: &str) -> Result<DateTimeValue, chrono::ParseError> {
    let s = s.trim();
    let aware = DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%:z"))
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z"));
    if let Ok(dt) = aware {
        return Ok(DateTimeValue::Aware(dt));
    }

    let mut last_err = match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => return Ok(DateTimeValue::from_date(date)),
        Err(err) => err,
    };
    for format in NAIVE_FORMATS {
        match NaiveDateTime::parse_from_str(s, format) {
            Ok(dt) => return Ok(DateTimeValue::Naive(dt)),
            Err(err) => last_err = err,
        }
    }
    Err(last_err)
}

/// Parses an ISO-8601 string, returning `None` instead of an error.
///
/// Used where date detection is opportunistic (patch value normalisation).
pub fn try_parse_iso8601(s: &str) -> Option<DateTimeValue> {
    parse_iso8601(s).ok()
}
