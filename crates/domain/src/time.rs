//! Time and timestamp helpers.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::ValidationError;
use crate::rule::Field;

/// UTC timestamp used for state updates.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Deserialize a timestamp that may lack a UTC offset.
///
/// The backend emits Python `isoformat()` strings, which are naive; those
/// are taken as UTC. RFC 3339 strings are accepted as-is.
///
/// # Errors
///
/// Fails when the string is neither RFC 3339 nor a naive ISO 8601 datetime.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_lenient(&raw).map_err(serde::de::Error::custom)
}

fn parse_lenient(raw: &str) -> Result<Timestamp, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Ok(ts.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc()),
    }
}

/// A wall-clock time of day in 24-hour `HH:MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    const FORMAT: &'static str = "%H:%M";

    /// Parse an `HH:MM` string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidValue`] when the string is not a
    /// valid 24-hour time.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        NaiveTime::parse_from_str(raw.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidValue {
                field: Field::Value,
                value: raw.to_string(),
                expected: "a 24-hour time (HH:MM)".to_string(),
            })
    }

    #[must_use]
    pub fn as_naive(self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}
