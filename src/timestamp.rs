//! Parsing and normalization of the timestamps stored with expenses and goals.
//!
//! Timestamps are stored in UTC with whole-second precision. Every stored
//! value then has the same textual layout, so comparing them as strings in
//! SQL (e.g. with `BETWEEN`) gives chronological order.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use time::{
    Date, Duration, OffsetDateTime, Time, UtcOffset, format_description::well_known::Rfc3339,
    macros::{format_description, time},
};

use crate::Error;

const END_OF_DAY: Time = time!(23:59:59);

/// Convert `date_time` to UTC and drop the sub-second part.
///
/// # Errors
/// Returns [Error::DateOutOfRange] if the UTC equivalent falls outside the
/// range of representable dates, e.g. `9999-12-31T23:30:00-01:00`.
pub fn normalize(date_time: OffsetDateTime) -> Result<OffsetDateTime, Error> {
    date_time
        .checked_to_offset(UtcOffset::UTC)
        .map(truncate_to_second)
        .ok_or_else(|| Error::DateOutOfRange(date_time.to_string()))
}

/// The current time, normalized for storage.
pub fn now() -> OffsetDateTime {
    truncate_to_second(OffsetDateTime::now_utc())
}

fn truncate_to_second(date_time: OffsetDateTime) -> OffsetDateTime {
    date_time - Duration::nanoseconds(date_time.nanosecond().into())
}

/// A point in time supplied by a client, either as a full timestamp or as a calendar date.
///
/// Web forms send plain dates, so a date has to be resolved to a timestamp
/// depending on whether it opens or closes a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampInput {
    DateTime(OffsetDateTime),
    Date(Date),
}

impl TimestampInput {
    /// Resolve to a timestamp that opens a period: a plain date means the start of that day (UTC).
    ///
    /// # Errors
    /// Returns [Error::DateOutOfRange] if a timestamp cannot be expressed in UTC.
    pub fn start_of_period(self) -> Result<OffsetDateTime, Error> {
        match self {
            TimestampInput::DateTime(date_time) => normalize(date_time),
            TimestampInput::Date(date) => Ok(date.midnight().assume_utc()),
        }
    }

    /// Resolve to a timestamp that closes a period: a plain date means the last second of that day (UTC).
    ///
    /// # Errors
    /// Returns [Error::DateOutOfRange] if a timestamp cannot be expressed in UTC.
    pub fn end_of_period(self) -> Result<OffsetDateTime, Error> {
        match self {
            TimestampInput::DateTime(date_time) => normalize(date_time),
            TimestampInput::Date(date) => Ok(date.with_time(END_OF_DAY).assume_utc()),
        }
    }
}

impl FromStr for TimestampInput {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(date_time) = OffsetDateTime::parse(s, &Rfc3339) {
            return Ok(TimestampInput::DateTime(date_time));
        }

        Date::parse(s, format_description!("[year]-[month]-[day]"))
            .map(TimestampInput::Date)
            .map_err(|_| Error::InvalidDate(s.to_owned()))
    }
}

impl<'de> Deserialize<'de> for TimestampInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;

        text.parse().map_err(serde::de::Error::custom)
    }
}
