//! Shared data models.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};

use crate::{Error, Result};

/// Server-generated user identity.
pub type UserId = i64;

/// Server-generated event identity.
pub type EventId = i64;

/// Wire and storage format for calendar days.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar event owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub event_id: EventId,
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    pub text: String,
}

/// Event as returned by the query endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    pub date: String,
    pub text: String,
}

impl From<Event> for EventView {
    fn from(event: Event) -> Self {
        Self {
            date: format_date(event.date),
            text: event.text,
        }
    }
}

fn serialize_date<S: Serializer>(date: &NaiveDate, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(*date))
}

/// Requested changes to an event. Empty strings count as "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub date: Option<String>,
    pub text: Option<String>,
}

impl EventPatch {
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref().filter(|v| !v.is_empty())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.date().is_none() && self.text().is_none()
    }
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// The shape is checked before chrono sees the input: chrono alone accepts
/// unpadded fields, leading whitespace and signed extended years.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    if !is_iso_day(raw.as_bytes()) {
        return Err(Error::InvalidDate(format!("{raw:?}: expected YYYY-MM-DD")));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| Error::InvalidDate(format!("{raw:?}: {e}")))
}

fn is_iso_day(raw: &[u8]) -> bool {
    raw.len() == 10
        && raw.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Half-open `[day, day + 1)`.
pub fn day_range(day: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    days_from(day, 1)
}

/// Half-open `[start, start + 7 days)`. The start is used as-is, not snapped to a week boundary.
pub fn week_range(start: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    days_from(start, 7)
}

fn days_from(start: NaiveDate, days: u64) -> Result<(NaiveDate, NaiveDate)> {
    let end = start
        .checked_add_days(Days::new(days))
        .ok_or_else(|| Error::InvalidDate(format!("{start} + {days} days is out of range")))?;
    Ok((start, end))
}

/// Half-open `[first of month, first of next month)`.
pub fn month_range(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidDate(format!("no such month: {year}-{month:02}")))?;
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| Error::InvalidDate(format!("month out of range: {year}-{month:02}")))?;
    Ok((start, end))
}
