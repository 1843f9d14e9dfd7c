use crate::{Error, Result};
use chrono::{DateTime, NaiveDate};

/// Parses an optional calendar date from client input.
///
/// Blank input means "no date". Full RFC 3339 timestamps (what browsers send from
/// `Date.toISOString()`) are accepted and truncated to their calendar date.
pub fn parse_calendar_date(field: &'static str, raw: &str) -> Result<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.date_naive()));
    }
    Err(Error::InvalidDate {
        field,
        value: raw.to_string(),
    })
}
