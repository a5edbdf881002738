//! Best-effort parsing of article dates
//!
//! Overview data carries the `Date:` header verbatim, and servers pass
//! through whatever the posting software wrote. Besides strict RFC 5322 this
//! accepts the common deviations seen on Usenet: two-digit years, `UTC`
//! and other named zones, trailing comments like `(UTC)`, a missing weekday,
//! and ISO 8601 timestamps.

use crate::error::{NntpError, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Zone names not understood by chrono's RFC 2822 parser
const ZONE_ALIASES: &[(&str, &str)] = &[
    ("UTC", "+0000"),
    ("GMT", "+0000"),
    ("UT", "+0000"),
    ("Z", "+0000"),
    ("CET", "+0100"),
    ("CEST", "+0200"),
    ("BST", "+0100"),
    ("MET", "+0100"),
    ("MEST", "+0200"),
    ("EET", "+0200"),
    ("JST", "+0900"),
];

/// Layouts tried, in order, on dates without a recognisable zone
const NAIVE_FORMATS: &[&str] = &[
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%a %b %e %H:%M:%S %Y",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a date header value, trying progressively looser formats
///
/// Dates without any zone information are taken as UTC.
///
/// # Examples
///
/// ```
/// use nntp_overview::parse_date;
///
/// let strict = parse_date("Thu, 03 Jan 2019 18:58:44 +0000").unwrap();
/// let sloppy = parse_date("Thu, 03 Jan 19 18:58:44 UTC").unwrap();
/// assert_eq!(strict, sloppy);
/// ```
///
/// # Errors
///
/// Returns [`NntpError::InvalidDate`] if no format matches.
pub fn parse_date(date_str: &str) -> Result<DateTime<Utc>> {
    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return Err(NntpError::InvalidDate("empty date".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let normalized = normalize(trimmed);
    if let Some(dt) = parse_rfc2822_lenient(&normalized) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let without_weekday = strip_weekday(&normalized);
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(without_weekday, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(NntpError::InvalidDate(format!(
        "unrecognised date format: {}",
        date_str
    )))
}

/// RFC 2822 with the weekday check relaxed
///
/// Some posting agents compute the weekday wrongly, which chrono rejects.
fn parse_rfc2822_lenient(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc2822(strip_weekday(value)))
        .ok()
}

/// Drop trailing comments and map zone names to numeric offsets
fn normalize(value: &str) -> String {
    let without_comment = match value.find('(') {
        Some(pos) => value[..pos].trim_end(),
        None => value,
    };

    let mut words: Vec<&str> = without_comment.split_whitespace().collect();
    if let Some(last) = words.last_mut()
        && let Some(&(_, offset)) = ZONE_ALIASES
            .iter()
            .find(|(name, _)| last.eq_ignore_ascii_case(name))
    {
        *last = offset;
    }
    words.join(" ")
}

fn strip_weekday(value: &str) -> &str {
    match value.split_once(',') {
        Some((day, rest)) if day.len() <= 9 && day.chars().all(|c| c.is_ascii_alphabetic()) => {
            rest.trim_start()
        }
        _ => value,
    }
}
