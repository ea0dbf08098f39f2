//! Locale-independent parsing of leaf element values.
//!
//! Handlers use these helpers to turn trimmed element text into numbers,
//! flags and timestamps. None of them fail hard: an unparseable value yields
//! `None` and the calling handler decides on the fallback.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a decimal number, ignoring surrounding whitespace.
///
/// # Examples
/// ```
/// use marble_geoparser::values::parse_f64;
///
/// assert_eq!(parse_f64(" 12.5 "), Some(12.5));
/// assert_eq!(parse_f64("1e3"), Some(1000.0));
/// assert_eq!(parse_f64("12,5"), None);
/// ```
#[must_use]
pub fn parse_f64(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse an integer, ignoring surrounding whitespace.
#[must_use]
pub fn parse_i32(text: &str) -> Option<i32> {
    text.trim().parse::<i32>().ok()
}

/// Parse an XML-schema style boolean (`1`/`0`/`true`/`false`).
///
/// # Examples
/// ```
/// use marble_geoparser::values::parse_bool;
///
/// assert_eq!(parse_bool("1"), Some(true));
/// assert_eq!(parse_bool("False"), Some(false));
/// assert_eq!(parse_bool("yes"), None);
/// ```
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Parse a KML/GPX `dateTime` value.
///
/// Accepts RFC 3339 timestamps, timestamps without a zone designator
/// (interpreted as UTC), plain dates, `YYYY-MM` and `YYYY`.
#[must_use]
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }

    // Reduced precision: `YYYY-MM` and `YYYY`.
    let mut parts = text.splitn(2, '-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = match parts.next() {
        Some(month) => month.parse::<u32>().ok()?,
        None if text.len() == 4 => 1,
        None => return None,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
