use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Best-effort numeric coercion of a loosely-typed cell.
///
/// Numbers pass through; strings parse their longest leading float prefix.
/// Anything unparseable yields `NaN`, which is left for callers to propagate.
#[must_use]
pub fn coerce_value_f64(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => parse_leading_float(text),
        _ => f64::NAN,
    }
}

/// Parses the longest leading float literal of `input`, ignoring trailing text.
///
/// `"101.5 USD"` yields `101.5`, `"abc"` yields `NaN`.
#[must_use]
pub fn parse_leading_float(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if trimmed[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut cursor = frac_start;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        digits += cursor - frac_start;
        if digits > 0 {
            end = cursor;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut cursor = end + 1;
        if cursor < bytes.len() && matches!(bytes[cursor], b'+' | b'-') {
            cursor += 1;
        }
        let exp_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exp_start {
            end = cursor;
        }
    }

    trimmed[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Keeps the calendar part of a date-like string (text before the first
/// space or `T`).
#[must_use]
pub fn truncate_date_text(text: &str) -> &str {
    text.split([' ', 'T']).next().unwrap_or_default()
}

/// Converts a date cell into a `YYYY-MM-DD` string.
///
/// Strings are truncated to their calendar part; numbers are epoch
/// milliseconds truncated to the UTC calendar date. Empty strings and
/// non-date JSON shapes yield `None`.
#[must_use]
pub fn truncate_to_calendar_date(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let date = truncate_date_text(text);
            (!date.is_empty()).then(|| date.to_owned())
        }
        Value::Number(number) => {
            let millis = number.as_f64().filter(|millis| millis.is_finite())?;
            let time = DateTime::<Utc>::from_timestamp_millis(millis.trunc() as i64)?;
            Some(format_calendar_date(time.date_naive()))
        }
        _ => None,
    }
}

/// Parses a date-like string into a calendar date. Never panics.
#[must_use]
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for format in [CALENDAR_DATE_FORMAT, "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(time) = NaiveDateTime::parse_from_str(text, format) {
            return Some(time.date());
        }
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|time| time.date_naive())
}

#[must_use]
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(CALENDAR_DATE_FORMAT).to_string()
}
