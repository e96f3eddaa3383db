//! Numeric and date coercion.
//!
//! Both coercions are lenient and silent: text that does not parse yields
//! `None`, which callers treat as "no value" (an absent range endpoint, or an
//! item that cannot satisfy a range/date filter).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse the leading decimal number of `raw`, ignoring trailing text.
///
/// `"20"`, `" 20.5 kg"` and `"1e3"` parse; `"$20"`, `"."` and `""` do not.
pub fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let mut j = end + 1;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - (end + 1);
        if digits > 0 {
            end = j;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < len && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().ok()
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a date or date-time. Values without an offset are taken as UTC.
///
/// Item values are lowercased at index time, so RFC 3339 separators are
/// accepted in either case (`2024-01-15t10:00:00z`).
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&s.to_uppercase()) {
        return Some(dt.with_timezone(&Utc));
    }

    let upper = s.to_uppercase();
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&upper, fmt) {
            return Some(naive.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

/// Render a number the way it is written back into inputs and tags:
/// integers without a fractional part, everything else as-is.
pub fn format_number(n: f64) -> String {
    format!("{}", n)
}
