//! Free-form donation date parsing.
//!
//! Profiles have accumulated last-donation dates in several textual formats,
//! plus raw epoch-millisecond timestamps written by older clients. This
//! module parses them all; callers treat an unparseable date as "no date".

use chrono::{DateTime, NaiveDate, Utc};

/// Accepted textual formats, tried in order. First success wins.
///
/// The order matters for ambiguous inputs: "01/02/2024" parses as
/// day/month/year (1 February) because that format comes first.
const DATE_FORMATS: &[&str] = &[
    "%d %b %Y", // 01 Jan 2024
    "%d/%m/%Y", // 01/01/2024
    "%Y-%m-%d", // 2024-01-01
    "%m/%d/%Y", // 01/31/2024
    "%d-%m-%Y", // 01-01-2024
];

/// The format used when writing a donation date (see `format_date`).
const CANONICAL_FORMAT: &str = "%d %b %Y";

/// Parse a free-form date string.
///
/// Tries each supported textual format strictly (calendar overflow such as
/// "32/13/2024" fails), then falls back to interpreting the string as a
/// positive epoch-millisecond timestamp. Returns `None` when nothing
/// matches; this never errors.
#[must_use]
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    // Older clients stored System.currentTimeMillis() directly.
    if let Ok(millis) = s.parse::<i64>() {
        if millis > 0 {
            return DateTime::<Utc>::from_timestamp_millis(millis);
        }
    }

    None
}

/// Render a date in the canonical `dd MMM yyyy` form (e.g. "01 Jan 2024").
#[must_use]
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

/// Today's date in the canonical form, as written when logging a donation.
#[must_use]
pub fn format_today() -> String {
    format_date(Utc::now())
}
