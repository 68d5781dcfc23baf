use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::core::traits::date_parser::DateParser;

/// ISO-8601 layouts carrying an explicit offset.
const OFFSET_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// ISO-8601 layouts without an offset (read as UTC).
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Strict ISO-8601 parser. Always available.
pub struct IsoDateParser;

impl DateParser for IsoDateParser {
    fn parse(&self, text: &str) -> Option<DateTime<FixedOffset>> {
        parse_iso(text.trim())
    }

    fn name(&self) -> &str {
        "iso"
    }
}

/// Parse an ISO-8601 date or date-time. Naive values are taken as UTC.
pub(crate) fn parse_iso(text: &str) -> Option<DateTime<FixedOffset>> {
    // chrono's %Y accepts any width; ISO-8601 needs YYYY-.
    let bytes = text.as_bytes();
    if bytes.len() < 5 || !bytes[..4].iter().all(u8::is_ascii_digit) || bytes[4] != b'-' {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    OFFSET_LAYOUTS
        .iter()
        .find_map(|layout| DateTime::parse_from_str(text, layout).ok())
        .or_else(|| parse_naive(text, NAIVE_LAYOUTS, &["%Y-%m-%d"]))
}

/// Try naive date-time layouts, then date-only layouts (at midnight).
pub(crate) fn parse_naive(
    text: &str,
    datetime_layouts: &[&str],
    date_layouts: &[&str],
) -> Option<DateTime<FixedOffset>> {
    let naive = datetime_layouts
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .or_else(|| {
            date_layouts
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Some(Utc.from_utc_datetime(&naive).fixed_offset())
}
