use chrono::{DateTime, FixedOffset};

use super::iso_parser::{parse_iso, parse_naive};
use crate::core::traits::date_parser::DateParser;

/// Layouts with an offset beyond plain ISO-8601 (git's `--date=iso`).
const OFFSET_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Day-first and textual date-time layouts, read as UTC.
const NAIVE_DATETIME_LAYOUTS: &[&str] = &[
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d %B %Y %H:%M:%S",
];

/// `%y` comes first: `%Y` would read `25` as the year 25.
const DATE_LAYOUTS: &[&str] = &[
    "%d-%m-%y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%B %d %Y",
    "%B %d, %Y",
];

/// Lenient parser for human-entered and tool-generated timestamps.
///
/// Ambiguous numeric dates are read day first: `03-04-2025` is 3 April.
pub struct FlexibleDateParser;

impl DateParser for FlexibleDateParser {
    fn parse(&self, text: &str) -> Option<DateTime<FixedOffset>> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        parse_iso(text)
            .or_else(|| DateTime::parse_from_rfc2822(text).ok())
            .or_else(|| {
                OFFSET_LAYOUTS
                    .iter()
                    .find_map(|layout| DateTime::parse_from_str(text, layout).ok())
            })
            .or_else(|| parse_naive(text, NAIVE_DATETIME_LAYOUTS, DATE_LAYOUTS))
    }

    fn name(&self) -> &str {
        "flexible"
    }
}
