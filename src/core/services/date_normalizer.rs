use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::core::models::filter_window::FilterWindow;
use crate::core::traits::date_parser::DateParser;

/// Turns heterogeneous timestamp strings into comparable instants and
/// decides whether they fall inside a filter window.
///
/// The lenient parser is optional. Without it, `normalize` passes values
/// through untouched and `parse_flexible` relies on the strict parser.
pub struct DateNormalizer {
    flexible: Option<Box<dyn DateParser>>,
    strict: Box<dyn DateParser>,
}

impl DateNormalizer {
    pub fn new(strict: Box<dyn DateParser>, flexible: Option<Box<dyn DateParser>>) -> Self {
        Self { flexible, strict }
    }

    /// Best-effort RFC 3339 rendering of `raw`. Never fails: input that
    /// cannot be parsed is returned as is.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        let text = with_dashes(raw);
        self.flexible
            .as_ref()
            .and_then(|parser| parser.parse(&text))
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            .unwrap_or_else(|| raw.to_string())
    }

    /// Parse free text, accepting `/` as a date separator.
    pub fn parse_flexible(&self, text: &str) -> Option<DateTime<FixedOffset>> {
        let text = with_dashes(text);
        self.flexible
            .as_ref()
            .and_then(|parser| parser.parse(&text))
            .or_else(|| self.strict.parse(&text))
    }

    /// Whether `timestamp` passes `window`.
    ///
    /// Under an active window, empty and unparseable timestamps are
    /// dropped.
    pub fn in_range(&self, timestamp: &str, window: &FilterWindow) -> bool {
        if !window.is_active() {
            return true;
        }
        if timestamp.is_empty() {
            return false;
        }
        match self.parse_flexible(timestamp) {
            Some(instant) => window.contains(instant),
            None => false,
        }
    }
}

fn with_dashes(text: &str) -> String {
    text.replace('/', "-")
}
