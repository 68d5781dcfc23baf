use chrono::{DateTime, FixedOffset};

/// Port for turning free-text timestamps into instants.
///
/// Two implementations ship: a lenient one that understands many
/// layouts, and a strict ISO-8601 one that always works as fallback.
pub trait DateParser: Send + Sync {
    /// Parse `text`, or `None` if this parser does not understand it.
    fn parse(&self, text: &str) -> Option<DateTime<FixedOffset>>;

    /// Parser name as used in the config file.
    fn name(&self) -> &str;
}
