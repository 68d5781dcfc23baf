use chrono::{DateTime, FixedOffset};

/// Length of a "month" for `--months-back`.
pub const DAYS_PER_MONTH: i64 = 30;

/// Inclusive time window applied to every collected event.
///
/// A window with neither bound set keeps everything, including events
/// without a timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterWindow {
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

impl FilterWindow {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// `[now - months * 30 days, open end)`.
    pub fn months_back(now: DateTime<FixedOffset>, months: u32) -> Self {
        Self {
            start: Some(now - chrono::Duration::days(DAYS_PER_MONTH * i64::from(months))),
            end: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Inclusive on both bounds.
    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        if let Some(start) = self.start
            && instant < start
        {
            return false;
        }
        if let Some(end) = self.end
            && instant > end
        {
            return false;
        }
        true
    }
}

/// What the user asked for on the command line.
///
/// When both are given, the explicit range wins and `months_back` is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowRequest {
    pub months_back: Option<u32>,
    pub date_range: Option<(String, String)>,
}
