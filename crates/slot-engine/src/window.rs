//! Generation and query windows.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::pattern::AvailabilityPattern;
use crate::slot::AvailableSlot;

/// An inclusive `[start, end]` datetime range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Window start (inclusive).
    pub start: NaiveDateTime,
    /// Window end (inclusive).
    pub end: NaiveDateTime,
}

impl Window {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Midnight of `start` through midnight of `end`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// The window a pattern's slots are generated over.
///
/// Bounded patterns use their own date range. Open-ended ones run from their
/// start date to `now` plus the configured horizon.
pub fn generation_window(
    pattern: &AvailabilityPattern,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Window {
    let start = pattern.start_date.and_time(NaiveTime::MIN);
    let end = match pattern.end_date {
        Some(end_date) => end_date.and_time(NaiveTime::MIN),
        None => {
            let now = now.naive_utc();
            now.checked_add_months(Months::new(config.horizon_months))
                .unwrap_or(now)
        }
    };
    Window::new(start, end)
}

/// The public view window: today at midnight through `publicWindowDays` later,
/// clamped to the last representable date.
pub fn public_window(today: NaiveDate, config: &EngineConfig) -> Window {
    let end = today
        .checked_add_signed(Duration::days(i64::from(config.public_window_days)))
        .unwrap_or(NaiveDate::MAX);
    Window::from_dates(today, end)
}

/// Slots whose start falls inside `window`, ascending by start.
pub fn slots_in_window(slots: &[AvailableSlot], window: Window) -> Vec<AvailableSlot> {
    let mut selected: Vec<AvailableSlot> = slots
        .iter()
        .filter(|s| s.starts_within(window.start, window.end))
        .cloned()
        .collect();
    selected.sort_by_key(|s| s.start_date_time);
    selected
}
