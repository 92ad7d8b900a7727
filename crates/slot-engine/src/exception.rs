//! Exceptions -- blackout periods that override slot availability.
//!
//! A one-off exception covers an absolute datetime range. A yearly-recurring
//! exception keeps only the month and day of its bounds: for a candidate
//! instant it is projected onto that instant's year, at midnight on both ends.
//!
//! The default projection does not handle spans that cross New Year
//! (e.g. Dec 20 → Jan 5): the projected start lands after the projected end
//! and nothing matches. [`YearlyMatch::WrapAware`] is the separate path that
//! treats such spans as wrapping.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SlotError};

/// How yearly-recurring exceptions are matched against an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum YearlyMatch {
    /// Month/day projected onto the instant's year; wrapping spans never match.
    #[default]
    Projected,
    /// Like `Projected`, but a span whose end falls before its start is read
    /// as running through New Year.
    WrapAware,
}

fn default_active() -> bool {
    true
}

/// A blackout window owned by a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceException {
    /// Unique exception identifier.
    pub id: Uuid,
    /// Owning service.
    pub service_id: Uuid,
    /// Short label shown to providers.
    pub title: String,
    /// Optional longer explanation.
    #[serde(default)]
    pub description: Option<String>,
    /// First covered instant (inclusive).
    pub start_date_time: NaiveDateTime,
    /// Last covered instant (inclusive).
    pub end_date_time: NaiveDateTime,
    /// Free-form category, e.g. "Holiday" or "Maintenance".
    #[serde(default)]
    pub exception_type: String,
    /// Repeat every year on the same month/day bounds.
    #[serde(default)]
    pub recurring_yearly: bool,
    /// When the exception was recorded.
    pub created_at: DateTime<Utc>,
    /// Inactive exceptions never block a slot.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ServiceException {
    /// Whether `instant` falls inside this exception, using the compatible
    /// yearly projection.
    pub fn covers(&self, instant: NaiveDateTime) -> bool {
        self.covers_with(instant, YearlyMatch::Projected)
    }

    /// Whether `instant` falls inside this exception (bounds inclusive).
    pub fn covers_with(&self, instant: NaiveDateTime, mode: YearlyMatch) -> bool {
        if !self.is_active {
            return false;
        }

        if !self.recurring_yearly {
            return self.start_date_time <= instant && instant <= self.end_date_time;
        }

        // Feb 29 does not exist in every year; such a projection matches nothing.
        let Some((start, end)) = self.project_onto(instant.year()) else {
            return false;
        };

        match mode {
            YearlyMatch::Projected => start <= instant && instant <= end,
            YearlyMatch::WrapAware if start <= end => start <= instant && instant <= end,
            YearlyMatch::WrapAware => instant >= start || instant <= end,
        }
    }

    /// The exception's month/day bounds placed at midnight in `year`.
    pub fn project_onto(&self, year: i32) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = NaiveDate::from_ymd_opt(
            year,
            self.start_date_time.month(),
            self.start_date_time.day(),
        )?;
        let end = NaiveDate::from_ymd_opt(year, self.end_date_time.month(), self.end_date_time.day())?;
        Some((start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN)))
    }

    /// Whether this exception can affect any slot starting in `[start, end]`.
    ///
    /// Used to pre-select exceptions for a query window. The check is a
    /// superset of [`ServiceException::covers_with`] for either match mode,
    /// so pre-selection never changes filtering results.
    pub fn applies_to_period(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        if !self.is_active || start > end {
            return false;
        }

        if !self.recurring_yearly {
            return self.start_date_time <= end && self.end_date_time >= start;
        }

        let first = self.start_date_time.month();
        let last = self.end_date_time.month();
        // Compare month/day pairs: Jan 5 -> Jan 3 wraps through every month.
        let wraps = (last, self.end_date_time.day()) < (first, self.start_date_time.day());
        let in_span = |month: u32| {
            if wraps {
                month >= first || month <= last
            } else {
                (first..=last).contains(&month)
            }
        };

        months_touched(start.date(), end.date()).any(in_span)
    }
}

/// Calendar months (1-12) touched by `[start, end]`, at most one full year's worth.
fn months_touched(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = u32> {
    let first = start.with_day(1);
    std::iter::successors(first, |d| d.checked_add_months(Months::new(1)))
        .take_while(move |d| *d <= end)
        .take(12)
        .map(|d| d.month())
}

/// Exception create/update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionRequest {
    /// Required, non-blank label.
    pub title: String,
    /// Optional longer explanation.
    #[serde(default)]
    pub description: Option<String>,
    /// First covered instant (inclusive).
    pub start_date_time: NaiveDateTime,
    /// Last covered instant (inclusive); must not precede the start.
    pub end_date_time: NaiveDateTime,
    /// Free-form category.
    #[serde(default)]
    pub exception_type: String,
    /// Repeat every year on the same month/day bounds.
    #[serde(default)]
    pub recurring_yearly: bool,
}

impl ExceptionRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(SlotError::InvalidException("title is required".to_string()));
        }
        if self.end_date_time < self.start_date_time {
            return Err(SlotError::InvalidException(format!(
                "endDateTime {} is before startDateTime {}",
                self.end_date_time, self.start_date_time
            )));
        }
        Ok(())
    }

    pub fn into_exception(self, service_id: Uuid, now: DateTime<Utc>) -> ServiceException {
        ServiceException {
            id: Uuid::new_v4(),
            service_id,
            title: self.title,
            description: self.description,
            start_date_time: self.start_date_time,
            end_date_time: self.end_date_time,
            exception_type: self.exception_type,
            recurring_yearly: self.recurring_yearly,
            created_at: now,
            is_active: true,
        }
    }

    pub fn apply_to(self, exception: &mut ServiceException) {
        exception.title = self.title;
        exception.description = self.description;
        exception.start_date_time = self.start_date_time;
        exception.end_date_time = self.end_date_time;
        exception.exception_type = self.exception_type;
        exception.recurring_yearly = self.recurring_yearly;
    }
}
