//! Availability patterns -- the recurrence rules that slots are expanded from.
//!
//! A pattern stores its slot type as the raw string it was submitted with.
//! [`AvailabilityPattern::kind`] resolves it to a [`SlotType`]; strings that
//! name no known type resolve to `None` and expand to zero slots.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{Result, SlotError};

/// The closed set of expansion strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotType {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl SlotType {
    /// Case-insensitive lookup of a wire slot type (`"hour"`, `"Hour"`, ...).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "minute" => Some(Self::Minute),
            "hour" => Some(Self::Hour),
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "Minute",
            Self::Hour => "Hour",
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }

    /// Whether the type steps through a time-of-day range on each matching weekday.
    pub fn is_time_based(&self) -> bool {
        matches!(self, Self::Minute | Self::Hour)
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A time-of-day bound, stored as seconds since midnight.
///
/// Unlike `NaiveTime`, the value `24:00:00` is representable so that an
/// end bound can close the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(86_400);

    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self> {
        if hour > 24 || minute >= 60 || second >= 60 {
            return Err(SlotError::InvalidTimeOfDay(format!(
                "{:02}:{:02}:{:02}",
                hour, minute, second
            )));
        }
        let total = hour * 3600 + minute * 60 + second;
        if total > Self::END_OF_DAY.0 {
            return Err(SlotError::InvalidTimeOfDay(format!(
                "{:02}:{:02}:{:02} is past the end of the day",
                hour, minute, second
            )));
        }
        Ok(Self(total))
    }

    pub fn seconds(&self) -> i64 {
        i64::from(self.0)
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    /// Parse `HH:MM` or `HH:MM:SS`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(SlotError::InvalidTimeOfDay(s.to_string()));
        }
        let mut fields = [0u32; 3];
        for (field, part) in fields.iter_mut().zip(&parts) {
            *field = part
                .parse()
                .map_err(|_| SlotError::InvalidTimeOfDay(s.to_string()))?;
        }
        Self::from_hms(fields[0], fields[1], fields[2])
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.0 / 3600,
            (self.0 % 3600) / 60,
            self.0 % 60
        )
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Weekday filter for time-based patterns, indexed 0=Sunday..6=Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaysOfWeek([bool; 7]);

impl DaysOfWeek {
    pub const ALL: DaysOfWeek = DaysOfWeek([true; 7]);

    /// Parse a comma-separated weekday list such as `"1,2,3,4,5"`.
    ///
    /// Tokens that are not integers in `0..=6` are dropped. When nothing
    /// survives (or the list is absent) every day is allowed.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::ALL;
        };

        let mut days = [false; 7];
        let mut any = false;
        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.parse::<usize>() {
                Ok(day) if day < 7 => {
                    days[day] = true;
                    any = true;
                }
                _ => tracing::warn!(token, "ignoring unparseable daysOfWeek entry"),
            }
        }

        if any {
            Self(days)
        } else {
            Self::ALL
        }
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0[weekday.num_days_from_sunday() as usize]
    }

    pub fn is_all(&self) -> bool {
        self.0.iter().all(|d| *d)
    }
}

impl Default for DaysOfWeek {
    fn default() -> Self {
        Self::ALL
    }
}

/// A recurrence rule owned by one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPattern {
    /// Unique pattern identifier.
    pub id: Uuid,
    /// Owning service.
    pub service_id: Uuid,
    /// Slot type as submitted; see [`AvailabilityPattern::kind`].
    pub slot_type: String,
    /// Slot length in minutes. Only Minute and Hour patterns use it.
    pub slot_duration: i32,
    /// Daily opening time; midnight when absent.
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    /// Daily closing time; end of day when absent.
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    /// Comma-separated weekday numbers, 0=Sunday.
    #[serde(default)]
    pub days_of_week: Option<String>,
    /// First date the pattern applies to.
    pub start_date: NaiveDate,
    /// Last date the pattern applies to; open-ended when absent.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// When the pattern was created.
    pub created_at: DateTime<Utc>,
}

impl AvailabilityPattern {
    pub fn kind(&self) -> Option<SlotType> {
        SlotType::parse(&self.slot_type)
    }

    pub fn days(&self) -> DaysOfWeek {
        DaysOfWeek::parse(self.days_of_week.as_deref())
    }

    /// Time-of-day bounds, defaulting to the whole day.
    pub fn time_bounds(&self) -> (TimeOfDay, TimeOfDay) {
        (
            self.start_time.unwrap_or(TimeOfDay::MIDNIGHT),
            self.end_time.unwrap_or(TimeOfDay::END_OF_DAY),
        )
    }
}

/// Pattern create/update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRequest {
    /// Slot type name, matched case-insensitively.
    pub slot_type: String,
    /// Slot length in minutes; must be positive.
    pub slot_duration: i32,
    /// Daily opening time; midnight when absent.
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    /// Daily closing time; end of day when absent.
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    /// Comma-separated weekday numbers, 0=Sunday.
    #[serde(default)]
    pub days_of_week: Option<String>,
    /// First date the pattern applies to.
    pub start_date: NaiveDate,
    /// Last date the pattern applies to; must not precede `start_date`.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl PatternRequest {
    /// Reject bounds that would make the generator silently produce nothing.
    ///
    /// An unrecognized slot type is accepted; it expands to zero slots.
    pub fn validate(&self) -> Result<()> {
        if self.slot_duration <= 0 {
            return Err(SlotError::InvalidPattern(format!(
                "slotDuration must be positive, got {}",
                self.slot_duration
            )));
        }

        let start = self.start_time.unwrap_or(TimeOfDay::MIDNIGHT);
        let end = self.end_time.unwrap_or(TimeOfDay::END_OF_DAY);
        if start > end {
            return Err(SlotError::InvalidPattern(format!(
                "startTime {} is after endTime {}",
                start, end
            )));
        }

        if let Some(end_date) = self.end_date {
            if end_date < self.start_date {
                return Err(SlotError::InvalidPattern(format!(
                    "endDate {} is before startDate {}",
                    end_date, self.start_date
                )));
            }
        }

        if SlotType::parse(&self.slot_type).is_none() {
            tracing::warn!(
                slot_type = %self.slot_type,
                "unrecognized slot type; pattern will generate no slots"
            );
        }

        Ok(())
    }

    /// Build a new pattern for `service_id` with a fresh id.
    pub fn into_pattern(self, service_id: Uuid, now: DateTime<Utc>) -> AvailabilityPattern {
        AvailabilityPattern {
            id: Uuid::new_v4(),
            service_id,
            slot_type: self.slot_type,
            slot_duration: self.slot_duration,
            start_time: self.start_time,
            end_time: self.end_time,
            days_of_week: self.days_of_week,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: now,
        }
    }

    /// Overwrite the rule fields of an existing pattern, keeping its identity.
    pub fn apply_to(self, pattern: &mut AvailabilityPattern) {
        pattern.slot_type = self.slot_type;
        pattern.slot_duration = self.slot_duration;
        pattern.start_time = self.start_time;
        pattern.end_time = self.end_time;
        pattern.days_of_week = self.days_of_week;
        pattern.start_date = self.start_date;
        pattern.end_date = self.end_date;
    }
}
