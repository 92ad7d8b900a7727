//! Slot generation -- expands an availability pattern into concrete slots.
//!
//! Each [`SlotType`] has its own expansion strategy:
//!
//! - `Minute` / `Hour`: step through `[startTime, endTime)` in `slotDuration`
//!   minute increments on every date whose weekday passes the pattern's filter.
//! - `Day`: one slot per date, `00:00:00` to `23:59:59`.
//! - `Week`: one slot per Sunday-anchored week, Sunday `00:00:00` to Saturday `23:59:59`.
//! - `Month`: one slot per calendar month, first day `00:00:00` to last day `23:59:59`.
//!
//! Only the time-based types honour `daysOfWeek`, `startTime` and `endTime`.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::pattern::{AvailabilityPattern, SlotType};
use crate::slot::AvailableSlot;

/// Expand `pattern` over the window `[window_start, window_end]`.
///
/// Every returned slot is available; exceptions are applied later by
/// [`crate::filter::filter_slots`]. A pattern whose slot type is not
/// recognized yields an empty list rather than an error.
pub fn generate_slots(
    pattern: &AvailabilityPattern,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Vec<AvailableSlot> {
    let Some(slot_type) = pattern.kind() else {
        tracing::warn!(
            pattern_id = %pattern.id,
            slot_type = %pattern.slot_type,
            "unrecognized slot type, generating no slots"
        );
        return Vec::new();
    };

    let slots = match slot_type {
        SlotType::Minute | SlotType::Hour => {
            expand_time_slots(pattern, slot_type, window_start, window_end)
        }
        SlotType::Day => expand_day_slots(pattern, window_start, window_end),
        SlotType::Week => expand_week_slots(pattern, window_start, window_end),
        SlotType::Month => expand_month_slots(pattern, window_start, window_end),
    };

    tracing::debug!(
        pattern_id = %pattern.id,
        %slot_type,
        %window_start,
        %window_end,
        count = slots.len(),
        "generated slots"
    );

    slots
}

/// Calendar dates from `start` through `end`, inclusive.
fn dates_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn expand_time_slots(
    pattern: &AvailabilityPattern,
    slot_type: SlotType,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Vec<AvailableSlot> {
    let step = i64::from(pattern.slot_duration) * 60;
    if step <= 0 {
        tracing::debug!(
            pattern_id = %pattern.id,
            slot_duration = pattern.slot_duration,
            "non-positive slot duration, generating no slots"
        );
        return Vec::new();
    }

    let days = pattern.days();
    let (open, close) = pattern.time_bounds();
    let (open, close) = (open.seconds(), close.seconds());
    let mut slots = Vec::new();

    for date in dates_between(window_start.date(), window_end.date()) {
        if !days.contains(date.weekday()) {
            continue;
        }

        let day_start = midnight(date);
        let mut cursor = open;
        while cursor < close {
            let end = cursor + step;
            // A slot that would run past the closing bound is dropped, not truncated.
            if end > close {
                break;
            }
            slots.push(AvailableSlot::for_pattern(
                pattern,
                slot_type,
                day_start + Duration::seconds(cursor),
                day_start + Duration::seconds(end),
            ));
            cursor = end;
        }
    }

    slots
}

fn expand_day_slots(
    pattern: &AvailabilityPattern,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Vec<AvailableSlot> {
    dates_between(window_start.date(), window_end.date())
        .map(|date| {
            let start = midnight(date);
            let end = start + Duration::days(1) - Duration::seconds(1);
            AvailableSlot::for_pattern(pattern, SlotType::Day, start, end)
        })
        .collect()
}

fn expand_week_slots(
    pattern: &AvailabilityPattern,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Vec<AvailableSlot> {
    let anchor = window_start.date();
    let days_from_sunday = i64::from(anchor.weekday().num_days_from_sunday());
    let mut week_start = midnight(anchor) - Duration::days(days_from_sunday);
    let week_length = Duration::days(7) - Duration::seconds(1);

    let mut slots = Vec::new();
    while week_start <= window_end {
        slots.push(AvailableSlot::for_pattern(
            pattern,
            SlotType::Week,
            week_start,
            week_start + week_length,
        ));
        week_start += Duration::days(7);
    }

    slots
}

fn expand_month_slots(
    pattern: &AvailabilityPattern,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Vec<AvailableSlot> {
    let mut slots = Vec::new();
    let Some(first) = window_start.date().with_day(1) else {
        return slots;
    };

    let mut month_start = midnight(first);
    while month_start <= window_end {
        let Some(next) = month_start.checked_add_months(Months::new(1)) else {
            break;
        };
        slots.push(AvailableSlot::for_pattern(
            pattern,
            SlotType::Month,
            month_start,
            next - Duration::seconds(1),
        ));
        month_start = next;
    }

    slots
}
