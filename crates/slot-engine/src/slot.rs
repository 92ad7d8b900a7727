//! Concrete bookable intervals derived from patterns.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pattern::{AvailabilityPattern, SlotType};

/// One bookable interval. Slots are derived from a pattern and never edited
/// by hand; `is_available` is recomputed against exceptions on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlot {
    /// Unique slot identifier.
    pub id: Uuid,
    /// Service the slot belongs to.
    pub service_id: Uuid,
    /// Pattern the slot was generated from.
    pub pattern_id: Uuid,
    /// Slot start.
    pub start_date_time: NaiveDateTime,
    /// Slot end.
    pub end_date_time: NaiveDateTime,
    /// Expansion strategy that produced the slot.
    pub slot_type: SlotType,
    /// False when an exception covers the slot's start.
    pub is_available: bool,
    /// When the slot was generated.
    pub created_at: DateTime<Utc>,
}

impl AvailableSlot {
    /// A fresh, available slot for `pattern`.
    pub fn for_pattern(
        pattern: &AvailabilityPattern,
        slot_type: SlotType,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            service_id: pattern.service_id,
            pattern_id: pattern.id,
            start_date_time: start,
            end_date_time: end,
            slot_type,
            is_available: true,
            created_at: Utc::now(),
        }
    }

    /// Whether the slot starts inside `[start, end]`.
    pub fn starts_within(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_date_time >= start && self.start_date_time <= end
    }
}

/// The slot representation returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    /// Slot identifier, for booking.
    pub id: Uuid,
    /// Slot start.
    pub start_date_time: NaiveDateTime,
    /// Slot end.
    pub end_date_time: NaiveDateTime,
    /// Expansion strategy that produced the slot.
    pub slot_type: SlotType,
    /// Whether the slot can be booked.
    pub is_available: bool,
}

impl From<&AvailableSlot> for SlotView {
    fn from(s: &AvailableSlot) -> Self {
        Self {
            id: s.id,
            start_date_time: s.start_date_time,
            end_date_time: s.end_date_time,
            slot_type: s.slot_type,
            is_available: s.is_available,
        }
    }
}
