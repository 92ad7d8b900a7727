//! Exception filtering -- marks slots available or unavailable.
//!
//! Only the slot's start instant is tested against each exception. A slot
//! that begins before an exception and runs into it stays available.

use crate::exception::{ServiceException, YearlyMatch};
use crate::slot::AvailableSlot;

/// Recompute `is_available` for every slot against `exceptions`.
///
/// Returns one slot per input slot, in input order. A slot is unavailable when
/// any exception covers its start; otherwise it is available.
pub fn filter_slots(slots: &[AvailableSlot], exceptions: &[ServiceException]) -> Vec<AvailableSlot> {
    filter_slots_with(slots, exceptions, YearlyMatch::Projected)
}

/// [`filter_slots`] with an explicit yearly-exception match mode.
pub fn filter_slots_with(
    slots: &[AvailableSlot],
    exceptions: &[ServiceException],
    mode: YearlyMatch,
) -> Vec<AvailableSlot> {
    slots
        .iter()
        .map(|slot| {
            let blocked = exceptions
                .iter()
                .any(|e| e.covers_with(slot.start_date_time, mode));
            AvailableSlot {
                is_available: !blocked,
                ..slot.clone()
            }
        })
        .collect()
}

/// The public projection: available slots only, ascending by start.
pub fn public_view(
    slots: &[AvailableSlot],
    exceptions: &[ServiceException],
    mode: YearlyMatch,
) -> Vec<AvailableSlot> {
    let mut open: Vec<AvailableSlot> = filter_slots_with(slots, exceptions, mode)
        .into_iter()
        .filter(|s| s.is_available)
        .collect();
    open.sort_by_key(|s| s.start_date_time);
    open
}
