//! # slot-engine
//!
//! Availability pattern expansion and exception filtering for service bookings.
//!
//! A provider describes when a service can be booked with an
//! [`AvailabilityPattern`] (a recurrence rule such as "hourly slots, 09:00-17:00,
//! Monday to Friday") and blocks out periods with [`ServiceException`]s. The
//! engine expands patterns into concrete [`AvailableSlot`]s and marks each slot
//! available or unavailable against the exceptions.
//!
//! ## Modules
//!
//! - [`pattern`] — Slot types, time-of-day bounds, weekday filters, pattern requests
//! - [`slot`] — Generated slots and their client view
//! - [`generator`] — Pattern + window → list of concrete slots
//! - [`exception`] — Blackout periods, yearly projection, period pre-selection
//! - [`filter`] — Mark slots available/unavailable against exceptions
//! - [`window`] — Default generation and public-view windows
//! - [`schedule`] — In-memory service schedule with regenerate-on-change lifecycle
//! - [`config`] — Engine configuration
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod exception;
pub mod filter;
pub mod generator;
pub mod pattern;
pub mod schedule;
pub mod slot;
pub mod window;

pub use config::EngineConfig;
pub use error::SlotError;
pub use exception::{ExceptionRequest, ServiceException, YearlyMatch};
pub use filter::{filter_slots, filter_slots_with, public_view};
pub use generator::generate_slots;
pub use pattern::{AvailabilityPattern, DaysOfWeek, PatternRequest, SlotType, TimeOfDay};
pub use schedule::ServiceSchedule;
pub use slot::{AvailableSlot, SlotView};
pub use window::Window;
