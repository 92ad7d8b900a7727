//! In-memory schedule for a single service.
//!
//! Holds the service's patterns, the slots generated from them, and its
//! exceptions. Every pattern create or update regenerates that pattern's slots
//! from scratch (delete, then recreate) over its generation window. Queries
//! re-run the exception filter, so slot availability is never stored as final.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{Result, SlotError};
use crate::exception::{ExceptionRequest, ServiceException};
use crate::filter;
use crate::generator::generate_slots;
use crate::pattern::{AvailabilityPattern, PatternRequest};
use crate::slot::AvailableSlot;
use crate::window::{self, Window};

#[derive(Debug, Clone)]
pub struct ServiceSchedule {
    service_id: Uuid,
    config: EngineConfig,
    patterns: Vec<AvailabilityPattern>,
    slots: Vec<AvailableSlot>,
    exceptions: Vec<ServiceException>,
}

impl ServiceSchedule {
    pub fn new(service_id: Uuid, config: EngineConfig) -> Self {
        Self {
            service_id,
            config,
            patterns: Vec::new(),
            slots: Vec::new(),
            exceptions: Vec::new(),
        }
    }

    pub fn service_id(&self) -> Uuid {
        self.service_id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn patterns(&self) -> &[AvailabilityPattern] {
        &self.patterns
    }

    /// All stored slots, as generated (availability not yet filtered).
    pub fn slots(&self) -> &[AvailableSlot] {
        &self.slots
    }

    pub fn exceptions(&self) -> &[ServiceException] {
        &self.exceptions
    }

    pub fn pattern(&self, id: Uuid) -> Option<&AvailabilityPattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    // ── Patterns ────────────────────────────────────────────────────────────

    /// Validate and store a new pattern, then generate its slots.
    pub fn add_pattern(&mut self, request: PatternRequest, now: DateTime<Utc>) -> Result<Uuid> {
        request.validate()?;
        let pattern = request.into_pattern(self.service_id, now);
        let id = pattern.id;
        self.patterns.push(pattern);

        let count = self.regenerate(id, now)?;
        tracing::info!(service_id = %self.service_id, pattern_id = %id, slots = count, "pattern created");
        Ok(id)
    }

    /// Replace a pattern's rule and regenerate its slots.
    pub fn update_pattern(
        &mut self,
        id: Uuid,
        request: PatternRequest,
        now: DateTime<Utc>,
    ) -> Result<()> {
        request.validate()?;
        let pattern = self
            .patterns
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(SlotError::PatternNotFound(id))?;
        request.apply_to(pattern);

        let count = self.regenerate(id, now)?;
        tracing::info!(service_id = %self.service_id, pattern_id = %id, slots = count, "pattern updated");
        Ok(())
    }

    /// Drop the pattern's slots and expand it again over its generation window.
    ///
    /// Returns the number of slots generated.
    pub fn regenerate(&mut self, id: Uuid, now: DateTime<Utc>) -> Result<usize> {
        let pattern = self.pattern(id).ok_or(SlotError::PatternNotFound(id))?;
        let window = window::generation_window(pattern, now, &self.config);
        let fresh = generate_slots(pattern, window.start, window.end);
        let count = fresh.len();

        self.slots.retain(|s| s.pattern_id != id);
        self.slots.extend(fresh);

        tracing::debug!(pattern_id = %id, start = %window.start, end = %window.end, count, "regenerated slots");
        Ok(count)
    }

    /// Remove a pattern and every slot generated from it.
    pub fn remove_pattern(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .patterns
            .iter()
            .position(|p| p.id == id)
            .ok_or(SlotError::PatternNotFound(id))?;

        self.slots.retain(|s| s.pattern_id != id);
        self.patterns.remove(index);
        tracing::info!(service_id = %self.service_id, pattern_id = %id, "pattern removed");
        Ok(())
    }

    // ── Exceptions ──────────────────────────────────────────────────────────

    pub fn add_exception(&mut self, request: ExceptionRequest, now: DateTime<Utc>) -> Result<Uuid> {
        request.validate()?;
        let exception = request.into_exception(self.service_id, now);
        let id = exception.id;
        tracing::info!(
            service_id = %self.service_id,
            exception_id = %id,
            recurring_yearly = exception.recurring_yearly,
            "exception added"
        );
        self.exceptions.push(exception);
        Ok(id)
    }

    pub fn update_exception(&mut self, id: Uuid, request: ExceptionRequest) -> Result<()> {
        request.validate()?;
        let exception = self
            .exceptions
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(SlotError::ExceptionNotFound(id))?;
        request.apply_to(exception);
        Ok(())
    }

    pub fn remove_exception(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .exceptions
            .iter()
            .position(|e| e.id == id)
            .ok_or(SlotError::ExceptionNotFound(id))?;
        self.exceptions.remove(index);
        tracing::info!(service_id = %self.service_id, exception_id = %id, "exception removed");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// Exceptions that can affect slots starting inside `window`.
    pub fn exceptions_for(&self, window: Window) -> Vec<ServiceException> {
        self.exceptions
            .iter()
            .filter(|e| e.applies_to_period(window.start, window.end))
            .cloned()
            .collect()
    }

    /// Every slot starting in `[start, end]`, ascending, with availability
    /// recomputed against the service's exceptions.
    pub fn availability(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<AvailableSlot> {
        let window = Window::new(start, end);
        let slots = window::slots_in_window(&self.slots, window);
        let exceptions = self.exceptions_for(window);
        filter::filter_slots_with(&slots, &exceptions, self.config.yearly_match)
    }

    /// The public view: available slots from today through the public window.
    pub fn public_slots(&self, today: NaiveDate) -> Vec<AvailableSlot> {
        let window = window::public_window(today, &self.config);
        let slots = window::slots_in_window(&self.slots, window);
        let exceptions = self.exceptions_for(window);
        filter::public_view(&slots, &exceptions, self.config.yearly_match)
    }
}
