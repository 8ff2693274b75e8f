//! Reminder event shapes and the calendar-equivalent event store seam.
//!
//! The allocator produces [`ReminderSlot`]s without identity; an
//! [`EventStore`] persists them and mints stable identifiers on insert.
//! Water reminders share a calendar with arbitrary other events, so
//! ownership is tracked through a stable title prefix rather than ids.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Display-title prefix marking events owned by the water schedule.
/// Replacement and cleanup match on this prefix.
pub const WATER_TITLE_PREFIX: &str = "Waterline: Drink";

/// Build the display title for a reminder of `amount_ml`.
pub fn water_title(amount_ml: u32) -> String {
    format!("{WATER_TITLE_PREFIX} {amount_ml} ml")
}

/// One allocated reminder slot, before the store has minted an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSlot {
    pub start_time: DateTime<Utc>,
    /// `start_time` + 10 minutes; only used to draw a calendar block.
    pub end_time: DateTime<Utc>,
    /// Rounded display volume for this slot.
    pub amount_ml: u32,
}

/// A persisted reminder event.
///
/// `id` is opaque and stable per event; it is the key for completion
/// tracking and is minted by the event store, never by the allocator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderEvent {
    pub id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub amount_ml: u32,
}

impl ReminderEvent {
    /// Materialize a slot under a freshly minted identifier.
    pub fn from_slot(id: String, slot: &ReminderSlot) -> Self {
        Self {
            id,
            title: water_title(slot.amount_ml),
            start_time: slot.start_time,
            end_time: slot.end_time,
            amount_ml: slot.amount_ml,
        }
    }

    /// Whether this event belongs to the water schedule.
    pub fn is_water_reminder(&self) -> bool {
        self.title.starts_with(WATER_TITLE_PREFIX)
    }
}

/// Calendar-equivalent store the planner writes reminder sets through.
///
/// `replace_events` must remove prior same-day entries matching the water
/// title prefix before inserting the new set, so repeated scheduling of one
/// day never accumulates duplicates. A store that cannot replace atomically
/// must leave the removal retryable via `remove_events_matching`.
pub trait EventStore: Send {
    /// Events for `day`, ordered by start time.
    fn list_events(&self, day: NaiveDate) -> Result<Vec<ReminderEvent>, StorageError>;

    /// Replace the day's water reminders with `slots`. Returns the number
    /// of events created.
    fn replace_events(
        &mut self,
        day: NaiveDate,
        slots: &[ReminderSlot],
    ) -> Result<usize, StorageError>;

    /// Remove the day's events whose title starts with `title_prefix`.
    /// Returns the number of events removed.
    fn remove_events_matching(
        &mut self,
        day: NaiveDate,
        title_prefix: &str,
    ) -> Result<usize, StorageError>;
}
