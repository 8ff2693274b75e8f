//! In-process stores, for tests and for embedding without SQLite.
//!
//! Behave like the SQLite stores, including identifier minting, so a
//! planner can be swapped between the two without observable difference.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::calendar::{EventStore, ReminderEvent, ReminderSlot, WATER_TITLE_PREFIX};
use crate::error::StorageError;
use crate::progress::{CompletionState, CompletionStore};

/// Event store backed by a per-day map.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    days: HashMap<NaiveDate, Vec<ReminderEvent>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for MemoryEventStore {
    fn list_events(&self, day: NaiveDate) -> Result<Vec<ReminderEvent>, StorageError> {
        let mut events = self.days.get(&day).cloned().unwrap_or_default();
        events.sort_by_key(|e| e.start_time);
        Ok(events)
    }

    fn replace_events(
        &mut self,
        day: NaiveDate,
        slots: &[ReminderSlot],
    ) -> Result<usize, StorageError> {
        let events = self.days.entry(day).or_default();
        events.retain(|e| !e.title.starts_with(WATER_TITLE_PREFIX));
        for slot in slots {
            events.push(ReminderEvent::from_slot(Uuid::new_v4().to_string(), slot));
        }
        events.sort_by_key(|e| e.start_time);
        Ok(slots.len())
    }

    fn remove_events_matching(
        &mut self,
        day: NaiveDate,
        title_prefix: &str,
    ) -> Result<usize, StorageError> {
        let Some(events) = self.days.get_mut(&day) else {
            return Ok(0);
        };
        let before = events.len();
        events.retain(|e| !e.title.starts_with(title_prefix));
        Ok(before - events.len())
    }
}

/// Completion store backed by a per-day map.
#[derive(Debug, Default)]
pub struct MemoryCompletionStore {
    days: HashMap<NaiveDate, CompletionState>,
}

impl MemoryCompletionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompletionStore for MemoryCompletionStore {
    fn load(&self, day: NaiveDate) -> Result<CompletionState, StorageError> {
        Ok(self.days.get(&day).cloned().unwrap_or_default())
    }

    fn save(&mut self, day: NaiveDate, state: &CompletionState) -> Result<(), StorageError> {
        self.days.insert(day, state.clone());
        Ok(())
    }
}
