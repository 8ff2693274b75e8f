//! Day-level orchestration: allocate, persist, reconcile.
//!
//! [`HydrationPlanner`] wires the pure allocator and aggregator to injected
//! stores. Scheduling replaces the day's water reminders rather than
//! appending, so re-running it is idempotent: at most one full reminder set
//! exists per day.

use chrono::{DateTime, NaiveDate, Utc};

use crate::allocator::ReminderAllocator;
use crate::calendar::{EventStore, ReminderEvent, WATER_TITLE_PREFIX};
use crate::error::Result;
use crate::progress::{aggregate, CompletionStore, ProgressSnapshot};
use crate::storage::{CalendarDb, CompletionDb, Config};

/// Source of the current time, injected so progress is testable at a fixed
/// instant.
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fallback daily goal when nothing is scheduled yet, in ml.
pub const DEFAULT_FALLBACK_GOAL_ML: u32 = 2000;

/// Planner over an event store, a completion store and a clock.
pub struct HydrationPlanner<E, C, K = SystemClock> {
    events: E,
    completions: C,
    clock: K,
    allocator: ReminderAllocator,
    fallback_goal_ml: u32,
}

impl HydrationPlanner<CalendarDb, CompletionDb, SystemClock> {
    /// Planner over the on-disk stores, tuned from the saved config.
    pub fn open_default() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::new(
            CalendarDb::open()?,
            CompletionDb::open()?,
            SystemClock,
        )
        .with_allocator(config.allocator())
        .with_fallback_goal(config.fallback_goal_ml()))
    }
}

impl<E: EventStore, C: CompletionStore, K: Clock> HydrationPlanner<E, C, K> {
    pub fn new(events: E, completions: C, clock: K) -> Self {
        Self {
            events,
            completions,
            clock,
            allocator: ReminderAllocator::new(),
            fallback_goal_ml: DEFAULT_FALLBACK_GOAL_ML,
        }
    }

    pub fn with_allocator(mut self, allocator: ReminderAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    pub fn with_fallback_goal(mut self, fallback_goal_ml: u32) -> Self {
        self.fallback_goal_ml = fallback_goal_ml;
        self
    }

    /// Replace the day's water reminders with a fresh allocation for
    /// `liters`. Returns the number of events created.
    pub fn schedule_day(&mut self, liters: f64, date: NaiveDate) -> Result<usize> {
        let slots = self.allocator.allocate(liters, date);
        let created = self.events.replace_events(date, &slots)?;
        log::debug!("scheduled {created} water reminders for {date}");
        Ok(created)
    }

    /// Remove the day's water reminders. Returns the number removed.
    pub fn clear_day(&mut self, date: NaiveDate) -> Result<usize> {
        let removed = self
            .events
            .remove_events_matching(date, WATER_TITLE_PREFIX)?;
        log::debug!("removed {removed} water reminders for {date}");
        Ok(removed)
    }

    /// The day's water reminders, ordered by start time.
    pub fn reminders(&self, date: NaiveDate) -> Result<Vec<ReminderEvent>> {
        let events = self.events.list_events(date)?;
        Ok(events
            .into_iter()
            .filter(ReminderEvent::is_water_reminder)
            .collect())
    }

    /// Progress for `date` at the clock's current time.
    pub fn progress(&self, date: NaiveDate) -> Result<ProgressSnapshot> {
        let reminders = self.reminders(date)?;
        let completion = self.completions.load(date)?;
        Ok(aggregate(
            &reminders,
            &completion,
            self.clock.now(),
            self.fallback_goal_ml,
        ))
    }

    /// Flip completion of one reminder and return the refreshed snapshot.
    pub fn toggle(&mut self, date: NaiveDate, id: &str) -> Result<ProgressSnapshot> {
        let mut completion = self.completions.load(date)?;
        let completed = completion.toggle(id);
        self.completions.save(date, &completion)?;
        log::debug!("reminder {id} on {date} marked completed={completed}");
        self.progress(date)
    }
}
