//! Daily water progress aggregation.
//!
//! Reconciles the day's scheduled reminders against completion state and
//! the current time: how much has been drunk, how much should have been
//! drunk by now under linear pacing, and the day's total goal.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::ReminderEvent;
use crate::error::StorageError;

/// Completed reminder ids for one calendar day.
///
/// Absent ids read as not completed, so stale or foreign identifiers are
/// harmless. State is loaded fresh per day; there is no cross-day carryover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionState {
    completed: HashSet<String>,
}

impl CompletionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from previously persisted ids.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            completed: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    /// Flip one identifier. Returns the new completed state of that id.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.completed.remove(id) {
            false
        } else {
            self.completed.insert(id.to_string());
            true
        }
    }

    /// Completed ids in sorted order, for deterministic persistence.
    pub fn completed_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.completed.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}

/// Per-day completion persistence.
pub trait CompletionStore: Send {
    /// Completion state for `day`; an unknown day loads as empty.
    fn load(&self, day: NaiveDate) -> Result<CompletionState, StorageError>;

    fn save(&mut self, day: NaiveDate, state: &CompletionState) -> Result<(), StorageError>;
}

/// Derived volumes for one day of scheduled reminders.
///
/// Completedness and schedule are independent: `consumed_ml` above
/// `expected_ml` is the "on track" case, the reverse is "behind". Neither
/// is clamped against the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Total target for the day; the configured fallback when no reminders
    /// exist yet.
    pub goal_ml: u32,
    /// Sum over reminders marked completed.
    pub consumed_ml: u32,
    /// Sum over reminders whose start time has passed.
    pub expected_ml: u32,
}

impl ProgressSnapshot {
    pub fn on_track(&self) -> bool {
        self.consumed_ml >= self.expected_ml
    }

    /// Volume still owed to stay on pace.
    pub fn catch_up_ml(&self) -> u32 {
        self.expected_ml.saturating_sub(self.consumed_ml)
    }

    /// Fraction of the goal consumed, in [0, 1].
    pub fn progress(&self) -> f64 {
        fraction(self.consumed_ml, self.goal_ml)
    }

    /// Fraction of the goal that should be consumed by now, in [0, 1].
    pub fn expected_progress(&self) -> f64 {
        fraction(self.expected_ml, self.goal_ml)
    }
}

fn fraction(part: u32, goal: u32) -> f64 {
    (f64::from(part) / f64::from(goal.max(1))).clamp(0.0, 1.0)
}

/// Reconcile the day's reminders against completion state at `now`.
///
/// Pure and total: unknown identifiers read as not completed, and an empty
/// schedule falls back to `fallback_goal_ml` as the goal.
pub fn aggregate(
    events: &[ReminderEvent],
    completion: &CompletionState,
    now: DateTime<Utc>,
    fallback_goal_ml: u32,
) -> ProgressSnapshot {
    let mut snapshot = ProgressSnapshot::default();
    for event in events {
        snapshot.goal_ml += event.amount_ml;
        if completion.is_completed(&event.id) {
            snapshot.consumed_ml += event.amount_ml;
        }
        if event.start_time <= now {
            snapshot.expected_ml += event.amount_ml;
        }
    }
    if snapshot.goal_ml == 0 {
        snapshot.goal_ml = fallback_goal_ml;
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(id: &str, hour: u32, amount_ml: u32) -> ReminderEvent {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
            .and_utc();
        ReminderEvent {
            id: id.to_string(),
            title: crate::calendar::water_title(amount_ml),
            start_time: start,
            end_time: start + Duration::minutes(10),
            amount_ml,
        }
    }

    #[test]
    fn empty_schedule_falls_back_to_goal() {
        let snapshot = aggregate(&[], &CompletionState::new(), Utc::now(), 2000);
        assert_eq!(snapshot.goal_ml, 2000);
        assert_eq!(snapshot.consumed_ml, 0);
        assert_eq!(snapshot.expected_ml, 0);
        assert!(snapshot.on_track());
        assert_eq!(snapshot.progress(), 0.0);
    }

    #[test]
    fn behind_when_past_slots_outweigh_completed() {
        let events = [event("a", 9, 400), event("b", 10, 400), event("c", 11, 400)];
        let completion = CompletionState::from_ids(["a"]);
        // Between the second and third slot starts.
        let now = events[1].start_time + Duration::minutes(30);

        let snapshot = aggregate(&events, &completion, now, 2000);
        assert_eq!(snapshot.goal_ml, 1200);
        assert_eq!(snapshot.expected_ml, 800);
        assert_eq!(snapshot.consumed_ml, 400);
        assert!(!snapshot.on_track());
        assert_eq!(snapshot.catch_up_ml(), 400);
    }

    #[test]
    fn ahead_of_schedule_is_on_track() {
        let events = [event("a", 9, 300), event("b", 15, 300)];
        let completion = CompletionState::from_ids(["a", "b"]);
        let now = events[0].start_time + Duration::minutes(5);

        let snapshot = aggregate(&events, &completion, now, 2000);
        assert_eq!(snapshot.consumed_ml, 600);
        assert_eq!(snapshot.expected_ml, 300);
        assert!(snapshot.on_track());
        assert_eq!(snapshot.catch_up_ml(), 0);
    }

    #[test]
    fn unknown_completion_ids_are_ignored() {
        let events = [event("a", 9, 500)];
        let completion = CompletionState::from_ids(["stale-id-from-yesterday"]);
        let snapshot = aggregate(&events, &completion, Utc::now(), 2000);
        assert_eq!(snapshot.consumed_ml, 0);
    }

    #[test]
    fn fractions_are_clamped_and_zero_goal_safe() {
        let snapshot = ProgressSnapshot {
            goal_ml: 0,
            consumed_ml: 500,
            expected_ml: 0,
        };
        // max(goal, 1) guard: no division by zero, clamped to 1.0.
        assert_eq!(snapshot.progress(), 1.0);
        assert_eq!(snapshot.expected_progress(), 0.0);
    }

    #[test]
    fn toggle_flips_and_reports_state() {
        let mut state = CompletionState::new();
        assert!(state.toggle("x"));
        assert!(state.is_completed("x"));
        assert!(!state.toggle("x"));
        assert!(!state.is_completed("x"));
        assert!(state.is_empty());
    }

    #[test]
    fn completed_ids_are_sorted() {
        let state = CompletionState::from_ids(["b", "a", "c"]);
        assert_eq!(state.completed_ids(), vec!["a", "b", "c"]);
    }
}
