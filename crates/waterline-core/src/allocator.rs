//! Exact-sum allocation of a daily liquid target into hourly reminder slots.
//!
//! Spreads `liters` across one slot per whole hour of the scheduling window.
//! Display amounts are rounded to a configurable increment; whatever the
//! rounding leaves over is absorbed into the final slot, so the slot amounts
//! always sum to the requested total exactly.

use chrono::{Duration, NaiveDate};

use crate::calendar::ReminderSlot;

/// First reminder hour of the default window.
pub const DEFAULT_START_HOUR: u32 = 9;
/// End of the default window (exclusive; last reminder starts at 20:00).
pub const DEFAULT_END_HOUR: u32 = 21;
/// Default rounding granularity for displayed amounts, in ml.
pub const DEFAULT_INCREMENT_ML: u32 = 10;

/// Calendar block length for one reminder, in minutes.
const SLOT_BLOCK_MINUTES: i64 = 10;

/// Allocator for a day's water reminder slots.
#[derive(Debug, Clone)]
pub struct ReminderAllocator {
    start_hour: u32,
    end_hour: u32,
    increment_ml: u32,
}

impl Default for ReminderAllocator {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            increment_ml: DEFAULT_INCREMENT_ML,
        }
    }
}

impl ReminderAllocator {
    /// Create an allocator with the default 9-21 window and 10 ml increment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scheduling window. Hours are clamped to 0-23; an inverted
    /// window is allowed and yields zero slots.
    pub fn with_window(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.start_hour = start_hour.min(23);
        self.end_hour = end_hour.min(23);
        self
    }

    /// Set the rounding increment (minimum 1 ml).
    pub fn with_increment(mut self, increment_ml: u32) -> Self {
        self.increment_ml = increment_ml.max(1);
        self
    }

    /// Number of hourly slots in the window.
    pub fn slot_count(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour)
    }

    /// Allocate `liters` across the window on `date`.
    ///
    /// Returns one slot per whole hour; an empty vec when the window is
    /// inverted or empty. Negative targets clamp to zero, which still
    /// produces a full set of zero-volume slots.
    pub fn allocate(&self, liters: f64, date: NaiveDate) -> Vec<ReminderSlot> {
        let count = self.slot_count() as i64;
        if count == 0 {
            return Vec::new();
        }

        let total_ml = (liters.max(0.0) * 1000.0).round().min(u32::MAX as f64) as i64;
        let inc = i64::from(self.increment_ml.max(1));

        // Floor the first n-1 slots to the increment, put the remainder in
        // the last slot.
        let floored = total_ml / (count * inc) * inc;
        let remainder = (total_ml - floored * (count - 1)).max(0);

        // Round the last slot to the increment, then fold any drift back in
        // so the amounts always sum to the exact target.
        let mut last = (remainder + inc / 2) / inc * inc;
        let drift = total_ml - (floored * (count - 1) + last);
        if drift != 0 {
            last += drift;
        }
        let last = last.max(0);

        let mut slots = Vec::with_capacity(count as usize);
        for i in 0..count {
            let hour = self.start_hour + i as u32;
            let Some(start) = date.and_hms_opt(hour, 0, 0) else {
                continue;
            };
            let start = start.and_utc();
            let amount = if i == count - 1 { last } else { floored };
            slots.push(ReminderSlot {
                start_time: start,
                end_time: start + Duration::minutes(SLOT_BLOCK_MINUTES),
                amount_ml: amount as u32,
            });
        }
        slots
    }
}

/// Convenience function to allocate with the default window and increment.
pub fn allocate_day(liters: f64, date: NaiveDate) -> Vec<ReminderSlot> {
    ReminderAllocator::new().allocate(liters, date)
}
