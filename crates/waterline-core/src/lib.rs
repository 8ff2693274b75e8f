//! # Waterline Core Library
//!
//! This library provides the core business logic for Waterline, a personal
//! hydration and sleep tracker. It implements a CLI-first philosophy where
//! all operations are available via a standalone CLI binary, with any GUI
//! being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Allocator**: Pure exact-sum allocation of a daily liquid target into
//!   hourly reminder slots
//! - **Progress**: Pure reconciliation of scheduled reminders against
//!   completion state and the current time
//! - **Scheduler**: Day-level orchestration over injected event, completion
//!   and clock abstractions
//! - **Storage**: SQLite-based calendar and completion stores, TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`ReminderAllocator`]: Exact-sum slot allocation
//! - [`HydrationPlanner`]: Schedule / progress / toggle orchestration
//! - [`EventStore`] / [`CompletionStore`]: Storage seams
//! - [`Config`]: Application configuration management

pub mod allocator;
pub mod calendar;
pub mod error;
pub mod progress;
pub mod recommend;
pub mod scheduler;
pub mod storage;

pub use allocator::{allocate_day, ReminderAllocator};
pub use calendar::{water_title, EventStore, ReminderEvent, ReminderSlot, WATER_TITLE_PREFIX};
pub use error::{ConfigError, CoreError, StorageError};
pub use progress::{aggregate, CompletionState, CompletionStore, ProgressSnapshot};
pub use recommend::{
    find_sport, format_hours, recommended_liters, suggested_sleep_hours, Sport, WorkoutIntensity,
    SPORTS,
};
pub use scheduler::{Clock, HydrationPlanner, SystemClock};
pub use storage::{
    CalendarDb, CompletionDb, Config, MemoryCompletionStore, MemoryEventStore,
};
