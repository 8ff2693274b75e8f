mod config;
pub mod calendar_db;
pub mod completion_db;
pub mod memory;

pub use calendar_db::CalendarDb;
pub use completion_db::CompletionDb;
pub use config::{Config, SleepConfig, WaterConfig};
pub use memory::{MemoryCompletionStore, MemoryEventStore};

use std::path::PathBuf;

/// Returns `~/.config/waterline[-dev]/` based on WATERLINE_ENV.
///
/// Set WATERLINE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WATERLINE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("waterline-dev")
    } else {
        base_dir.join("waterline")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
