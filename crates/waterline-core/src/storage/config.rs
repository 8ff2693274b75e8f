//! TOML-based application configuration.
//!
//! Stores the hydration target, the scheduling window and the sleep goal.
//! Configuration lives at `~/.config/waterline/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::allocator::ReminderAllocator;
use crate::error::ConfigError;

/// Water scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterConfig {
    /// Daily liquid target in liters.
    #[serde(default = "default_goal_liters")]
    pub goal_liters: f64,
    /// First reminder hour (0-23).
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    /// End of the reminder window, exclusive (0-23).
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
    /// Rounding granularity for displayed amounts, in ml.
    #[serde(default = "default_increment_ml")]
    pub increment_ml: u32,
}

/// Sleep goal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepConfig {
    /// Nightly sleep goal in hours.
    #[serde(default = "default_sleep_hours")]
    pub goal_hours: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/waterline/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub water: WaterConfig,
    #[serde(default)]
    pub sleep: SleepConfig,
}

// Default functions
fn default_goal_liters() -> f64 {
    2.0
}
fn default_start_hour() -> u32 {
    9
}
fn default_end_hour() -> u32 {
    21
}
fn default_increment_ml() -> u32 {
    10
}
fn default_sleep_hours() -> f64 {
    8.0
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            goal_liters: default_goal_liters(),
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            increment_ml: default_increment_ml(),
        }
    }
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            goal_hours: default_sleep_hours(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            water: WaterConfig::default(),
            sleep: SleepConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    ConfigError::ParseFailed(format!(
                                        "cannot parse '{value}' as number"
                                    ))
                                })?
                        } else {
                            return Err(ConfigError::ParseFailed(format!(
                                "cannot parse '{value}' as number"
                            )));
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the default on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path,
                        message: e.to_string(),
                    })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error. Never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        self.save()?;
        Ok(())
    }

    /// Allocator tuned from the water section.
    pub fn allocator(&self) -> ReminderAllocator {
        ReminderAllocator::new()
            .with_window(self.water.start_hour, self.water.end_hour)
            .with_increment(self.water.increment_ml)
    }

    /// Daily goal in ml, used as the aggregation fallback when no
    /// reminders are scheduled.
    pub fn fallback_goal_ml(&self) -> u32 {
        (self.water.goal_liters.max(0.0) * 1000.0).round() as u32
    }
}
