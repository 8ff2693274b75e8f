//! Sleep and hydration recommendations.
//!
//! Small derived quantities the UI surfaces next to the schedule: a
//! suggested nightly sleep goal adjusted for workout intensity, and a
//! per-sport water intake recommendation that can feed straight into the
//! day's reminder allocation.

use serde::{Deserialize, Serialize};

/// Lower bound on a configurable base sleep goal, in hours.
const MIN_SLEEP_HOURS: f64 = 7.0;
/// Upper bound on any suggested sleep goal, in hours.
const MAX_SLEEP_HOURS: f64 = 10.0;

/// Intensity of the day's workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutIntensity {
    None,
    Light,
    Moderate,
    Hard,
}

impl WorkoutIntensity {
    /// Extra sleep recommended after a workout of this intensity, in hours.
    pub fn sleep_bonus_hours(self) -> f64 {
        match self {
            WorkoutIntensity::None => 0.0,
            WorkoutIntensity::Light => 0.25,
            WorkoutIntensity::Moderate => 0.75,
            WorkoutIntensity::Hard => 1.25,
        }
    }
}

impl std::str::FromStr for WorkoutIntensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(WorkoutIntensity::None),
            "light" => Ok(WorkoutIntensity::Light),
            "moderate" => Ok(WorkoutIntensity::Moderate),
            "hard" => Ok(WorkoutIntensity::Hard),
            other => Err(format!(
                "unknown intensity '{other}' (expected none, light, moderate or hard)"
            )),
        }
    }
}

/// Suggested nightly sleep: the base goal clamped to 7-10 h plus the
/// intensity bonus, capped at 10 h.
pub fn suggested_sleep_hours(base_hours: f64, intensity: WorkoutIntensity) -> f64 {
    let base = base_hours.clamp(MIN_SLEEP_HOURS, MAX_SLEEP_HOURS);
    (base + intensity.sleep_bonus_hours()).min(MAX_SLEEP_HOURS)
}

/// Render fractional hours as "8h 15m" / "9h".
pub fn format_hours(total_hours: f64) -> String {
    let hours = total_hours.trunc() as i64;
    let minutes = ((total_hours - total_hours.trunc()) * 60.0).round() as i64;
    if minutes == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {minutes}m")
    }
}

/// A sport with its hydration rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sport {
    pub name: &'static str,
    /// Recommended intake while practicing, liters per hour.
    pub liters_per_hour: f64,
}

/// Built-in sport catalog.
pub const SPORTS: &[Sport] = &[
    Sport { name: "Running", liters_per_hour: 0.8 },
    Sport { name: "Cycling", liters_per_hour: 0.7 },
    Sport { name: "Swimming", liters_per_hour: 1.0 },
    Sport { name: "Soccer", liters_per_hour: 0.9 },
    Sport { name: "Basketball", liters_per_hour: 0.9 },
    Sport { name: "Tennis", liters_per_hour: 0.8 },
    Sport { name: "Strength Training", liters_per_hour: 0.6 },
    Sport { name: "Yoga", liters_per_hour: 0.4 },
    Sport { name: "HIIT", liters_per_hour: 1.1 },
];

/// Look up a catalog sport by name, case-insensitively.
pub fn find_sport(name: &str) -> Option<&'static Sport> {
    SPORTS
        .iter()
        .find(|sport| sport.name.eq_ignore_ascii_case(name))
}

/// Recommended intake for a session, rounded to 0.1 L.
pub fn recommended_liters(sport: &Sport, duration_min: u32) -> f64 {
    let hours = f64::from(duration_min) / 60.0;
    (sport.liters_per_hour * hours * 10.0).round() / 10.0
}
