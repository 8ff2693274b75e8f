pub mod config;
pub mod progress;
pub mod recommend;
pub mod schedule;

use chrono::{NaiveDate, Utc};

/// Parse a `YYYY-MM-DD` date argument, defaulting to today (UTC).
pub fn parse_date(arg: Option<String>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match arg {
        Some(s) => Ok(NaiveDate::parse_from_str(&s, "%Y-%m-%d")?),
        None => Ok(Utc::now().date_naive()),
    }
}
