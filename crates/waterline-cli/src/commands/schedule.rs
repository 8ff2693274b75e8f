use clap::Subcommand;
use waterline_core::HydrationPlanner;

use super::parse_date;

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Replace the day's water reminders with a fresh allocation
    Set {
        /// Daily liquid target in liters
        #[arg(long)]
        liters: f64,
        /// Day to schedule (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List the day's water reminders
    List {
        /// Day to list (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove the day's water reminders
    Clear {
        /// Day to clear (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut planner = HydrationPlanner::open_default()?;
    match action {
        ScheduleAction::Set { liters, date } => {
            let date = parse_date(date)?;
            let created = planner.schedule_day(liters, date)?;
            println!("scheduled {created} water reminders for {date}");
        }
        ScheduleAction::List { date } => {
            let date = parse_date(date)?;
            let reminders = planner.reminders(date)?;
            println!("{}", serde_json::to_string_pretty(&reminders)?);
        }
        ScheduleAction::Clear { date } => {
            let date = parse_date(date)?;
            let removed = planner.clear_day(date)?;
            println!("removed {removed} water reminders for {date}");
        }
    }
    Ok(())
}
