use clap::Subcommand;
use waterline_core::{HydrationPlanner, ProgressSnapshot};

use super::parse_date;

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Show the day's progress snapshot
    Show {
        /// Day to report (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Toggle completion of one reminder and show the updated snapshot
    Toggle {
        /// Reminder identifier (see `schedule list`)
        id: String,
        /// Day the reminder belongs to (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
}

fn print_snapshot(snapshot: &ProgressSnapshot) -> Result<(), Box<dyn std::error::Error>> {
    let report = serde_json::json!({
        "goal_ml": snapshot.goal_ml,
        "consumed_ml": snapshot.consumed_ml,
        "expected_ml": snapshot.expected_ml,
        "on_track": snapshot.on_track(),
        "catch_up_ml": snapshot.catch_up_ml(),
        "progress": snapshot.progress(),
        "expected_progress": snapshot.expected_progress(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn run(action: ProgressAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut planner = HydrationPlanner::open_default()?;
    match action {
        ProgressAction::Show { date } => {
            let date = parse_date(date)?;
            let snapshot = planner.progress(date)?;
            print_snapshot(&snapshot)?;
        }
        ProgressAction::Toggle { id, date } => {
            let date = parse_date(date)?;
            let snapshot = planner.toggle(date, &id)?;
            print_snapshot(&snapshot)?;
        }
    }
    Ok(())
}
