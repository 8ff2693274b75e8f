use clap::Subcommand;
use waterline_core::{
    find_sport, format_hours, recommended_liters, suggested_sleep_hours, HydrationPlanner,
    WorkoutIntensity, SPORTS,
};

use super::parse_date;

#[derive(Subcommand)]
pub enum RecommendAction {
    /// Suggested nightly sleep for a workout day
    Sleep {
        /// Base sleep goal in hours
        #[arg(long, default_value_t = 8.0)]
        base: f64,
        /// Workout intensity: none, light, moderate or hard
        #[arg(long, default_value = "none")]
        intensity: String,
    },
    /// Recommended water intake for a training session
    Water {
        /// Sport name (see `recommend sports`)
        #[arg(long)]
        sport: String,
        /// Session length in minutes
        #[arg(long)]
        minutes: u32,
        /// Also schedule today's reminders for the recommended amount
        #[arg(long)]
        schedule: bool,
    },
    /// List the sport catalog
    Sports,
}

pub fn run(action: RecommendAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RecommendAction::Sleep { base, intensity } => {
            let intensity: WorkoutIntensity = intensity.parse()?;
            let suggested = suggested_sleep_hours(base, intensity);
            println!("suggested sleep: {}", format_hours(suggested));
        }
        RecommendAction::Water {
            sport,
            minutes,
            schedule,
        } => {
            let sport = find_sport(&sport).ok_or(format!("unknown sport: {sport}"))?;
            let liters = recommended_liters(sport, minutes);
            println!("recommended water: {liters:.1} L ({})", sport.name);
            if schedule {
                let date = parse_date(None)?;
                let mut planner = HydrationPlanner::open_default()?;
                let created = planner.schedule_day(liters, date)?;
                println!("scheduled {created} water reminders for {date}");
            }
        }
        RecommendAction::Sports => {
            println!("{}", serde_json::to_string_pretty(SPORTS)?);
        }
    }
    Ok(())
}
