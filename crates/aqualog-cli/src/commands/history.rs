use aqualog_core::history::{
    monthly_view, next_month, next_week, period_stats, previous_month, previous_week,
    start_of_week, week_range_label, weekly_view,
};
use aqualog_core::storage::{FileStore, ProfileStore};
use aqualog_core::{Clock, LedgerStore, SystemClock};
use chrono::Datelike;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Weekly view; offset navigates whole weeks (-1 = last week)
    Week {
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    /// Monthly view; offset navigates calendar months (-1 = last month)
    Month {
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let profile = ProfileStore::new(FileStore::open()?).load();
    let ledger = LedgerStore::open(FileStore::open()?).snapshot();
    let today = SystemClock.today();
    let goal_ml = profile.daily_goal.milliliters;

    match action {
        HistoryAction::Week { offset } => {
            let mut week_start = start_of_week(today);
            for _ in 0..offset.abs() {
                week_start = if offset < 0 {
                    previous_week(week_start)
                } else {
                    next_week(week_start)
                };
            }

            let entries = weekly_view(&ledger, week_start, goal_ml, today);
            let stats = period_stats(&entries, goal_ml);
            println!("{}", week_range_label(week_start));
            println!("{}", serde_json::to_string_pretty(&entries)?);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        HistoryAction::Month { offset } => {
            let (mut year, mut month) = (today.year(), today.month());
            for _ in 0..offset.abs() {
                (year, month) = if offset < 0 {
                    previous_month(year, month)
                } else {
                    next_month(year, month)
                };
            }

            let entries = monthly_view(&ledger, year, month, goal_ml, today);
            let stats = period_stats(&entries, goal_ml);
            println!("{year}-{month:02}");
            println!("{}", serde_json::to_string_pretty(&entries)?);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
