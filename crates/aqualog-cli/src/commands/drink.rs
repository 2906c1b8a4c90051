use aqualog_core::reminders::notify_goal_reached;
use aqualog_core::storage::{FileStore, ProfileStore};
use aqualog_core::{format_amount, Clock, LedgerStore, SystemClock};
use clap::Subcommand;

use super::parse_container;
use crate::notifier::StoredNotifier;

#[derive(Subcommand)]
pub enum DrinkAction {
    /// Log a drink: a preset container (cup/glass/bottle/jug) or a custom amount
    Add {
        #[arg(default_value = "custom")]
        container: String,
        /// Amount in ml; required for custom, overrides container presets
        #[arg(long)]
        amount: Option<f64>,
    },
    /// Show today's intake record and progress
    Today,
}

pub fn run(action: DrinkAction) -> Result<(), Box<dyn std::error::Error>> {
    let profile = ProfileStore::new(FileStore::open()?).load();
    let ledger = LedgerStore::open(FileStore::open()?);
    let clock = SystemClock;
    let goal_ml = profile.daily_goal.milliliters;

    match action {
        DrinkAction::Add { container, amount } => {
            let container = parse_container(&container)?;
            let amount_ml = amount
                .or_else(|| container.preset_ml())
                .ok_or("custom drinks need --amount <ml>")?;

            let receipt = ledger.record_intake(amount_ml, container, goal_ml, &clock)?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);

            if receipt.goal_reached_now {
                let notifier =
                    StoredNotifier::new(FileStore::open()?, profile.notifications_enabled);
                notify_goal_reached(&notifier)?;
            }
        }
        DrinkAction::Today => {
            let snapshot = ledger.snapshot();
            let today = clock.today();
            let total_ml = snapshot.total_for(today);
            let percent = if goal_ml > 0.0 {
                (total_ml / goal_ml * 100.0).min(100.0)
            } else {
                0.0
            };

            println!(
                "{} / {} ({percent:.0}%)",
                format_amount(total_ml, profile.display_unit),
                format_amount(goal_ml, profile.display_unit),
            );
            if let Some(record) = snapshot.record_for(today) {
                println!("{}", serde_json::to_string_pretty(record)?);
            } else {
                println!("No water intake recorded today");
            }
        }
    }
    Ok(())
}
