use aqualog_core::reminders::{compute_reminder_times, REMINDER_TITLE};
use aqualog_core::storage::{FileStore, ProfileStore};
use aqualog_core::{Notifier, ReminderScheduler};
use clap::Subcommand;

use super::parse_policy;
use crate::notifier::StoredNotifier;

#[derive(Subcommand)]
pub enum RemindAction {
    /// Print the computed reminder times without installing anything
    Preview {
        /// evenly-spaced or fixed-interval
        #[arg(long, default_value = "evenly-spaced")]
        policy: String,
    },
    /// Replace the installed reminder schedule
    Install {
        /// evenly-spaced or fixed-interval
        #[arg(long, default_value = "evenly-spaced")]
        policy: String,
    },
    /// Show the currently installed reminders
    Show,
    /// Send an immediate test notification
    Test,
}

pub fn run(action: RemindAction) -> Result<(), Box<dyn std::error::Error>> {
    let profile = ProfileStore::new(FileStore::open()?).load();

    match action {
        RemindAction::Preview { policy } => {
            let times = compute_reminder_times(
                profile.wake_time,
                profile.bed_time,
                profile.reminder_frequency_hours,
                parse_policy(&policy)?,
            );
            for time in times {
                println!("{time}");
            }
        }
        RemindAction::Install { policy } => {
            let mut notifier =
                StoredNotifier::new(FileStore::open()?, profile.notifications_enabled);
            let scheduler = ReminderScheduler::new(
                parse_policy(&policy)?,
                profile.reminder_frequency_hours,
            );
            let handles =
                scheduler.install(&mut notifier, profile.wake_time, profile.bed_time)?;
            if handles.is_empty() && !profile.notifications_enabled {
                println!("notifications disabled; nothing installed");
            } else {
                println!("installed {} reminders", handles.len());
            }
        }
        RemindAction::Show => {
            let notifier =
                StoredNotifier::new(FileStore::open()?, profile.notifications_enabled);
            println!("{}", serde_json::to_string_pretty(notifier.installed())?);
        }
        RemindAction::Test => {
            let notifier =
                StoredNotifier::new(FileStore::open()?, profile.notifications_enabled);
            notifier.send_immediate(REMINDER_TITLE, "This is a test hydration reminder.")?;
        }
    }
    Ok(())
}
