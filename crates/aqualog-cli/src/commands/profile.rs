use aqualog_core::goal::UnspecifiedGenderPolicy;
use aqualog_core::storage::{FileStore, ProfileStore, ProfileUpdate, UserProfile};
use aqualog_core::{Notifier, ReminderScheduler, SchedulePolicy};
use clap::Subcommand;

use super::{parse_display_unit, parse_gender, parse_time_12h, parse_weight_unit};
use crate::notifier::StoredNotifier;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the current profile
    Show,
    /// Update gender (re-derives the daily goal)
    SetGender { gender: String },
    /// Update body weight (re-derives the daily goal)
    SetWeight {
        weight: f64,
        #[arg(long, default_value = "kg")]
        unit: String,
    },
    /// Update wake time, e.g. "7:00 AM" (reschedules reminders)
    SetWake { time: String },
    /// Update bed time, e.g. "10:00 PM" (reschedules reminders)
    SetBed { time: String },
    /// Display unit: ml or oz
    SetUnit { unit: String },
    /// Reminder frequency in hours (reschedules reminders)
    SetFrequency { hours: u32 },
    /// Enable or disable notification sound
    SetSound { enabled: bool },
    /// Enable or disable reminder notifications
    SetNotifications { enabled: bool },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = ProfileStore::new(FileStore::open()?);

    let profile = match action {
        ProfileAction::Show => store.load(),
        ProfileAction::SetGender { gender } => {
            store.update(&ProfileUpdate {
                gender: Some(parse_gender(&gender)?),
                ..Default::default()
            })?;
            store.recalculate_goal(UnspecifiedGenderPolicy::FemaleRate)?
        }
        ProfileAction::SetWeight { weight, unit } => {
            store.update(&ProfileUpdate {
                weight: Some(weight),
                weight_unit: Some(parse_weight_unit(&unit)?),
                ..Default::default()
            })?;
            store.recalculate_goal(UnspecifiedGenderPolicy::FemaleRate)?
        }
        ProfileAction::SetWake { time } => {
            let profile = store.update(&ProfileUpdate {
                wake_time: Some(parse_time_12h(&time)?),
                ..Default::default()
            })?;
            reschedule(&profile)?;
            profile
        }
        ProfileAction::SetBed { time } => {
            let profile = store.update(&ProfileUpdate {
                bed_time: Some(parse_time_12h(&time)?),
                ..Default::default()
            })?;
            reschedule(&profile)?;
            profile
        }
        ProfileAction::SetUnit { unit } => store.update(&ProfileUpdate {
            display_unit: Some(parse_display_unit(&unit)?),
            ..Default::default()
        })?,
        ProfileAction::SetFrequency { hours } => {
            let profile = store.update(&ProfileUpdate {
                reminder_frequency_hours: Some(hours),
                ..Default::default()
            })?;
            reschedule(&profile)?;
            profile
        }
        ProfileAction::SetSound { enabled } => store.update(&ProfileUpdate {
            sound_enabled: Some(enabled),
            ..Default::default()
        })?,
        ProfileAction::SetNotifications { enabled } => {
            let profile = store.update(&ProfileUpdate {
                notifications_enabled: Some(enabled),
                ..Default::default()
            })?;
            if enabled {
                reschedule(&profile)?;
            } else {
                let mut notifier = StoredNotifier::new(FileStore::open()?, true);
                notifier.cancel_all()?;
            }
            profile
        }
    };

    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

/// Settings-driven reschedule: fixed-interval walker from the stored
/// frequency, skipped entirely while notifications are off.
fn reschedule(profile: &UserProfile) -> Result<(), Box<dyn std::error::Error>> {
    if !profile.notifications_enabled {
        return Ok(());
    }
    let mut notifier = StoredNotifier::new(FileStore::open()?, true);
    let scheduler = ReminderScheduler::new(
        SchedulePolicy::FixedInterval,
        profile.reminder_frequency_hours,
    );
    scheduler.install(&mut notifier, profile.wake_time, profile.bed_time)?;
    Ok(())
}
