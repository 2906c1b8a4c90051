//! Integration test for a full tracked day.
//!
//! Walks the complete workflow: onboarding computes the goal, intakes
//! accumulate in the ledger with the goal flag crossing once, history
//! aggregates the week, and the reminder schedule installs through the
//! notification capability.

use aqualog_core::goal::UnspecifiedGenderPolicy;
use aqualog_core::history;
use aqualog_core::reminders::{notify_goal_reached, ReminderHandle};
use aqualog_core::storage::{MemoryStore, ProfileStore, ProfileUpdate};
use aqualog_core::{
    ContainerType, FixedClock, Gender, LedgerStore, Meridiem, Notifier, ReminderScheduler,
    ReminderTime, SchedulePolicy, TimeOfDay,
};
use chrono::NaiveDate;

#[derive(Default)]
struct RecordingNotifier {
    granted: bool,
    cancel_count: u32,
    scheduled: Vec<(ReminderTime, String)>,
}

impl Notifier for RecordingNotifier {
    fn permission_granted(&self) -> bool {
        self.granted
    }

    fn request_permission(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        self.granted = true;
        Ok(true)
    }

    fn schedule_daily(
        &mut self,
        time: ReminderTime,
        title: &str,
        _body: &str,
    ) -> Result<ReminderHandle, Box<dyn std::error::Error>> {
        self.scheduled.push((time, title.to_string()));
        Ok(format!("handle-{}", self.scheduled.len()))
    }

    fn cancel_all(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.cancel_count += 1;
        self.scheduled.clear();
        Ok(())
    }

    fn send_immediate(
        &self,
        _title: &str,
        _body: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

#[test]
fn full_day_workflow() {
    // Onboard: 70 kg male, wake 07:00, bed 22:00.
    let profiles = ProfileStore::new(MemoryStore::new());
    profiles
        .update(&ProfileUpdate {
            gender: Some(Gender::Male),
            weight: Some(70.0),
            wake_time: Some(TimeOfDay::new(7, 0, Meridiem::Am).unwrap()),
            bed_time: Some(TimeOfDay::new(10, 0, Meridiem::Pm).unwrap()),
            ..Default::default()
        })
        .unwrap();
    let profile = profiles
        .complete_onboarding(UnspecifiedGenderPolicy::default())
        .unwrap();
    assert!(!profile.first_time_flag);
    assert_eq!(profile.daily_goal.milliliters, 2450.0);
    assert_eq!(profile.daily_goal.liters, 2.5);

    // Log drinks through the day; the goal flag flips exactly once.
    let today = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
    let mut clock = FixedClock::at_noon(today);
    let ledger = LedgerStore::open(MemoryStore::new());
    let goal_ml = profile.daily_goal.milliliters;

    let mut crossings = 0;
    for _ in 0..5 {
        let receipt = ledger
            .record_intake(500.0, ContainerType::Bottle, goal_ml, &clock)
            .unwrap();
        if receipt.goal_reached_now {
            crossings += 1;
        }
        clock.advance(90 * 60 * 1000);
    }
    assert_eq!(crossings, 1);

    let snapshot = ledger.snapshot();
    assert_eq!(snapshot.total_for(today), 2500.0);
    assert!(snapshot.record_for(today).unwrap().goal_reached_flag);

    // Weekly aggregation: today's bar caps at 100%, raw total intact.
    let week_start = history::start_of_week(today);
    let week = history::weekly_view(&snapshot, week_start, goal_ml, today);
    let today_entry = week.iter().find(|e| e.is_today).unwrap();
    assert_eq!(today_entry.intake_ml, 2500.0);
    assert_eq!(today_entry.percent_of_goal, 100.0);
    let stats = history::period_stats(&week, goal_ml);
    assert_eq!(stats.days_goal_reached, 1);
    assert_eq!(stats.total_ml, 2500.0);

    // Reminders: wholesale install after permission grant.
    let mut notifier = RecordingNotifier::default();
    let scheduler = ReminderScheduler::new(
        SchedulePolicy::EvenlySpaced,
        profile.reminder_frequency_hours,
    );

    // Without permission: silent no-op.
    let none = scheduler
        .install(&mut notifier, profile.wake_time, profile.bed_time)
        .unwrap();
    assert!(none.is_empty());
    assert_eq!(notifier.cancel_count, 0);

    notifier.request_permission().unwrap();
    let handles = scheduler
        .install(&mut notifier, profile.wake_time, profile.bed_time)
        .unwrap();
    assert_eq!(handles.len(), 7);
    assert_eq!(notifier.cancel_count, 1);
    assert_eq!(notifier.scheduled[0].0.to_string(), "07:30");

    // Reinstall after a settings change replaces, never accumulates.
    let fixed = ReminderScheduler::new(SchedulePolicy::FixedInterval, 2);
    fixed
        .install(&mut notifier, profile.wake_time, profile.bed_time)
        .unwrap();
    assert_eq!(notifier.cancel_count, 2);
    assert_eq!(notifier.scheduled.len(), 8); // 7, 9, .., 21

    // Goal-reached congratulation goes through without error.
    notify_goal_reached(&notifier).unwrap();
}

#[test]
fn ledger_survives_reload_between_sessions() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
    let clock = FixedClock::at_noon(today);

    let backing = MemoryStore::new();
    let first = LedgerStore::open(backing);
    first
        .record_intake(750.0, ContainerType::Custom, 2400.0, &clock)
        .unwrap();

    // A later app launch sees the same snapshot via the persisted payload.
    let payload = serde_json::to_string(&first.snapshot()).unwrap();
    let store = MemoryStore::new();
    store.seed("intake_history", &payload);
    let second = LedgerStore::open(store);
    assert_eq!(second.snapshot().total_for(today), 750.0);
}
