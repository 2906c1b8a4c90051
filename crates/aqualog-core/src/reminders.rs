//! Reminder time derivation and schedule installation.
//!
//! Two scheduling strategies coexist and are deliberately kept separate:
//!
//! - **Evenly spaced**: divides the waking span into `max(3, span / 2)`
//!   reminders, first one 30 minutes after wake time. Ignores the user's
//!   frequency preference.
//! - **Fixed interval**: steps from the wake hour by the preferred
//!   frequency until the bed hour, minute pinned to the wake minute. Does
//!   not wrap past midnight.
//!
//! Installation is wholesale: every previously scheduled reminder is
//! cancelled before the new set goes in, so stale reminders never coexist
//! with a fresh schedule. Each reminder is a recurring daily trigger at a
//! fixed local hour/minute; the host notification capability owns
//! persistence and firing.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::clock::TimeOfDay;
use crate::error::{CoreError, Result};

/// Opaque handle to one installed reminder, issued by the capability.
pub type ReminderHandle = String;

/// Notification title used for every hydration reminder.
pub const REMINDER_TITLE: &str = "\u{1f4a7} Hydration Time!";

/// Title/body of the one-time goal-reached congratulation.
pub const GOAL_REACHED_TITLE: &str = "Goal Reached! \u{1f389}";
pub const GOAL_REACHED_BODY: &str =
    "Congratulations! You've reached your daily water intake goal!";

/// Rotating reminder message pool.
pub const REMINDER_MESSAGES: [&str; 10] = [
    "Time to drink water! Your body will thank you.",
    "Hydration check! Grab your water bottle.",
    "Water break! Stay hydrated, stay healthy.",
    "Reminder: Drink some water to feel your best!",
    "Your daily water goal is waiting! Take a sip now.",
    "Feeling tired? Try drinking some water!",
    "Staying hydrated improves your mood and energy!",
    "Take a moment to hydrate yourself!",
    "Water is your superpower! Drink up!",
    "Your cells are thirsty! Drink some water now.",
];

/// A reminder firing time on the 24-hour local clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderTime {
    pub hour: u32,
    pub minute: u32,
}

impl std::fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Which derivation strategy to use. See the module docs; which one is
/// authoritative is an open product question, so both stay addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulePolicy {
    EvenlySpaced,
    FixedInterval,
}

/// Host notification capability.
///
/// Implementations own permission state, trigger persistence, and delivery.
/// The scheduler only computes times and issues requests.
pub trait Notifier: Send + Sync {
    /// Whether the user has granted notification permission.
    fn permission_granted(&self) -> bool;

    /// Ask the user for permission. Returns the resulting grant state.
    fn request_permission(&mut self) -> std::result::Result<bool, Box<dyn std::error::Error>>;

    /// Install one recurring daily trigger at a fixed local time.
    fn schedule_daily(
        &mut self,
        time: ReminderTime,
        title: &str,
        body: &str,
    ) -> std::result::Result<ReminderHandle, Box<dyn std::error::Error>>;

    /// Cancel every scheduled reminder.
    fn cancel_all(&mut self) -> std::result::Result<(), Box<dyn std::error::Error>>;

    /// Deliver a notification immediately.
    fn send_immediate(
        &self,
        title: &str,
        body: &str,
    ) -> std::result::Result<(), Box<dyn std::error::Error>>;
}

/// Compute the daily reminder times for the given strategy.
///
/// `frequency_hours` only affects [`SchedulePolicy::FixedInterval`]; the
/// evenly-spaced walker derives its own count from the waking span.
pub fn compute_reminder_times(
    wake: TimeOfDay,
    bed: TimeOfDay,
    frequency_hours: u32,
    policy: SchedulePolicy,
) -> Vec<ReminderTime> {
    match policy {
        SchedulePolicy::EvenlySpaced => evenly_spaced_times(wake, bed),
        SchedulePolicy::FixedInterval => fixed_interval_times(wake, bed, frequency_hours),
    }
}

fn evenly_spaced_times(wake: TimeOfDay, bed: TimeOfDay) -> Vec<ReminderTime> {
    let wake_hour = wake.hour24();
    let bed_hour = bed.hour24();

    // Active span in whole hours; wraps past midnight.
    let span_hours = if bed_hour >= wake_hour {
        bed_hour - wake_hour
    } else {
        24 - wake_hour + bed_hour
    };

    let count = std::cmp::max(3, span_hours / 2);
    let interval_minutes = (span_hours * 60) as f64 / count as f64;
    let wake_minutes = wake.minutes_of_day() as f64;

    let mut times = Vec::with_capacity(count as usize);
    for i in 0..count {
        // First reminder 30 minutes after wake, then one per interval.
        // Offsets are fractional; round to the nearest whole minute.
        let total = (wake_minutes + 30.0 + i as f64 * interval_minutes).round() as u32;
        let time = ReminderTime {
            hour: (total / 60) % 24,
            minute: total % 60,
        };

        // Drop anything at or after bedtime; never wrap into the night.
        if time.hour > bed_hour || (time.hour == bed_hour && time.minute >= bed.minute) {
            continue;
        }
        times.push(time);
    }
    times
}

fn fixed_interval_times(
    wake: TimeOfDay,
    bed: TimeOfDay,
    frequency_hours: u32,
) -> Vec<ReminderTime> {
    if frequency_hours == 0 {
        return Vec::new();
    }

    let bed_hour = bed.hour24();
    let mut hour = wake.hour24();
    let mut times = Vec::new();
    while hour < bed_hour {
        times.push(ReminderTime {
            hour,
            minute: wake.minute,
        });
        hour += frequency_hours;
    }
    times
}

/// Pick a reminder body from the message pool.
pub fn random_message() -> &'static str {
    REMINDER_MESSAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(REMINDER_MESSAGES[0])
}

/// Computes reminder times and installs them through a [`Notifier`].
#[derive(Debug, Clone)]
pub struct ReminderScheduler {
    policy: SchedulePolicy,
    frequency_hours: u32,
}

impl ReminderScheduler {
    pub fn new(policy: SchedulePolicy, frequency_hours: u32) -> Self {
        Self {
            policy,
            frequency_hours,
        }
    }

    /// Replace the installed reminder set with a freshly computed one.
    ///
    /// Missing permission is a no-op, not an error: the empty handle list
    /// signals that nothing was installed, and the caller retries only on
    /// the next explicit permission grant. Otherwise every existing
    /// reminder is cancelled before the new set is scheduled.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Notification`] if the capability rejects the
    /// cancel or any schedule request.
    pub fn install(
        &self,
        notifier: &mut dyn Notifier,
        wake: TimeOfDay,
        bed: TimeOfDay,
    ) -> Result<Vec<ReminderHandle>> {
        if !notifier.permission_granted() {
            return Ok(Vec::new());
        }

        notifier
            .cancel_all()
            .map_err(|e| CoreError::Notification(e.to_string()))?;

        let times = compute_reminder_times(wake, bed, self.frequency_hours, self.policy);
        let mut handles = Vec::with_capacity(times.len());
        for time in times {
            let handle = notifier
                .schedule_daily(time, REMINDER_TITLE, random_message())
                .map_err(|e| CoreError::Notification(e.to_string()))?;
            handles.push(handle);
        }
        Ok(handles)
    }
}

/// Send the one-time goal-reached congratulation, if permitted.
pub fn notify_goal_reached(notifier: &dyn Notifier) -> Result<()> {
    if !notifier.permission_granted() {
        return Ok(());
    }
    notifier
        .send_immediate(GOAL_REACHED_TITLE, GOAL_REACHED_BODY)
        .map_err(|e| CoreError::Notification(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Meridiem;

    fn t(hour: u32, minute: u32, meridiem: Meridiem) -> TimeOfDay {
        TimeOfDay::new(hour, minute, meridiem).unwrap()
    }

    #[test]
    fn evenly_spaced_reference_scenario() {
        // Wake 07:00, bed 22:00: span 15h, count max(3, 7) = 7,
        // interval 900/7 = 128.57 min.
        let times = compute_reminder_times(
            t(7, 0, Meridiem::Am),
            t(10, 0, Meridiem::Pm),
            2,
            SchedulePolicy::EvenlySpaced,
        );
        let rendered: Vec<String> = times.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            rendered,
            ["07:30", "09:39", "11:47", "13:56", "16:04", "18:13", "20:21"]
        );
    }

    #[test]
    fn evenly_spaced_drops_times_at_or_after_bedtime() {
        // Wake 07:00, bed 08:00: span 1h, count 3, interval 20 min.
        // 07:30 and 07:50 fit; 08:10 is past bedtime and dropped.
        let times = compute_reminder_times(
            t(7, 0, Meridiem::Am),
            t(8, 0, Meridiem::Am),
            2,
            SchedulePolicy::EvenlySpaced,
        );
        let rendered: Vec<String> = times.iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, ["07:30", "07:50"]);
    }

    #[test]
    fn evenly_spaced_span_wraps_midnight() {
        // Wake 22:00, bed 02:00: span 24 - 22 + 2 = 4h, count 3,
        // interval 80 min, candidates 22:30, 23:50, 01:10. The pre-midnight
        // candidates carry hour values above the bed hour and are dropped;
        // the wrapped one survives.
        let times = compute_reminder_times(
            t(10, 0, Meridiem::Pm),
            t(2, 0, Meridiem::Am),
            2,
            SchedulePolicy::EvenlySpaced,
        );
        let rendered: Vec<String> = times.iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, ["01:10"]);
    }

    #[test]
    fn evenly_spaced_minimum_three_reminders() {
        // Span 4h would give floor(4/2) = 2; the floor of 3 wins.
        let times = compute_reminder_times(
            t(9, 0, Meridiem::Am),
            t(1, 0, Meridiem::Pm),
            2,
            SchedulePolicy::EvenlySpaced,
        );
        assert_eq!(times.len(), 3);
    }

    #[test]
    fn fixed_interval_walks_wake_to_bed() {
        let times = compute_reminder_times(
            t(7, 0, Meridiem::Am),
            t(10, 0, Meridiem::Pm),
            2,
            SchedulePolicy::FixedInterval,
        );
        let hours: Vec<u32> = times.iter().map(|t| t.hour).collect();
        assert_eq!(hours, [7, 9, 11, 13, 15, 17, 19, 21]);
        assert!(times.iter().all(|t| t.minute == 0));
    }

    #[test]
    fn fixed_interval_keeps_wake_minute() {
        let times = compute_reminder_times(
            t(8, 30, Meridiem::Am),
            t(9, 0, Meridiem::Pm),
            3,
            SchedulePolicy::FixedInterval,
        );
        let rendered: Vec<String> = times.iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, ["08:30", "11:30", "14:30", "17:30", "20:30"]);
    }

    #[test]
    fn fixed_interval_zero_frequency_yields_nothing() {
        let times = compute_reminder_times(
            t(7, 0, Meridiem::Am),
            t(10, 0, Meridiem::Pm),
            0,
            SchedulePolicy::FixedInterval,
        );
        assert!(times.is_empty());
    }

    /// Records capability calls for assertion.
    #[derive(Default)]
    struct MockNotifier {
        granted: bool,
        calls: Vec<String>,
        scheduled: Vec<ReminderTime>,
    }

    impl Notifier for MockNotifier {
        fn permission_granted(&self) -> bool {
            self.granted
        }

        fn request_permission(
            &mut self,
        ) -> std::result::Result<bool, Box<dyn std::error::Error>> {
            self.granted = true;
            Ok(true)
        }

        fn schedule_daily(
            &mut self,
            time: ReminderTime,
            _title: &str,
            _body: &str,
        ) -> std::result::Result<ReminderHandle, Box<dyn std::error::Error>> {
            self.calls.push(format!("schedule {time}"));
            self.scheduled.push(time);
            Ok(uuid::Uuid::new_v4().to_string())
        }

        fn cancel_all(&mut self) -> std::result::Result<(), Box<dyn std::error::Error>> {
            self.calls.push("cancel_all".into());
            self.scheduled.clear();
            Ok(())
        }

        fn send_immediate(
            &self,
            _title: &str,
            _body: &str,
        ) -> std::result::Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }
    }

    #[test]
    fn install_cancels_before_scheduling() {
        let mut notifier = MockNotifier {
            granted: true,
            ..Default::default()
        };
        let scheduler = ReminderScheduler::new(SchedulePolicy::EvenlySpaced, 2);
        let handles = scheduler
            .install(
                &mut notifier,
                t(7, 0, Meridiem::Am),
                t(10, 0, Meridiem::Pm),
            )
            .unwrap();

        assert_eq!(handles.len(), 7);
        assert_eq!(notifier.calls[0], "cancel_all");
        assert_eq!(notifier.scheduled.len(), 7);
    }

    #[test]
    fn install_without_permission_is_a_noop() {
        let mut notifier = MockNotifier::default();
        let scheduler = ReminderScheduler::new(SchedulePolicy::EvenlySpaced, 2);
        let handles = scheduler
            .install(
                &mut notifier,
                t(7, 0, Meridiem::Am),
                t(10, 0, Meridiem::Pm),
            )
            .unwrap();

        assert!(handles.is_empty());
        assert!(notifier.calls.is_empty());
    }

    #[test]
    fn reinstall_replaces_previous_schedule() {
        let mut notifier = MockNotifier {
            granted: true,
            ..Default::default()
        };
        let scheduler = ReminderScheduler::new(SchedulePolicy::FixedInterval, 2);
        scheduler
            .install(
                &mut notifier,
                t(7, 0, Meridiem::Am),
                t(10, 0, Meridiem::Pm),
            )
            .unwrap();
        scheduler
            .install(
                &mut notifier,
                t(9, 0, Meridiem::Am),
                t(10, 0, Meridiem::Pm),
            )
            .unwrap();

        // Only the second set remains installed.
        let hours: Vec<u32> = notifier.scheduled.iter().map(|t| t.hour).collect();
        assert_eq!(hours, [9, 11, 13, 15, 17, 19, 21]);
    }

    #[test]
    fn random_message_comes_from_pool() {
        for _ in 0..20 {
            assert!(REMINDER_MESSAGES.contains(&random_message()));
        }
    }
}
