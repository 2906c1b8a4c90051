//! History aggregation for charting.
//!
//! Derives week and month views from the ledger: per-day totals, percent of
//! goal (capped at 100 for display; raw intake is never capped), and period
//! statistics. Period navigation is pure date arithmetic with no wraparound
//! errors across year boundaries.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::ledger::Ledger;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One day's summary entry in a week or month view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: NaiveDate,
    /// Weekday abbreviation in week views, day-of-month in month views.
    pub label: String,
    pub intake_ml: f64,
    /// Percent of goal, capped at 100.
    pub percent_of_goal: f64,
    pub is_today: bool,
}

/// Aggregated statistics over one viewed period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub total_ml: f64,
    pub average_ml: f64,
    pub days_goal_reached: usize,
}

fn percent_of(intake_ml: f64, goal_ml: f64) -> f64 {
    if goal_ml <= 0.0 {
        return 0.0;
    }
    (intake_ml / goal_ml * 100.0).min(100.0)
}

/// Seven daily summaries starting at `week_start`. Days with no ledger
/// record report zero intake.
pub fn weekly_view(
    ledger: &Ledger,
    week_start: NaiveDate,
    daily_goal_ml: f64,
    today: NaiveDate,
) -> Vec<DaySummary> {
    (0..7)
        .filter_map(|i| week_start.checked_add_days(Days::new(i)))
        .map(|date| {
            let intake_ml = ledger.total_for(date);
            DaySummary {
                date,
                label: WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize].to_string(),
                intake_ml,
                percent_of_goal: percent_of(intake_ml, daily_goal_ml),
                is_today: date == today,
            }
        })
        .collect()
}

/// One daily summary per day of the given month, labeled by day-of-month.
pub fn monthly_view(
    ledger: &Ledger,
    year: i32,
    month: u32,
    daily_goal_ml: f64,
    today: NaiveDate,
) -> Vec<DaySummary> {
    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| {
            let intake_ml = ledger.total_for(date);
            DaySummary {
                date,
                label: date.day().to_string(),
                intake_ml,
                percent_of_goal: percent_of(intake_ml, daily_goal_ml),
                is_today: date == today,
            }
        })
        .collect()
}

/// Number of days in a calendar month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(a), Some(b)) => (b - a).num_days() as u32,
        _ => 0,
    }
}

/// Sum of intake over the period's entries. Raw values, never capped.
pub fn total_for_period(entries: &[DaySummary]) -> f64 {
    entries.iter().map(|e| e.intake_ml).sum()
}

/// Average daily intake over the period's entries.
pub fn average_for_period(entries: &[DaySummary]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    total_for_period(entries) / entries.len() as f64
}

/// Count of days whose raw intake met or exceeded the goal.
pub fn days_goal_reached(entries: &[DaySummary], daily_goal_ml: f64) -> usize {
    entries
        .iter()
        .filter(|e| e.intake_ml >= daily_goal_ml)
        .count()
}

/// The full stat bundle shown under a chart.
pub fn period_stats(entries: &[DaySummary], daily_goal_ml: f64) -> PeriodStats {
    PeriodStats {
        total_ml: total_for_period(entries),
        average_ml: average_for_period(entries),
        days_goal_reached: days_goal_reached(entries, daily_goal_ml),
    }
}

/// Start of the week before `week_start`.
pub fn previous_week(week_start: NaiveDate) -> NaiveDate {
    week_start
        .checked_sub_days(Days::new(7))
        .unwrap_or(week_start)
}

/// Start of the week after `week_start`.
pub fn next_week(week_start: NaiveDate) -> NaiveDate {
    week_start
        .checked_add_days(Days::new(7))
        .unwrap_or(week_start)
}

/// The calendar month before (year, month), wrapping across January.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// The calendar month after (year, month), wrapping across December.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// The Monday on or before `date`, the anchor for week views.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Header label for a week view, e.g. "Mar 11 - Mar 17, 2024".
pub fn week_range_label(week_start: NaiveDate) -> String {
    let end = week_start
        .checked_add_days(Days::new(6))
        .unwrap_or(week_start);
    format!(
        "{} - {}",
        week_start.format("%b %-d"),
        end.format("%b %-d, %Y")
    )
}
