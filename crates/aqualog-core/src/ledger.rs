//! The intake ledger: append-only, date-keyed water intake records.
//!
//! Each calendar day gets one [`DailyRecord`] holding the individual
//! [`IntakeEvent`]s and their running total. Records are created lazily on
//! the first intake of a new date and mutated only by appending events.
//! The whole ledger is persisted as a single JSON snapshot after every
//! mutation (see [`crate::storage::LedgerStore`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::ValidationError;

/// Container the user drank from. Presets carry a default volume; custom
/// amounts are entered directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerType {
    Cup,
    Glass,
    Bottle,
    Jug,
    Custom,
}

impl ContainerType {
    /// Preset volume in milliliters, if this container has one.
    pub fn preset_ml(&self) -> Option<f64> {
        match self {
            ContainerType::Cup => Some(200.0),
            ContainerType::Glass => Some(250.0),
            ContainerType::Bottle => Some(500.0),
            ContainerType::Jug => Some(1000.0),
            ContainerType::Custom => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContainerType::Cup => "Cup",
            ContainerType::Glass => "Glass",
            ContainerType::Bottle => "Bottle",
            ContainerType::Jug => "Jug (1L)",
            ContainerType::Custom => "Custom",
        }
    }
}

/// A single logged drink. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeEvent {
    /// Time-derived unique id (epoch milliseconds as a string).
    pub id: String,
    pub amount_ml: f64,
    pub timestamp_ms: i64,
    /// Local calendar date the event was logged on.
    pub calendar_date: NaiveDate,
    pub container_type: ContainerType,
}

/// One calendar day's aggregated intake.
///
/// `total_intake_ml` always equals the sum of the events' amounts.
/// `goal_reached_flag` flips false -> true exactly once, when the total
/// first crosses the daily goal, and is never reset within the same day --
/// not even if the goal is later recalculated upward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub calendar_date: NaiveDate,
    pub total_intake_ml: f64,
    pub events: Vec<IntakeEvent>,
    #[serde(default)]
    pub goal_reached_flag: bool,
}

/// Outcome of recording one intake.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReceipt {
    pub event: IntakeEvent,
    pub new_total_ml: f64,
    /// True only on the add that first crossed the daily goal. Drives the
    /// one-time congratulation notification.
    pub goal_reached_now: bool,
}

/// Insertion-ordered collection of daily records, keyed by calendar date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    pub records: Vec<DailyRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for a calendar date, if any intake was logged that day.
    pub fn record_for(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.records.iter().find(|r| r.calendar_date == date)
    }

    /// Total intake for a calendar date, 0 for days with no record.
    pub fn total_for(&self, date: NaiveDate) -> f64 {
        self.record_for(date).map_or(0.0, |r| r.total_intake_ml)
    }

    /// Append one intake event, creating the day's record if needed.
    ///
    /// The calendar date is derived from the clock's "now" in local time.
    /// Ledger is append-only: identical amounts logged twice produce two
    /// events, both counted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveAmount`] if `amount_ml <= 0`.
    pub fn add_intake(
        &mut self,
        amount_ml: f64,
        container_type: ContainerType,
        daily_goal_ml: f64,
        clock: &dyn Clock,
    ) -> Result<IntakeReceipt, ValidationError> {
        if !(amount_ml > 0.0) {
            return Err(ValidationError::NonPositiveAmount { amount_ml });
        }

        let now_ms = clock.now_ms();
        let date = clock.date_of(now_ms);
        let event = IntakeEvent {
            id: now_ms.to_string(),
            amount_ml,
            timestamp_ms: now_ms,
            calendar_date: date,
            container_type,
        };

        let idx = match self.records.iter().position(|r| r.calendar_date == date) {
            Some(i) => i,
            None => {
                self.records.push(DailyRecord {
                    calendar_date: date,
                    total_intake_ml: 0.0,
                    events: Vec::new(),
                    goal_reached_flag: false,
                });
                self.records.len() - 1
            }
        };
        let record = &mut self.records[idx];

        record.events.push(event.clone());
        record.total_intake_ml = record.events.iter().map(|e| e.amount_ml).sum();

        let goal_reached_now =
            !record.goal_reached_flag && record.total_intake_ml >= daily_goal_ml;
        if goal_reached_now {
            record.goal_reached_flag = true;
        }

        Ok(IntakeReceipt {
            new_total_ml: record.total_intake_ml,
            goal_reached_now,
            event,
        })
    }
}
