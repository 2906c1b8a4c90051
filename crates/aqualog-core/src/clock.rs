//! Wall-clock time model.
//!
//! Wake and bed times are 12-hour wall-clock values with no date or
//! timezone component; they are always interpreted against the device's
//! local clock at fire time. The [`Clock`] trait makes the timestamp source
//! and the local-time-to-calendar-date conversion injectable so ledger and
//! history logic can be tested without depending on the host timezone.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// AM/PM half of a 12-hour clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meridiem {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

/// A 12-hour wall-clock time (hour 1-12, minute 0-59).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Meridiem,
}

impl TimeOfDay {
    /// Validating constructor.
    pub fn new(hour: u32, minute: u32, meridiem: Meridiem) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&hour) {
            return Err(ValidationError::InvalidValue {
                field: "hour".into(),
                message: format!("expected 1-12, got {hour}"),
            });
        }
        if minute > 59 {
            return Err(ValidationError::InvalidValue {
                field: "minute".into(),
                message: format!("expected 0-59, got {minute}"),
            });
        }
        Ok(Self {
            hour,
            minute,
            meridiem,
        })
    }

    /// Convert to a 24-hour hour value. 12 AM maps to 0, 12 PM stays 12.
    pub fn hour24(&self) -> u32 {
        match (self.meridiem, self.hour) {
            (Meridiem::Pm, h) if h != 12 => h + 12,
            (Meridiem::Am, 12) => 0,
            (_, h) => h,
        }
    }

    /// Minutes since midnight.
    pub fn minutes_of_day(&self) -> u32 {
        self.hour24() * 60 + self.minute
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ampm = match self.meridiem {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        };
        write!(f, "{:02}:{:02} {}", self.hour, self.minute, ampm)
    }
}

/// Source of "now" and of the local calendar date for a timestamp.
pub trait Clock: Send + Sync {
    /// Current time as epoch milliseconds.
    fn now_ms(&self) -> i64;

    /// Calendar date a timestamp falls on, in the clock's timezone.
    fn date_of(&self, ts_ms: i64) -> NaiveDate;

    /// Today's calendar date.
    fn today(&self) -> NaiveDate {
        self.date_of(self.now_ms())
    }
}

/// Clock backed by the system time and local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn date_of(&self, ts_ms: i64) -> NaiveDate {
        DateTime::<Utc>::from_timestamp_millis(ts_ms)
            .map(|dt| dt.with_timezone(&Local).date_naive())
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Deterministic clock for tests. Dates are derived in UTC so results do
/// not depend on the host timezone.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now_ms: i64,
}

impl FixedClock {
    pub fn new(now_ms: i64) -> Self {
        Self { now_ms }
    }

    /// Build from a UTC date at noon, a convenient anchor for day-level tests.
    pub fn at_noon(date: NaiveDate) -> Self {
        let ms = date
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(0);
        Self { now_ms: ms }
    }

    pub fn advance(&mut self, delta_ms: i64) {
        self.now_ms += delta_ms;
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now_ms
    }

    fn date_of(&self, ts_ms: i64) -> NaiveDate {
        DateTime::<Utc>::from_timestamp_millis(ts_ms)
            .map(|dt| dt.date_naive())
            .unwrap_or(NaiveDate::MIN)
    }
}
