//! # Aqualog Core Library
//!
//! This library provides the core business logic for Aqualog, a daily
//! hydration tracker. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI shell
//! being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Goal math**: pure computation of the daily water goal from weight
//!   and gender
//! - **Intake ledger**: append-only, date-keyed record of water intake,
//!   persisted as a whole JSON snapshot behind a key-value capability
//! - **History**: weekly/monthly aggregation of the ledger for charting
//! - **Reminders**: deterministic derivation of daily reminder times and
//!   installation through a notification capability
//!
//! ## Key Components
//!
//! - [`compute_goal`]: daily water goal formula
//! - [`LedgerStore`]: single-writer intake persistence
//! - [`ProfileStore`]: user profile persistence
//! - [`ReminderScheduler`]: reminder computation and installation
//! - [`Notifier`]: trait for the host notification capability

pub mod clock;
pub mod error;
pub mod goal;
pub mod history;
pub mod ledger;
pub mod reminders;
pub mod storage;
pub mod units;

pub use clock::{Clock, FixedClock, Meridiem, SystemClock, TimeOfDay};
pub use error::{CoreError, StorageError, ValidationError};
pub use goal::{compute_goal, Gender, UnspecifiedGenderPolicy, WaterGoal, WeightUnit};
pub use history::{monthly_view, weekly_view, DaySummary, PeriodStats};
pub use ledger::{ContainerType, DailyRecord, IntakeEvent, IntakeReceipt, Ledger};
pub use reminders::{
    compute_reminder_times, Notifier, ReminderHandle, ReminderScheduler, ReminderTime,
    SchedulePolicy,
};
pub use storage::{FileStore, KvStore, LedgerStore, MemoryStore, ProfileStore, UserProfile};
pub use units::{format_amount, DisplayUnit};
