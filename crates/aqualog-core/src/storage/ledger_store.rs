//! Single-writer front for the intake ledger.
//!
//! Two rapid "add water" actions must not race on a read-modify-write of
//! the persisted snapshot. `LedgerStore` serializes every mutation: the
//! lock is held across mutate-then-persist, so at most one write is in
//! flight and readers never observe a partial state.
//!
//! A failed write keeps the mutated ledger in memory and surfaces the
//! error; the next successful write persists the full snapshot again, so
//! no data is lost to a transient storage outage.

use std::sync::Mutex;

use crate::clock::Clock;
use crate::error::Result;
use crate::ledger::{ContainerType, IntakeReceipt, Ledger};

use super::{KvStore, LEDGER_KEY};

pub struct LedgerStore<S: KvStore> {
    store: S,
    ledger: Mutex<Ledger>,
}

impl<S: KvStore> LedgerStore<S> {
    /// Load the ledger from storage. Absent or corrupt payloads yield an
    /// empty ledger rather than an error.
    pub fn open(store: S) -> Self {
        let ledger = match store.get(LEDGER_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_default(),
            _ => Ledger::default(),
        };
        Self {
            store,
            ledger: Mutex::new(ledger),
        }
    }

    /// A point-in-time copy for readers (history views, today screen).
    pub fn snapshot(&self) -> Ledger {
        self.ledger
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Record one intake and persist the whole ledger, atomically with
    /// respect to other callers.
    ///
    /// # Errors
    ///
    /// Returns a validation error for non-positive amounts, or a storage
    /// error if persisting fails (in-memory state is kept either way).
    pub fn record_intake(
        &self,
        amount_ml: f64,
        container_type: ContainerType,
        daily_goal_ml: f64,
        clock: &dyn Clock,
    ) -> Result<IntakeReceipt> {
        let mut ledger = self.ledger.lock().unwrap_or_else(|e| e.into_inner());
        let receipt = ledger.add_intake(amount_ml, container_type, daily_goal_ml, clock)?;
        let json = serde_json::to_string(&*ledger)?;
        self.store.set(LEDGER_KEY, &json)?;
        Ok(receipt)
    }
}
