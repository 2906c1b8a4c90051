//! Notification capability for a terminal host.
//!
//! Installed reminders are persisted under their own kv key so a
//! replacement install can cancel everything from earlier runs; immediate
//! notifications print to stdout. Permission maps to the profile's
//! notifications-enabled flag, supplied at construction.

use aqualog_core::reminders::{Notifier, ReminderHandle, ReminderTime};
use aqualog_core::storage::{KvStore, REMINDERS_KEY};
use serde::{Deserialize, Serialize};

/// One persisted recurring reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledReminder {
    pub handle: ReminderHandle,
    pub hour: u32,
    pub minute: u32,
    pub title: String,
    pub body: String,
}

/// Kv-backed [`Notifier`].
pub struct StoredNotifier<S: KvStore> {
    store: S,
    granted: bool,
    installed: Vec<InstalledReminder>,
}

impl<S: KvStore> StoredNotifier<S> {
    pub fn new(store: S, granted: bool) -> Self {
        let installed = match store.get(REMINDERS_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_default(),
            _ => Vec::new(),
        };
        Self {
            store,
            granted,
            installed,
        }
    }

    pub fn installed(&self) -> &[InstalledReminder] {
        &self.installed
    }

    fn persist(&self) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(&self.installed)?;
        self.store.set(REMINDERS_KEY, &json)?;
        Ok(())
    }
}

impl<S: KvStore> Notifier for StoredNotifier<S> {
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
        body: &str,
    ) -> Result<ReminderHandle, Box<dyn std::error::Error>> {
        let handle = uuid::Uuid::new_v4().to_string();
        self.installed.push(InstalledReminder {
            handle: handle.clone(),
            hour: time.hour,
            minute: time.minute,
            title: title.to_string(),
            body: body.to_string(),
        });
        self.persist()?;
        Ok(handle)
    }

    fn cancel_all(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.installed.clear();
        self.persist()
    }

    fn send_immediate(
        &self,
        title: &str,
        body: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        println!("{title}: {body}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqualog_core::storage::MemoryStore;

    #[test]
    fn schedule_persists_and_cancel_clears() {
        let mut notifier = StoredNotifier::new(MemoryStore::new(), true);
        notifier
            .schedule_daily(ReminderTime { hour: 9, minute: 30 }, "t", "b")
            .unwrap();
        assert_eq!(notifier.installed().len(), 1);

        let stored = notifier.store.get(REMINDERS_KEY).unwrap().unwrap();
        assert!(stored.contains("\"hour\":9"));

        notifier.cancel_all().unwrap();
        assert!(notifier.installed().is_empty());
        let stored = notifier.store.get(REMINDERS_KEY).unwrap().unwrap();
        assert_eq!(stored, "[]");
    }

    #[test]
    fn reloads_installed_set_from_store() {
        let store = MemoryStore::new();
        {
            let mut notifier = StoredNotifier::new(&store, true);
            notifier
                .schedule_daily(ReminderTime { hour: 7, minute: 0 }, "t", "b")
                .unwrap();
        }
        let notifier = StoredNotifier::new(&store, true);
        assert_eq!(notifier.installed().len(), 1);
        assert_eq!(notifier.installed()[0].hour, 7);
    }
}
