//! User profile record and its store.
//!
//! The profile is a single mutable record persisted as a whole JSON
//! snapshot after every mutation. It is created with defaults on first
//! launch and only ever overwritten, never deleted. The daily goal field is
//! always re-derived from (weight, weight unit, gender) through explicit
//! recalculation; nothing else writes it.

use serde::{Deserialize, Serialize};

use crate::clock::{Meridiem, TimeOfDay};
use crate::error::{Result, ValidationError};
use crate::goal::{compute_goal, Gender, UnspecifiedGenderPolicy, WaterGoal, WeightUnit};
use crate::units::DisplayUnit;

use super::{KvStore, PROFILE_KEY};

/// The user's profile and preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_time_flag: bool,
    pub gender: Gender,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub wake_time: TimeOfDay,
    pub bed_time: TimeOfDay,
    pub display_unit: DisplayUnit,
    pub reminder_frequency_hours: u32,
    pub sound_enabled: bool,
    pub notifications_enabled: bool,
    pub daily_goal: WaterGoal,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            first_time_flag: true,
            gender: Gender::Unspecified,
            weight: 70.0,
            weight_unit: WeightUnit::Kg,
            wake_time: TimeOfDay {
                hour: 7,
                minute: 30,
                meridiem: Meridiem::Am,
            },
            bed_time: TimeOfDay {
                hour: 11,
                minute: 30,
                meridiem: Meridiem::Pm,
            },
            display_unit: DisplayUnit::Ml,
            reminder_frequency_hours: 2,
            sound_enabled: true,
            notifications_enabled: true,
            // Historical first-launch placeholder, replaced by the first
            // explicit recalculation.
            daily_goal: WaterGoal {
                milliliters: 2400.0,
                liters: 2.4,
                ounces: 81.15,
            },
        }
    }
}

/// Partial profile mutation. Unset fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub gender: Option<Gender>,
    pub weight: Option<f64>,
    pub weight_unit: Option<WeightUnit>,
    pub wake_time: Option<TimeOfDay>,
    pub bed_time: Option<TimeOfDay>,
    pub display_unit: Option<DisplayUnit>,
    pub reminder_frequency_hours: Option<u32>,
    pub sound_enabled: Option<bool>,
    pub notifications_enabled: Option<bool>,
}

impl ProfileUpdate {
    fn apply(&self, profile: &mut UserProfile) -> Result<(), ValidationError> {
        if let Some(weight) = self.weight {
            if !(weight > 0.0) {
                return Err(ValidationError::NonPositiveWeight { weight });
            }
            profile.weight = weight;
        }
        if let Some(gender) = self.gender {
            profile.gender = gender;
        }
        if let Some(unit) = self.weight_unit {
            profile.weight_unit = unit;
        }
        if let Some(wake) = self.wake_time {
            profile.wake_time = wake;
        }
        if let Some(bed) = self.bed_time {
            profile.bed_time = bed;
        }
        if let Some(unit) = self.display_unit {
            profile.display_unit = unit;
        }
        if let Some(freq) = self.reminder_frequency_hours {
            profile.reminder_frequency_hours = freq;
        }
        if let Some(sound) = self.sound_enabled {
            profile.sound_enabled = sound;
        }
        if let Some(notif) = self.notifications_enabled {
            profile.notifications_enabled = notif;
        }
        Ok(())
    }
}

/// Loads, mutates, and persists the profile snapshot.
pub struct ProfileStore<S: KvStore> {
    store: S,
}

impl<S: KvStore> ProfileStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the profile, falling back to defaults when the stored value is
    /// absent or cannot be deserialized. Fails soft, never fatal.
    pub fn load(&self) -> UserProfile {
        match self.store.get(PROFILE_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_default(),
            _ => UserProfile::default(),
        }
    }

    /// Persist the whole profile snapshot.
    pub fn save(&self, profile: &UserProfile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.store.set(PROFILE_KEY, &json)?;
        Ok(())
    }

    /// Shallow-merge a partial update, persist, and return the merged
    /// snapshot. Weight is validated before merging; an invalid weight
    /// rejects the whole update.
    pub fn update(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let mut profile = self.load();
        update.apply(&mut profile)?;
        self.save(&profile)?;
        Ok(profile)
    }

    /// Re-derive the daily goal from the current weight and gender.
    pub fn recalculate_goal(&self, policy: UnspecifiedGenderPolicy) -> Result<UserProfile> {
        let mut profile = self.load();
        profile.daily_goal = compute_goal(
            profile.weight,
            profile.weight_unit,
            profile.gender,
            policy,
        );
        self.save(&profile)?;
        Ok(profile)
    }

    /// Finish onboarding: compute the goal from the collected data and
    /// clear the first-time flag.
    pub fn complete_onboarding(&self, policy: UnspecifiedGenderPolicy) -> Result<UserProfile> {
        let mut profile = self.load();
        profile.daily_goal = compute_goal(
            profile.weight,
            profile.weight_unit,
            profile.gender,
            policy,
        );
        profile.first_time_flag = false;
        self.save(&profile)?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn load_returns_default_when_absent() {
        let store = ProfileStore::new(MemoryStore::new());
        let profile = store.load();
        assert!(profile.first_time_flag);
        assert_eq!(profile.weight, 70.0);
        assert_eq!(profile.daily_goal.milliliters, 2400.0);
    }

    #[test]
    fn load_returns_default_on_corrupt_payload() {
        let mem = MemoryStore::new();
        mem.seed(PROFILE_KEY, "not json {{");
        let store = ProfileStore::new(mem);
        assert_eq!(store.load(), UserProfile::default());
    }

    #[test]
    fn update_merges_and_persists_whole_record() {
        let store = ProfileStore::new(MemoryStore::new());
        let merged = store
            .update(&ProfileUpdate {
                weight: Some(82.0),
                gender: Some(Gender::Male),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(merged.weight, 82.0);
        assert_eq!(merged.gender, Gender::Male);
        // Untouched fields keep their values.
        assert_eq!(merged.reminder_frequency_hours, 2);

        let reloaded = store.load();
        assert_eq!(reloaded, merged);
    }

    #[test]
    fn update_rejects_non_positive_weight() {
        let store = ProfileStore::new(MemoryStore::new());
        let err = store.update(&ProfileUpdate {
            weight: Some(0.0),
            ..Default::default()
        });
        assert!(err.is_err());
        // Nothing persisted.
        assert!(store.load().first_time_flag);
        assert_eq!(store.load().weight, 70.0);
    }

    #[test]
    fn complete_onboarding_computes_goal_and_clears_flag() {
        let store = ProfileStore::new(MemoryStore::new());
        store
            .update(&ProfileUpdate {
                weight: Some(70.0),
                gender: Some(Gender::Male),
                ..Default::default()
            })
            .unwrap();

        let profile = store
            .complete_onboarding(UnspecifiedGenderPolicy::default())
            .unwrap();
        assert!(!profile.first_time_flag);
        assert_eq!(profile.daily_goal.milliliters, 2450.0);
        assert_eq!(profile.daily_goal.liters, 2.5);
        assert_eq!(profile.daily_goal.ounces, 82.8);
    }

    #[test]
    fn recalculate_goal_tracks_weight_changes() {
        let store = ProfileStore::new(MemoryStore::new());
        store
            .update(&ProfileUpdate {
                weight: Some(60.0),
                gender: Some(Gender::Female),
                ..Default::default()
            })
            .unwrap();
        let profile = store
            .recalculate_goal(UnspecifiedGenderPolicy::default())
            .unwrap();
        assert_eq!(profile.daily_goal.milliliters, 1860.0);
    }

    #[test]
    fn profile_serializes_with_camel_case_layout() {
        let json = serde_json::to_value(UserProfile::default()).unwrap();
        assert!(json.get("firstTimeFlag").is_some());
        assert!(json.get("weightUnit").is_some());
        assert!(json.get("dailyGoal").is_some());
        assert_eq!(json["wakeTime"]["meridiem"], "AM");
    }
}
