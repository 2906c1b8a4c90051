//! Daily water goal computation.
//!
//! The goal is derived from body weight and gender: roughly 30-35 ml of
//! water per kilogram of body weight, with men needing slightly more than
//! women. The result is an immutable three-unit snapshot that is recomputed
//! wholesale whenever weight, weight unit, or gender changes.

use serde::{Deserialize, Serialize};

/// Pounds per kilogram, used when converting lbs input to kg.
pub const LBS_PER_KG: f64 = 2.20462;

/// Milliliters of water per kilogram of body weight, by gender.
const RATE_MALE_ML_PER_KG: f64 = 35.0;
const RATE_FEMALE_ML_PER_KG: f64 = 31.0;

/// User gender. `Unspecified` is an explicit state, not a silent default;
/// callers choose a rate for it via [`UnspecifiedGenderPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unspecified,
}

/// Unit the user entered their weight in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

/// Which per-kilogram rate applies when gender is [`Gender::Unspecified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnspecifiedGenderPolicy {
    /// Use the female coefficient (31 ml/kg). Matches the historical
    /// behavior of falling through to the lower rate.
    #[default]
    FemaleRate,
    /// Use the male coefficient (35 ml/kg).
    MaleRate,
}

/// The computed daily target intake, expressed in three units.
///
/// `liters` and `ounces` are derived from `milliliters` at construction
/// time and rounded to one decimal. The struct is an immutable snapshot:
/// it is recomputed wholesale, never partially patched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterGoal {
    pub milliliters: f64,
    pub liters: f64,
    pub ounces: f64,
}

impl WaterGoal {
    /// Build the three-unit snapshot from a milliliter quantity.
    ///
    /// The liters value intentionally rounds to the nearest 100 ml before
    /// scaling (`round(ml / 100) / 10`), which is NOT the same as
    /// `ml / 1000`: 2450 ml yields 2.5 L, not 2.45 L. Persisted goals from
    /// earlier versions carry this rounding, so it must not change.
    pub fn from_milliliters(ml: f64) -> Self {
        Self {
            milliliters: ml,
            liters: (ml / 100.0).round() / 10.0,
            ounces: (ml / crate::units::ML_PER_FL_OZ * 10.0).round() / 10.0,
        }
    }
}

/// Compute the daily water goal from weight and gender.
///
/// Pure and total over `weight > 0` (the caller validates positivity at the
/// input boundary). Weight given in lbs is converted to kg first; the
/// milliliter result is rounded to one decimal.
pub fn compute_goal(
    weight: f64,
    unit: WeightUnit,
    gender: Gender,
    policy: UnspecifiedGenderPolicy,
) -> WaterGoal {
    let kg = match unit {
        WeightUnit::Kg => weight,
        WeightUnit::Lbs => weight / LBS_PER_KG,
    };

    let rate = match gender {
        Gender::Male => RATE_MALE_ML_PER_KG,
        Gender::Female => RATE_FEMALE_ML_PER_KG,
        Gender::Unspecified => match policy {
            UnspecifiedGenderPolicy::FemaleRate => RATE_FEMALE_ML_PER_KG,
            UnspecifiedGenderPolicy::MaleRate => RATE_MALE_ML_PER_KG,
        },
    };

    let ml = (kg * rate * 10.0).round() / 10.0;
    WaterGoal::from_milliliters(ml)
}
