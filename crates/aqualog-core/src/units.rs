//! User-facing formatting of water quantities.

use serde::{Deserialize, Serialize};

/// Milliliters per US fluid ounce.
pub const ML_PER_FL_OZ: f64 = 29.5735;

/// The unit water amounts are displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    Ml,
    Oz,
}

/// Format a milliliter quantity for display in the preferred unit.
///
/// Metric amounts are shown as liters with one decimal place; imperial
/// amounts as whole fluid ounces. Pure and total over `ml >= 0`.
pub fn format_amount(ml: f64, unit: DisplayUnit) -> String {
    match unit {
        DisplayUnit::Ml => format!("{:.1}L", ml / 1000.0),
        DisplayUnit::Oz => format!("{:.0} oz", ml / ML_PER_FL_OZ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_shows_liters_one_decimal() {
        assert_eq!(format_amount(2450.0, DisplayUnit::Ml), "2.5L");
        assert_eq!(format_amount(300.0, DisplayUnit::Ml), "0.3L");
        assert_eq!(format_amount(0.0, DisplayUnit::Ml), "0.0L");
    }

    #[test]
    fn imperial_shows_whole_ounces() {
        assert_eq!(format_amount(2450.0, DisplayUnit::Oz), "83 oz");
        assert_eq!(format_amount(29.5735, DisplayUnit::Oz), "1 oz");
    }
}
