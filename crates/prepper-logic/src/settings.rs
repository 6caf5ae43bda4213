//! User-editable preparedness settings and their validation.
//!
//! The settings screen edits a [`PrepperSettings`]; [`validate_settings`]
//! reports every problem at once so the screen can show them together.
//!
//! ```
//! use prepper_logic::settings::{validate_settings, PrepperSettings};
//!
//! let mut settings = PrepperSettings::default();
//! settings.preparedness_goal_days = 30;
//! assert!(validate_settings(&settings).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::settings_limits as limits;

/// Broad climate the household lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateZone {
    Temperate,
    Hot,
    Cold,
    Arid,
    Tropical,
}

impl ClimateZone {
    /// Water safety margin recommended for this climate.
    pub fn suggested_water_margin(self) -> f64 {
        match self {
            ClimateZone::Temperate | ClimateZone::Cold => 1.2,
            ClimateZone::Tropical => 1.35,
            ClimateZone::Hot | ClimateZone::Arid => 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepperSettings {
    pub climate_zone: ClimateZone,
    /// Days of supply the household aims to hold.
    pub preparedness_goal_days: u32,
    /// Per-person kcal/day below which a rationing scenario is unsafe.
    pub minimum_calories_per_day: f64,
    /// Multiplier on baseline water need.
    pub water_safety_margin: f64,
}

impl Default for PrepperSettings {
    fn default() -> Self {
        Self {
            climate_zone: ClimateZone::Temperate,
            preparedness_goal_days: 14,
            minimum_calories_per_day: 1200.0,
            water_safety_margin: 1.2,
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error(
        "preparedness goal {0} days outside {min}..={max}",
        min = limits::MIN_GOAL_DAYS,
        max = limits::MAX_GOAL_DAYS
    )]
    GoalDaysOutOfRange(u32),
    #[error(
        "minimum calories {0} outside {min}..={max}",
        min = limits::MIN_CALORIES,
        max = limits::MAX_CALORIES
    )]
    MinimumCaloriesOutOfRange(f64),
    #[error(
        "water safety margin {0} outside {min}..={max}",
        min = limits::MIN_WATER_MARGIN,
        max = limits::MAX_WATER_MARGIN
    )]
    WaterMarginOutOfRange(f64),
}

/// Validate settings, returning all errors found.
pub fn validate_settings(settings: &PrepperSettings) -> Vec<SettingsError> {
    let mut errors = Vec::new();

    if !(limits::MIN_GOAL_DAYS..=limits::MAX_GOAL_DAYS).contains(&settings.preparedness_goal_days)
    {
        errors.push(SettingsError::GoalDaysOutOfRange(
            settings.preparedness_goal_days,
        ));
    }
    // NaN fails both range checks
    if !(limits::MIN_CALORIES..=limits::MAX_CALORIES).contains(&settings.minimum_calories_per_day)
    {
        errors.push(SettingsError::MinimumCaloriesOutOfRange(
            settings.minimum_calories_per_day,
        ));
    }
    if !(limits::MIN_WATER_MARGIN..=limits::MAX_WATER_MARGIN)
        .contains(&settings.water_safety_margin)
    {
        errors.push(SettingsError::WaterMarginOutOfRange(
            settings.water_safety_margin,
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_settings(&PrepperSettings::default()).is_empty());
    }

    #[test]
    fn test_zero_goal_rejected() {
        let settings = PrepperSettings {
            preparedness_goal_days: 0,
            ..PrepperSettings::default()
        };
        assert_eq!(
            validate_settings(&settings),
            vec![SettingsError::GoalDaysOutOfRange(0)]
        );
    }

    #[test]
    fn test_margin_below_one_rejected() {
        let settings = PrepperSettings {
            water_safety_margin: 0.8,
            ..PrepperSettings::default()
        };
        assert_eq!(
            validate_settings(&settings),
            vec![SettingsError::WaterMarginOutOfRange(0.8)]
        );
    }

    #[test]
    fn test_collects_all_errors() {
        let settings = PrepperSettings {
            climate_zone: ClimateZone::Hot,
            preparedness_goal_days: 10_000,
            minimum_calories_per_day: 100.0,
            water_safety_margin: f64::NAN,
        };
        assert_eq!(validate_settings(&settings).len(), 3);
    }

    #[test]
    fn test_hot_climates_suggest_more_water() {
        assert!(
            ClimateZone::Arid.suggested_water_margin()
                > ClimateZone::Temperate.suggested_water_margin()
        );
        for zone in [
            ClimateZone::Temperate,
            ClimateZone::Hot,
            ClimateZone::Cold,
            ClimateZone::Arid,
            ClimateZone::Tropical,
        ] {
            let settings = PrepperSettings {
                climate_zone: zone,
                water_safety_margin: zone.suggested_water_margin(),
                ..PrepperSettings::default()
            };
            assert!(validate_settings(&settings).is_empty());
        }
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: PrepperSettings =
            serde_json::from_str(r#"{"preparedness_goal_days": 30}"#).unwrap();
        assert_eq!(settings.preparedness_goal_days, 30);
        assert_eq!(settings.water_safety_margin, 1.2);
    }
}
