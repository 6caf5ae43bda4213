//! Engine constants: unit conversions, thresholds, need tables.
//!
//! Plain `const` values with no runtime dependency, grouped by concern.

pub mod units {
    /// Liters per US gallon.
    pub const LITERS_PER_GALLON: f64 = 3.78541;
    pub const MILLILITERS_PER_LITER: f64 = 1000.0;
}

pub mod thresholds {
    /// Items expiring within this many days raise a warning.
    pub const EXPIRY_WARNING_DAYS: i64 = 30;
    /// Outages at least this long spoil refrigerated stock.
    pub const POWER_OUTAGE_SPOILAGE_HOURS: f64 = 30.0;
    /// Storage location keyword that floods take out.
    pub const FLOOD_LOCATION_KEYWORD: &str = "basement";
    /// Name keyword that marks an item as surviving a flood.
    pub const CANNED_NAME_KEYWORD: &str = "canned";
}

pub mod preparedness {
    pub const EXCELLENT_PERCENT: f64 = 100.0;
    pub const GOOD_PERCENT: f64 = 75.0;
    pub const ADEQUATE_PERCENT: f64 = 50.0;
    pub const POOR_PERCENT: f64 = 25.0;
}

pub mod needs {
    /// (upper age bound inclusive, base kcal/day, base water L/day)
    pub const AGE_BRACKETS: [(u32, f64, f64); 4] = [
        (3, 1200.0, 1.0),
        (8, 1400.0, 1.5),
        (13, 1800.0, 2.0),
        (64, 2000.0, 3.0),
    ];
    /// Ages above the last bracket.
    pub const SENIOR_CALORIES: f64 = 1800.0;
    pub const SENIOR_WATER_LITERS: f64 = 3.0;

    pub const SEDENTARY_FACTOR: f64 = 1.0;
    pub const MODERATE_FACTOR: f64 = 1.15;
    pub const ACTIVE_FACTOR: f64 = 1.3;
    pub const VERY_ACTIVE_FACTOR: f64 = 1.5;
}

pub mod settings_limits {
    pub const MIN_GOAL_DAYS: u32 = 1;
    pub const MAX_GOAL_DAYS: u32 = 3650;
    pub const MIN_CALORIES: f64 = 500.0;
    pub const MAX_CALORIES: f64 = 5000.0;
    pub const MIN_WATER_MARGIN: f64 = 1.0;
    pub const MAX_WATER_MARGIN: f64 = 3.0;
}
