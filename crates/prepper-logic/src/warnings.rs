//! Warning flags for the dashboard.
//!
//! Warnings are emitted in a fixed scan order and shown as-is: no sorting
//! by severity, no deduplication.
//!
//! 1. Degenerate household / stock (no members, no food, no water)
//! 2. Unsafe rationing scenarios
//! 3. Expired and soon-expiring items
//! 4. Members with medical conditions and nothing linked in stock
//! 5. Preparedness against the goal
//! 6. Water safety margin cost

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::preparedness;
use crate::household::{uncovered_medical_members, HouseholdMember};
use crate::inventory::{ExpiryStatus, InventoryItem};
use crate::needs::HouseholdNeeds;
use crate::rationing::ScenarioOutcome;
use crate::settings::PrepperSettings;
use crate::supplies::{whole_days, SupplyDuration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// What a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    NoHousehold,
    NoFood,
    NoWater,
    UnsafeRationing,
    Expired,
    ExpiringSoon,
    MedicalCoverage,
    Preparedness,
    WaterSafety,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub severity: Severity,
    pub kind: WarningKind,
    pub title: String,
    pub message: String,
}

impl Warning {
    fn new(severity: Severity, kind: WarningKind, title: &str, message: String) -> Self {
        Self {
            severity,
            kind,
            title: title.to_string(),
            message,
        }
    }
}

/// Preparedness relative to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreparednessBand {
    Excellent,
    Good,
    Adequate,
    Poor,
    Critical,
}

impl PreparednessBand {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= preparedness::EXCELLENT_PERCENT {
            Self::Excellent
        } else if percent >= preparedness::GOOD_PERCENT {
            Self::Good
        } else if percent >= preparedness::ADEQUATE_PERCENT {
            Self::Adequate
        } else if percent >= preparedness::POOR_PERCENT {
            Self::Poor
        } else {
            Self::Critical
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::Excellent | Self::Good => Severity::Info,
            Self::Adequate | Self::Poor => Severity::Warning,
            Self::Critical => Severity::Critical,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Adequate => "Adequate",
            Self::Poor => "Poor",
            Self::Critical => "Critical",
        }
    }
}

/// `usage_days / goal_days * 100`. A zero goal is always met.
pub fn preparedness_percent(usage_days: u32, goal_days: u32) -> f64 {
    if goal_days == 0 {
        return preparedness::EXCELLENT_PERCENT;
    }
    usage_days as f64 / goal_days as f64 * 100.0
}

/// Days of water the safety margin costs: (days without margin, days with).
pub fn water_margin_days(needs: &HouseholdNeeds, total_water_liters: f64) -> (u32, u32) {
    (
        whole_days(total_water_liters, needs.base_water_liters),
        whole_days(total_water_liters, needs.daily_water_liters),
    )
}

/// Everything the generator scans.
#[derive(Debug, Clone, Copy)]
pub struct WarningInput<'a> {
    pub items: &'a [InventoryItem],
    pub members: &'a [HouseholdMember],
    pub needs: &'a HouseholdNeeds,
    pub supply: &'a SupplyDuration,
    pub outcomes: &'a [ScenarioOutcome],
    pub settings: &'a PrepperSettings,
    pub today: NaiveDate,
}

/// Generate warnings in scan order.
pub fn generate_warnings(input: &WarningInput<'_>) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let household_empty = input.needs.is_empty();

    if household_empty {
        warnings.push(Warning::new(
            Severity::Critical,
            WarningKind::NoHousehold,
            "No Household",
            "No household members recorded; supply duration cannot be estimated.".to_string(),
        ));
    } else {
        if input.supply.total_calories <= 0.0 {
            warnings.push(Warning::new(
                Severity::Critical,
                WarningKind::NoFood,
                "No Food",
                "No stocked item has a calorie count; food lasts 0 days.".to_string(),
            ));
        }
        if input.supply.total_water_liters <= 0.0 {
            warnings.push(Warning::new(
                Severity::Critical,
                WarningKind::NoWater,
                "No Water",
                "No drinking water in stock; water lasts 0 days.".to_string(),
            ));
        }

        for outcome in input.outcomes.iter().filter(|o| o.is_unsafe) {
            warnings.push(Warning::new(
                Severity::Critical,
                WarningKind::UnsafeRationing,
                "Unsafe Rationing",
                format!(
                    "{} ({}% reduction) gives {:.0} kcal per person, below the {:.0} kcal minimum.",
                    outcome.name,
                    outcome.reduction_percentage,
                    outcome.calories_per_person,
                    input.settings.minimum_calories_per_day
                ),
            ));
        }
    }

    for item in input.items {
        match item.expiry_status(input.today) {
            Some(ExpiryStatus::Expired { days_ago }) => warnings.push(Warning::new(
                Severity::Critical,
                WarningKind::Expired,
                "Expired Item",
                format!("{} expired {} day(s) ago.", item.name, days_ago),
            )),
            Some(ExpiryStatus::ExpiringSoon { days_left }) => warnings.push(Warning::new(
                Severity::Warning,
                WarningKind::ExpiringSoon,
                "Expiring Soon",
                format!("{} expires in {} day(s).", item.name, days_left),
            )),
            Some(ExpiryStatus::Fresh) | None => {}
        }
    }

    for member in uncovered_medical_members(input.members, input.items) {
        warnings.push(Warning::new(
            Severity::Warning,
            WarningKind::MedicalCoverage,
            "Medical Supplies",
            format!(
                "{} has medical needs ({}) but no linked supplies in stock.",
                member.name,
                member.medical_conditions.join(", ")
            ),
        ));
    }

    let percent = preparedness_percent(
        input.supply.overall_days,
        input.settings.preparedness_goal_days,
    );
    let band = PreparednessBand::from_percent(percent);
    warnings.push(Warning::new(
        band.severity(),
        WarningKind::Preparedness,
        "Preparedness",
        format!(
            "{}: {} of {} goal days covered ({:.0}%).",
            band.label(),
            input.supply.overall_days,
            input.settings.preparedness_goal_days,
            percent
        ),
    ));

    if !household_empty && input.settings.water_safety_margin > 1.0 {
        let (plain, with_margin) = water_margin_days(input.needs, input.supply.total_water_liters);
        warnings.push(Warning::new(
            Severity::Info,
            WarningKind::WaterSafety,
            "Water Safety",
            format!(
                "A {:.2}x safety margin plans for {:.1} L/day instead of {:.1} L/day: \
                 water lasts {} day(s) instead of {} ({} day difference).",
                input.settings.water_safety_margin,
                input.needs.daily_water_liters,
                input.needs.base_water_liters,
                with_margin,
                plain,
                plain.saturating_sub(with_margin)
            ),
        ));
    }

    warnings
}
