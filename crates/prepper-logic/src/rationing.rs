//! Rationing scenarios: what happens to supply duration when intake is cut.
//!
//! A scenario reduces household calories by a percentage. Food lasts longer
//! at the reduced rate, water does not change, and the per-person intake is
//! checked against the configured minimum. An unsafe scenario is only a
//! classification; nothing prevents the household from choosing it.

use serde::{Deserialize, Serialize};

use crate::ids::ScenarioId;
use crate::needs::HouseholdNeeds;
use crate::supplies::{whole_days, SupplyDuration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationingScenario {
    pub id: ScenarioId,
    pub name: String,
    /// Calorie reduction in percent (0 = normal intake).
    pub reduction_percentage: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDraft {
    pub name: String,
    pub reduction_percentage: f64,
    #[serde(default)]
    pub description: String,
}

impl ScenarioDraft {
    pub fn into_scenario(self, id: ScenarioId) -> RationingScenario {
        RationingScenario {
            id,
            name: self.name,
            reduction_percentage: self.reduction_percentage,
            description: self.description,
        }
    }
}

/// The stock scenarios a new household starts with.
pub fn default_scenarios() -> Vec<ScenarioDraft> {
    vec![
        ScenarioDraft {
            name: "Normal".to_string(),
            reduction_percentage: 0.0,
            description: "Full daily intake for every member.".to_string(),
        },
        ScenarioDraft {
            name: "Moderate Rationing".to_string(),
            reduction_percentage: 25.0,
            description: "Smaller portions, fewer snacks.".to_string(),
        },
        ScenarioDraft {
            name: "Strict Rationing".to_string(),
            reduction_percentage: 50.0,
            description: "Half rations to stretch food stores.".to_string(),
        },
        ScenarioDraft {
            name: "Survival Mode".to_string(),
            reduction_percentage: 75.0,
            description: "Bare minimum intake. Not sustainable long term.".to_string(),
        },
    ]
}

/// Scenario result for display and warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario_id: ScenarioId,
    pub name: String,
    pub reduction_percentage: f64,
    pub adjusted_daily_calories: f64,
    pub food_days: u32,
    /// `min(food_days, water_days)`; water is unaffected by rationing.
    pub overall_days: u32,
    pub calories_per_person: f64,
    /// Per-person intake below the configured minimum.
    pub is_unsafe: bool,
}

/// Household kcal/day after a percentage cut.
pub fn reduced_calories(daily_calories: f64, reduction_percentage: f64) -> f64 {
    daily_calories * (1.0 - reduction_percentage / 100.0)
}

/// Evaluate one scenario against current needs and supply totals.
pub fn evaluate_scenario(
    scenario: &RationingScenario,
    needs: &HouseholdNeeds,
    supply: &SupplyDuration,
    minimum_calories_per_day: f64,
) -> ScenarioOutcome {
    let adjusted = reduced_calories(needs.daily_calories, scenario.reduction_percentage);
    let food_days = whole_days(supply.total_calories, adjusted);
    let calories_per_person = if needs.member_count == 0 {
        0.0
    } else {
        adjusted / needs.member_count as f64
    };
    ScenarioOutcome {
        scenario_id: scenario.id,
        name: scenario.name.clone(),
        reduction_percentage: scenario.reduction_percentage,
        adjusted_daily_calories: adjusted,
        food_days,
        overall_days: food_days.min(supply.water_days),
        calories_per_person,
        is_unsafe: calories_per_person < minimum_calories_per_day,
    }
}

/// Evaluate every scenario, preserving input order.
pub fn evaluate_scenarios(
    scenarios: &[RationingScenario],
    needs: &HouseholdNeeds,
    supply: &SupplyDuration,
    minimum_calories_per_day: f64,
) -> Vec<ScenarioOutcome> {
    scenarios
        .iter()
        .map(|s| evaluate_scenario(s, needs, supply, minimum_calories_per_day))
        .collect()
}
