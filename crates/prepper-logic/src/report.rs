//! Sustainability report: the full engine pipeline in one call.
//!
//! Exercises: (emergency adjustment) → needs → supply duration
//! → rationing outcomes → preparedness → warnings

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::emergency::{adjust_inventory, EmergencyScenario};
use crate::household::HouseholdMember;
use crate::inventory::{total_value, InventoryItem};
use crate::needs::{aggregate_needs, HouseholdNeeds};
use crate::rationing::{evaluate_scenarios, RationingScenario, ScenarioOutcome};
use crate::settings::PrepperSettings;
use crate::supplies::{compute_supply_duration, item_coverage, ItemCoverage, SupplyDuration};
use crate::warnings::{
    generate_warnings, preparedness_percent, PreparednessBand, Warning, WarningInput,
};

/// Derived dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityReport {
    pub generated_on: NaiveDate,
    /// Emergency applied to the inventory before computing, if any.
    pub emergency: Option<EmergencyScenario>,
    pub needs: HouseholdNeeds,
    pub supply: SupplyDuration,
    /// Days of supply at normal intake (`supply.overall_days`).
    pub normal_usage_days: u32,
    pub scenarios: Vec<ScenarioOutcome>,
    pub item_coverage: Vec<ItemCoverage>,
    pub preparedness_percent: f64,
    pub preparedness_band: PreparednessBand,
    pub inventory_value: f64,
    pub warnings: Vec<Warning>,
}

/// Inputs the report reads; nothing here is modified.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub items: &'a [InventoryItem],
    pub members: &'a [HouseholdMember],
    pub scenarios: &'a [RationingScenario],
    pub settings: &'a PrepperSettings,
}

/// Run the engine. `today` drives expiry checks; `emergency` previews a
/// disruption on a copy of the inventory.
pub fn calculate_sustainability(
    input: &ReportInput<'_>,
    today: NaiveDate,
    emergency: Option<&EmergencyScenario>,
) -> SustainabilityReport {
    let items: Cow<'_, [InventoryItem]> = match emergency {
        Some(scenario) => Cow::Owned(adjust_inventory(input.items, scenario)),
        None => Cow::Borrowed(input.items),
    };

    let needs = aggregate_needs(input.members, input.settings.water_safety_margin);
    let supply = compute_supply_duration(&items, &needs);
    let scenarios = evaluate_scenarios(
        input.scenarios,
        &needs,
        &supply,
        input.settings.minimum_calories_per_day,
    );
    let percent = preparedness_percent(supply.overall_days, input.settings.preparedness_goal_days);
    let warnings = generate_warnings(&WarningInput {
        items: &items,
        members: input.members,
        needs: &needs,
        supply: &supply,
        outcomes: &scenarios,
        settings: input.settings,
        today,
    });

    log::debug!(
        "sustainability: {} members, food {}d, water {}d, {} warnings",
        needs.member_count,
        supply.food_days,
        supply.water_days,
        warnings.len()
    );

    SustainabilityReport {
        generated_on: today,
        emergency: emergency.cloned(),
        needs,
        supply,
        normal_usage_days: supply.overall_days,
        item_coverage: item_coverage(&items, needs.member_count),
        scenarios,
        preparedness_percent: percent,
        preparedness_band: PreparednessBand::from_percent(percent),
        inventory_value: total_value(&items),
        warnings,
    }
}
