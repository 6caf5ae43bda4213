//! Supply duration: how many whole days stock covers household needs.
//!
//! Food and water are tracked separately:
//! - Food: total kcal across all items ÷ household kcal/day
//! - Water: total liters across `Water` items ÷ margin-scaled liters/day
//!
//! The household runs out when the first of the two does, so the overall
//! figure is the minimum of the two.

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;
use crate::inventory::InventoryItem;
use crate::needs::HouseholdNeeds;

/// Supply totals and whole-day durations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SupplyDuration {
    pub total_calories: f64,
    pub total_water_liters: f64,
    pub food_days: u32,
    pub water_days: u32,
    /// `min(food_days, water_days)`.
    pub overall_days: u32,
}

/// Whole days `available` lasts at `daily_need` per day.
///
/// Zero need (no household) gives zero days, not infinity.
pub fn whole_days(available: f64, daily_need: f64) -> u32 {
    if daily_need <= 0.0 {
        return 0;
    }
    // `as` saturates: negative stock floors to 0
    (available / daily_need).floor() as u32
}

pub fn total_calories(items: &[InventoryItem]) -> f64 {
    items.iter().map(InventoryItem::calories).sum()
}

pub fn total_water_liters(items: &[InventoryItem]) -> f64 {
    items.iter().map(InventoryItem::water_liters).sum()
}

/// Compute food, water and overall days of supply.
pub fn compute_supply_duration(items: &[InventoryItem], needs: &HouseholdNeeds) -> SupplyDuration {
    let total_calories = total_calories(items);
    let total_water_liters = total_water_liters(items);
    let food_days = whole_days(total_calories, needs.daily_calories);
    let water_days = whole_days(total_water_liters, needs.daily_water_liters);
    SupplyDuration {
        total_calories,
        total_water_liters,
        food_days,
        water_days,
        overall_days: food_days.min(water_days),
    }
}

/// Days a single consumable lasts at its per-person usage rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCoverage {
    pub item_id: ItemId,
    pub name: String,
    pub days: f64,
}

/// Coverage for every item with a positive usage rate.
///
/// Empty for an empty household.
pub fn item_coverage(items: &[InventoryItem], household_size: usize) -> Vec<ItemCoverage> {
    if household_size == 0 {
        return Vec::new();
    }
    items
        .iter()
        .filter(|i| i.usage_rate_per_person_per_day > 0.0)
        .map(|i| ItemCoverage {
            item_id: i.id,
            name: i.name.clone(),
            days: i.quantity / (i.usage_rate_per_person_per_day * household_size as f64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::test_member;
    use crate::inventory::{test_item, Category, Unit};
    use crate::needs::aggregate_needs;

    fn reference_inventory() -> Vec<InventoryItem> {
        let mut food = test_item(1, "Rations", Category::Food, 28.0, Unit::Each);
        food.calories_per_unit = Some(1000.0);
        let water = test_item(2, "Water Jugs", Category::Water, 10.0, Unit::Gallons);
        vec![food, water]
    }

    #[test]
    fn test_whole_days_floors() {
        assert_eq!(whole_days(37.8541, 7.2), 5);
        assert_eq!(whole_days(37.8541, 6.0), 6);
        assert_eq!(whole_days(28_000.0, 4000.0), 7);
    }

    #[test]
    fn test_whole_days_zero_need() {
        assert_eq!(whole_days(1000.0, 0.0), 0);
    }

    #[test]
    fn test_whole_days_negative_stock() {
        assert_eq!(whole_days(-5.0, 1.0), 0);
    }

    #[test]
    fn test_two_person_reference_household() {
        let members = vec![test_member(1, 2000.0, 3.0), test_member(2, 2000.0, 3.0)];
        let needs = aggregate_needs(&members, 1.2);
        let d = compute_supply_duration(&reference_inventory(), &needs);
        assert_eq!(d.food_days, 7);
        assert_eq!(d.water_days, 5);
        assert_eq!(d.overall_days, 5);
    }

    #[test]
    fn test_empty_household_zero_days() {
        let needs = aggregate_needs(&[], 1.2);
        let d = compute_supply_duration(&reference_inventory(), &needs);
        assert_eq!(d.food_days, 0);
        assert_eq!(d.water_days, 0);
        assert_eq!(d.overall_days, 0);
        assert!(d.total_calories > 0.0);
    }

    #[test]
    fn test_food_can_be_binding() {
        let members = vec![test_member(1, 2000.0, 1.0)];
        let needs = aggregate_needs(&members, 1.0);
        let d = compute_supply_duration(&reference_inventory(), &needs);
        assert_eq!(d.food_days, 14);
        assert_eq!(d.water_days, 37);
        assert_eq!(d.overall_days, 14);
    }

    #[test]
    fn test_item_coverage() {
        let mut filters = test_item(1, "Filters", Category::Hygiene, 30.0, Unit::Each);
        filters.usage_rate_per_person_per_day = 0.5;
        let hammer = test_item(2, "Hammer", Category::Tools, 1.0, Unit::Each);
        let coverage = item_coverage(&[filters, hammer], 3);
        assert_eq!(coverage.len(), 1);
        assert!((coverage[0].days - 20.0).abs() < 1e-9);
        assert!(item_coverage(&reference_inventory(), 0).is_empty());
    }
}
