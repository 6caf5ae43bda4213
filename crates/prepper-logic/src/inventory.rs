//! Inventory items: categories, units, caloric and water content, expiry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{thresholds, units};
use crate::ids::{ItemId, MemberId};

/// Inventory category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Water,
    Food,
    CannedGoods,
    Medical,
    Hygiene,
    Tools,
    Energy,
    Other,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Water,
            Category::Food,
            Category::CannedGoods,
            Category::Medical,
            Category::Hygiene,
            Category::Tools,
            Category::Energy,
            Category::Other,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Water => "Water",
            Category::Food => "Food",
            Category::CannedGoods => "Canned Goods",
            Category::Medical => "Medical",
            Category::Hygiene => "Hygiene",
            Category::Tools => "Tools",
            Category::Energy => "Energy",
            Category::Other => "Other",
        }
    }
}

/// Unit a quantity is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Each,
    Cans,
    Boxes,
    Bottles,
    Pounds,
    Ounces,
    Kilograms,
    Grams,
    Gallons,
    Liters,
    Milliliters,
}

impl Unit {
    /// Liters per unit for volume units, `None` for everything else.
    pub fn liters_per_unit(self) -> Option<f64> {
        match self {
            Unit::Gallons => Some(units::LITERS_PER_GALLON),
            Unit::Liters => Some(1.0),
            Unit::Milliliters => Some(1.0 / units::MILLILITERS_PER_LITER),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Unit::Each => "each",
            Unit::Cans => "cans",
            Unit::Boxes => "boxes",
            Unit::Bottles => "bottles",
            Unit::Pounds => "lb",
            Unit::Ounces => "oz",
            Unit::Kilograms => "kg",
            Unit::Grams => "g",
            Unit::Gallons => "gal",
            Unit::Liters => "L",
            Unit::Milliliters => "mL",
        }
    }
}

/// A stocked item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub storage_location: String,
    #[serde(default)]
    pub calories_per_unit: Option<f64>,
    /// Units consumed per person per day (0 = not a daily consumable).
    #[serde(default)]
    pub usage_rate_per_person_per_day: f64,
    /// Cost per unit.
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub requires_refrigeration: bool,
    /// Members whose medical needs this item covers.
    #[serde(default)]
    pub required_by: Vec<MemberId>,
}

/// Item fields supplied by a caller before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub category: Category,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub storage_location: String,
    #[serde(default)]
    pub calories_per_unit: Option<f64>,
    #[serde(default)]
    pub usage_rate_per_person_per_day: f64,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub requires_refrigeration: bool,
    #[serde(default)]
    pub required_by: Vec<MemberId>,
}

impl ItemDraft {
    pub fn into_item(self, id: ItemId) -> InventoryItem {
        InventoryItem {
            id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            unit: self.unit,
            expiration_date: self.expiration_date,
            storage_location: self.storage_location,
            calories_per_unit: self.calories_per_unit,
            usage_rate_per_person_per_day: self.usage_rate_per_person_per_day,
            cost: self.cost,
            requires_refrigeration: self.requires_refrigeration,
            required_by: self.required_by,
        }
    }
}

/// Where an item stands relative to its expiration date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    /// More than the warning window away.
    Fresh,
    /// Expires today or within the warning window.
    ExpiringSoon { days_left: i64 },
    /// Expiration date is before today.
    Expired { days_ago: i64 },
}

impl InventoryItem {
    /// Total kcal held by this item; a missing calorie figure counts as zero.
    pub fn calories(&self) -> f64 {
        self.quantity * self.calories_per_unit.unwrap_or(0.0)
    }

    /// Drinking water held by this item, in liters.
    ///
    /// Only `Water` items count. Non-volume units contribute nothing.
    pub fn water_liters(&self) -> f64 {
        if self.category != Category::Water {
            return 0.0;
        }
        match self.unit.liters_per_unit() {
            Some(factor) => self.quantity * factor,
            None => {
                log::debug!(
                    "water item {} counted in {:?}; no volume conversion, counting 0 L",
                    self.id,
                    self.unit
                );
                0.0
            }
        }
    }

    /// Stock value; items without a cost count as zero.
    pub fn value(&self) -> f64 {
        self.quantity * self.cost.unwrap_or(0.0)
    }

    /// `None` when the item has no expiration date.
    pub fn expiry_status(&self, today: NaiveDate) -> Option<ExpiryStatus> {
        let date = self.expiration_date?;
        let days_left = (date - today).num_days();
        Some(if days_left < 0 {
            ExpiryStatus::Expired {
                days_ago: -days_left,
            }
        } else if days_left <= thresholds::EXPIRY_WARNING_DAYS {
            ExpiryStatus::ExpiringSoon { days_left }
        } else {
            ExpiryStatus::Fresh
        })
    }

    /// Canned goods survive flooding.
    pub fn is_canned(&self) -> bool {
        self.category == Category::CannedGoods
            || self
                .name
                .to_lowercase()
                .contains(thresholds::CANNED_NAME_KEYWORD)
    }

    /// Case-insensitive match on the storage location.
    pub fn stored_in(&self, keyword: &str) -> bool {
        self.storage_location
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }
}

/// Total value of every item with a cost.
pub fn total_value(items: &[InventoryItem]) -> f64 {
    items.iter().map(InventoryItem::value).sum()
}

#[cfg(test)]
pub(crate) fn test_item(
    id: u64,
    name: &str,
    category: Category,
    quantity: f64,
    unit: Unit,
) -> InventoryItem {
    InventoryItem {
        id: ItemId(id),
        name: name.to_string(),
        category,
        quantity,
        unit,
        expiration_date: None,
        storage_location: "Pantry".to_string(),
        calories_per_unit: None,
        usage_rate_per_person_per_day: 0.0,
        cost: None,
        requires_refrigeration: false,
        required_by: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calories_missing_is_zero() {
        let item = test_item(1, "Rice", Category::Food, 10.0, Unit::Pounds);
        assert_eq!(item.calories(), 0.0);
    }

    #[test]
    fn test_calories_multiplies_quantity() {
        let mut item = test_item(1, "Rice", Category::Food, 10.0, Unit::Pounds);
        item.calories_per_unit = Some(1600.0);
        assert!((item.calories() - 16_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_water_gallons_convert() {
        let item = test_item(1, "Jugs", Category::Water, 10.0, Unit::Gallons);
        assert!((item.water_liters() - 37.8541).abs() < 1e-9);
    }

    #[test]
    fn test_water_milliliters_convert() {
        let item = test_item(1, "Bottles", Category::Water, 500.0, Unit::Milliliters);
        assert!((item.water_liters() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_water_non_volume_unit_counts_zero() {
        let item = test_item(1, "Bottles", Category::Water, 24.0, Unit::Bottles);
        assert_eq!(item.water_liters(), 0.0);
    }

    #[test]
    fn test_non_water_category_has_no_water() {
        let item = test_item(1, "Juice", Category::Food, 4.0, Unit::Liters);
        assert_eq!(item.water_liters(), 0.0);
    }

    #[test]
    fn test_expiry_status() {
        let today = date(2026, 3, 1);
        let mut item = test_item(1, "Beans", Category::Food, 1.0, Unit::Cans);
        assert_eq!(item.expiry_status(today), None);

        item.expiration_date = Some(date(2026, 2, 27));
        assert_eq!(
            item.expiry_status(today),
            Some(ExpiryStatus::Expired { days_ago: 2 })
        );

        item.expiration_date = Some(today);
        assert_eq!(
            item.expiry_status(today),
            Some(ExpiryStatus::ExpiringSoon { days_left: 0 })
        );

        item.expiration_date = Some(date(2026, 3, 31));
        assert_eq!(
            item.expiry_status(today),
            Some(ExpiryStatus::ExpiringSoon { days_left: 30 })
        );

        item.expiration_date = Some(date(2026, 4, 1));
        assert_eq!(item.expiry_status(today), Some(ExpiryStatus::Fresh));
    }

    #[test]
    fn test_is_canned_by_category_or_name() {
        let by_category = test_item(1, "Tuna", Category::CannedGoods, 1.0, Unit::Cans);
        let by_name = test_item(2, "Canned Peaches", Category::Food, 1.0, Unit::Cans);
        let neither = test_item(3, "Flour", Category::Food, 1.0, Unit::Pounds);
        assert!(by_category.is_canned());
        assert!(by_name.is_canned());
        assert!(!neither.is_canned());
    }

    #[test]
    fn test_stored_in_case_insensitive() {
        let mut item = test_item(1, "Flour", Category::Food, 1.0, Unit::Pounds);
        item.storage_location = "Basement Shelf B".to_string();
        assert!(item.stored_in("basement"));
        assert!(!item.stored_in("garage"));
    }

    #[test]
    fn test_total_value() {
        let mut a = test_item(1, "A", Category::Food, 2.0, Unit::Each);
        a.cost = Some(3.5);
        let b = test_item(2, "B", Category::Food, 5.0, Unit::Each);
        assert!((total_value(&[a, b]) - 7.0).abs() < 1e-9);
    }
}
