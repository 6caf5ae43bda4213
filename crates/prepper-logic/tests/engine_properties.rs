//! Property tests for the sustainability engine.
//!
//! Covers: empty households, monotonicity in stock, the binding food/water
//! constraint, rationing scale and safety, the water safety margin, and
//! copy-on-write emergency adjustment.

use chrono::NaiveDate;
use prepper_logic::emergency::{adjust_inventory, EmergencyScenario};
use prepper_logic::household::{ActivityLevel, HouseholdMember, MemberDraft};
use prepper_logic::ids::{ItemId, MemberId, ScenarioId};
use prepper_logic::inventory::{Category, InventoryItem, ItemDraft, Unit};
use prepper_logic::needs::aggregate_needs;
use prepper_logic::rationing::{evaluate_scenario, RationingScenario};
use prepper_logic::report::{calculate_sustainability, ReportInput};
use prepper_logic::settings::PrepperSettings;
use prepper_logic::supplies::compute_supply_duration;
use prepper_logic::warnings::{Severity, WarningKind};
use proptest::prelude::*;

// ── Helpers ────────────────────────────────────────────────────────────

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
}

// ── Strategies ─────────────────────────────────────────────────────────

fn category_strategy() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Water),
        Just(Category::Food),
        Just(Category::CannedGoods),
        Just(Category::Medical),
        Just(Category::Hygiene),
        Just(Category::Tools),
        Just(Category::Energy),
        Just(Category::Other),
    ]
}

fn unit_strategy() -> impl Strategy<Value = Unit> {
    prop_oneof![
        Just(Unit::Each),
        Just(Unit::Cans),
        Just(Unit::Pounds),
        Just(Unit::Kilograms),
        Just(Unit::Gallons),
        Just(Unit::Liters),
        Just(Unit::Milliliters),
    ]
}

fn location_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Pantry".to_string()),
        Just("Basement".to_string()),
        Just("basement shelf".to_string()),
        Just("Garage".to_string()),
    ]
}

fn item_strategy() -> impl Strategy<Value = ItemDraft> {
    (
        category_strategy(),
        unit_strategy(),
        0.0f64..500.0,
        proptest::option::of(0.0f64..3000.0),
        location_strategy(),
        any::<bool>(),
        prop_oneof![Just("Rice"), Just("Canned beans"), Just("Jerrycan"), Just("Bandages")],
    )
        .prop_map(
            |(category, unit, quantity, calories, location, fridge, name)| ItemDraft {
                name: name.to_string(),
                category,
                quantity,
                unit,
                expiration_date: None,
                storage_location: location,
                calories_per_unit: calories,
                usage_rate_per_person_per_day: 0.0,
                cost: None,
                requires_refrigeration: fridge,
                required_by: Vec::new(),
            },
        )
}

fn inventory_strategy() -> impl Strategy<Value = Vec<InventoryItem>> {
    proptest::collection::vec(item_strategy(), 0..12).prop_map(|drafts| {
        drafts
            .into_iter()
            .enumerate()
            .map(|(i, d)| d.into_item(ItemId(i as u64 + 1)))
            .collect()
    })
}

fn activity_strategy() -> impl Strategy<Value = ActivityLevel> {
    prop_oneof![
        Just(ActivityLevel::Sedentary),
        Just(ActivityLevel::Moderate),
        Just(ActivityLevel::Active),
        Just(ActivityLevel::VeryActive),
    ]
}

fn household_strategy(min: usize) -> impl Strategy<Value = Vec<HouseholdMember>> {
    proptest::collection::vec((0u32..100, activity_strategy()), min..6).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (age, activity_level))| {
                MemberDraft {
                    name: format!("member {i}"),
                    age,
                    activity_level,
                    group_id: None,
                    medical_conditions: Vec::new(),
                    dietary_restrictions: Vec::new(),
                    skills: Vec::new(),
                }
                .into_member(MemberId(100 + i as u64))
            })
            .collect()
    })
}

fn emergency_strategy() -> impl Strategy<Value = EmergencyScenario> {
    prop_oneof![
        (0.0f64..96.0).prop_map(|duration_hours| EmergencyScenario::PowerOutage { duration_hours }),
        any::<bool>().prop_map(|basement_flooded| EmergencyScenario::Flood { basement_flooded }),
        Just(EmergencyScenario::Pandemic),
    ]
}

// ── Properties ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn empty_household_never_reports_supply_days(items in inventory_strategy()) {
        let settings = PrepperSettings::default();
        let report = calculate_sustainability(
            &ReportInput { items: &items, members: &[], scenarios: &[], settings: &settings },
            today(),
            None,
        );
        prop_assert_eq!(report.normal_usage_days, 0);
        prop_assert_eq!(report.warnings[0].kind, WarningKind::NoHousehold);
        prop_assert_eq!(report.warnings[0].severity, Severity::Critical);
    }

    #[test]
    fn more_stock_never_shortens_supply(
        items in inventory_strategy(),
        members in household_strategy(1),
        pick in any::<prop::sample::Index>(),
        extra in 0.0f64..200.0,
    ) {
        prop_assume!(!items.is_empty());
        let needs = aggregate_needs(&members, 1.2);
        let before = compute_supply_duration(&items, &needs);

        let mut grown = items.clone();
        grown[pick.index(items.len())].quantity += extra;
        let after = compute_supply_duration(&grown, &needs);

        prop_assert!(after.food_days >= before.food_days);
        prop_assert!(after.water_days >= before.water_days);
    }

    #[test]
    fn overall_days_is_the_binding_constraint(
        items in inventory_strategy(),
        members in household_strategy(0),
        margin in 1.0f64..3.0,
    ) {
        let needs = aggregate_needs(&members, margin);
        let supply = compute_supply_duration(&items, &needs);
        prop_assert_eq!(supply.overall_days, supply.food_days.min(supply.water_days));
    }

    #[test]
    fn rationing_scales_calories_per_person(
        items in inventory_strategy(),
        members in household_strategy(1),
        reduction in 0.0f64..=100.0,
        minimum in 500.0f64..5000.0,
    ) {
        let needs = aggregate_needs(&members, 1.2);
        let supply = compute_supply_duration(&items, &needs);
        let scenario = RationingScenario {
            id: ScenarioId(1),
            name: "sweep".to_string(),
            reduction_percentage: reduction,
            description: String::new(),
        };
        let outcome = evaluate_scenario(&scenario, &needs, &supply, minimum);

        let expected = needs.daily_calories * (1.0 - reduction / 100.0);
        let total = outcome.calories_per_person * members.len() as f64;
        prop_assert!((total - expected).abs() <= 1e-9 * expected.max(1.0));
        prop_assert_eq!(outcome.is_unsafe, outcome.calories_per_person < minimum);
        prop_assert!(outcome.overall_days <= supply.water_days);
    }

    #[test]
    fn safety_margin_never_adds_water_days(
        items in inventory_strategy(),
        members in household_strategy(1),
        margin in 1.0f64..=3.0,
    ) {
        let plain = compute_supply_duration(&items, &aggregate_needs(&members, 1.0));
        let padded = compute_supply_duration(&items, &aggregate_needs(&members, margin));
        prop_assert!(padded.water_days <= plain.water_days);
    }

    #[test]
    fn emergency_only_zeroes_destroyed_stock(
        items in inventory_strategy(),
        scenario in emergency_strategy(),
    ) {
        let adjusted = adjust_inventory(&items, &scenario);
        prop_assert_eq!(adjusted.len(), items.len());
        for (original, after) in items.iter().zip(&adjusted) {
            if scenario.destroys(original) {
                prop_assert_eq!(after.quantity, 0.0);
                prop_assert_eq!(after.id, original.id);
            } else {
                prop_assert_eq!(after, original);
            }
        }
    }

    #[test]
    fn emergency_preview_leaves_inventory_untouched(
        items in inventory_strategy(),
        members in household_strategy(0),
        scenario in emergency_strategy(),
    ) {
        let snapshot = items.clone();
        let settings = PrepperSettings::default();
        let _ = calculate_sustainability(
            &ReportInput { items: &items, members: &members, scenarios: &[], settings: &settings },
            today(),
            Some(&scenario),
        );
        prop_assert_eq!(items, snapshot);
    }
}
