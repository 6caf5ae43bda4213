//! One-way exports (CSV, JSON) and the settings import.
//!
//! CSV output quotes every field and doubles embedded quotes, so names with
//! commas or quotes survive a spreadsheet round trip.

use crate::error::{ExportError, ImportError};
use crate::inventory::InventoryItem;
use crate::report::SustainabilityReport;
use crate::settings::{validate_settings, PrepperSettings};
use crate::store::AppState;

const INVENTORY_HEADER: [&str; 11] = [
    "Name",
    "Category",
    "Quantity",
    "Unit",
    "Expiration Date",
    "Storage Location",
    "Calories Per Unit",
    "Usage Rate Per Person Per Day",
    "Cost",
    "Requires Refrigeration",
    "Value",
];

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn csv_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| quote(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Inventory as CSV, one row per item, header first.
pub fn inventory_csv(items: &[InventoryItem]) -> String {
    let mut lines = vec![csv_row(&INVENTORY_HEADER)];
    for item in items {
        lines.push(csv_row(&[
            item.name.clone(),
            item.category.label().to_string(),
            item.quantity.to_string(),
            item.unit.label().to_string(),
            item.expiration_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            item.storage_location.clone(),
            optional(item.calories_per_unit),
            item.usage_rate_per_person_per_day.to_string(),
            optional(item.cost),
            if item.requires_refrigeration { "yes" } else { "no" }.to_string(),
            format!("{:.2}", item.value()),
        ]));
    }
    lines.join("\n")
}

/// Report summary as two-column CSV, followed by scenarios and warnings.
pub fn report_csv(report: &SustainabilityReport) -> String {
    let mut lines = vec![csv_row(&["Metric", "Value"])];
    let summary = [
        ("Generated On", report.generated_on.to_string()),
        (
            "Emergency",
            report
                .emergency
                .as_ref()
                .map(|e| e.label().to_string())
                .unwrap_or_else(|| "None".to_string()),
        ),
        ("Household Members", report.needs.member_count.to_string()),
        ("Daily Calories", format!("{:.0}", report.needs.daily_calories)),
        (
            "Daily Water (L)",
            format!("{:.2}", report.needs.daily_water_liters),
        ),
        ("Food Days", report.supply.food_days.to_string()),
        ("Water Days", report.supply.water_days.to_string()),
        ("Normal Usage Days", report.normal_usage_days.to_string()),
        (
            "Preparedness",
            format!(
                "{:.0}% ({})",
                report.preparedness_percent,
                report.preparedness_band.label()
            ),
        ),
        ("Inventory Value", format!("{:.2}", report.inventory_value)),
    ];
    for (metric, value) in summary {
        lines.push(csv_row(&[metric.to_string(), value]));
    }

    lines.push(String::new());
    lines.push(csv_row(&[
        "Scenario",
        "Reduction %",
        "Calories Per Person",
        "Food Days",
        "Overall Days",
        "Safe",
    ]));
    for s in &report.scenarios {
        lines.push(csv_row(&[
            s.name.clone(),
            s.reduction_percentage.to_string(),
            format!("{:.0}", s.calories_per_person),
            s.food_days.to_string(),
            s.overall_days.to_string(),
            if s.is_unsafe { "no" } else { "yes" }.to_string(),
        ]));
    }

    lines.push(String::new());
    lines.push(csv_row(&["Severity", "Title", "Message"]));
    for w in &report.warnings {
        lines.push(csv_row(&[
            format!("{:?}", w.severity).to_lowercase(),
            w.title.clone(),
            w.message.clone(),
        ]));
    }
    lines.join("\n")
}

pub fn report_json(report: &SustainabilityReport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn state_json(state: &AppState) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(state)?)
}

pub fn settings_json(settings: &PrepperSettings) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(settings)?)
}

/// Parse and validate settings from a JSON object. Missing keys take
/// their defaults.
pub fn import_settings(json: &str) -> Result<PrepperSettings, ImportError> {
    let settings: PrepperSettings = serde_json::from_str(json)?;
    let errors = validate_settings(&settings);
    if !errors.is_empty() {
        return Err(ImportError::Invalid(errors));
    }
    log::info!(
        "imported settings: goal {} days, margin {:.2}",
        settings.preparedness_goal_days,
        settings.water_safety_margin
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{test_item, Category, Unit};
    use chrono::NaiveDate;

    #[test]
    fn test_inventory_csv_quotes_everything() {
        let name = "Beans, \"Pinto\"";
        let mut item = test_item(1, name, Category::CannedGoods, 12.0, Unit::Cans);
        item.expiration_date = NaiveDate::from_ymd_opt(2027, 3, 9);
        item.cost = Some(1.25);
        let csv = inventory_csv(&[item]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("\"Name\",\"Category\""));
        assert_eq!(
            lines[1],
            "\"Beans, \"\"Pinto\"\"\",\"Canned Goods\",\"12\",\"cans\",\"2027-03-09\",\
             \"Pantry\",\"\",\"0\",\"1.25\",\"no\",\"15.00\""
        );
    }

    #[test]
    fn test_inventory_csv_empty_has_header() {
        assert_eq!(inventory_csv(&[]).lines().count(), 1);
    }

    #[test]
    fn test_report_csv_sections() {
        let state = AppState::default();
        let report = state.report(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let csv = report_csv(&report);
        assert!(csv.contains("\"Normal Usage Days\",\"0\""));
        assert!(csv.contains("\"Scenario\",\"Reduction %\""));
        assert!(csv.contains("\"critical\",\"No Household\""));
    }

    #[test]
    fn test_import_rejects_invalid() {
        let err = import_settings(r#"{"water_safety_margin": 0.5}"#).unwrap_err();
        assert!(matches!(err, ImportError::Invalid(_)));
        let err = import_settings("not json").unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
    }

    #[test]
    fn test_settings_export_reimports() {
        let settings = PrepperSettings {
            preparedness_goal_days: 90,
            ..PrepperSettings::default()
        };
        let json = settings_json(&settings).unwrap();
        assert_eq!(import_settings(&json).unwrap(), settings);
    }

    #[test]
    fn test_report_json_is_object() {
        let report = AppState::default().report(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let json = report_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["normal_usage_days"], 0);
        assert!(value["warnings"].is_array());
    }
}
