//! PrepperTrack Headless Harness
//!
//! Loads a household state, prints the sustainability dashboard and
//! validates the engine against it. Runs entirely in-process: no UI,
//! no storage, no networking.
//!
//! Usage:
//!   cargo run -p prepper-simtest
//!   cargo run -p prepper-simtest -- --state my_state.json --today 2026-10-01
//!   cargo run -p prepper-simtest -- --emergency flood --basement-flooded
//!   cargo run -p prepper-simtest -- --export json --out report.json
//!   cargo run -p prepper-simtest -- --sweep 500 --seed 7 --verbose

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use prepper_logic::emergency::{adjust_inventory, EmergencyScenario};
use prepper_logic::export::{inventory_csv, report_json, state_json};
use prepper_logic::household::{derive_daily_needs, ActivityLevel, MemberDraft};
use prepper_logic::ids::{ItemId, MemberId, ScenarioId};
use prepper_logic::inventory::{Category, ItemDraft, Unit};
use prepper_logic::needs::aggregate_needs;
use prepper_logic::rationing::evaluate_scenario;
use prepper_logic::report::SustainabilityReport;
use prepper_logic::settings::{validate_settings, PrepperSettings};
use prepper_logic::store::{reduce, Action, AppState};
use prepper_logic::supplies::compute_supply_duration;
use prepper_logic::warnings::{Severity, WarningKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Bundled household (used when --state is omitted) ────────────────────
const SAMPLE_STATE_JSON: &str = include_str!("../../../data/sample_state.json");

const DEFAULT_SEED: u64 = 0x5EED;

// ── CLI ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "prepper-simtest", version)]
#[command(about = "PrepperTrack headless harness: dashboard, validation sweeps, exports")]
struct Cli {
    /// Household state JSON (defaults to the bundled sample).
    #[arg(long)]
    state: Option<PathBuf>,

    /// Settings JSON to import over the loaded state.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Date expiry is measured against (defaults to today, local time).
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Preview the dashboard under an emergency.
    #[arg(long, value_enum)]
    emergency: Option<EmergencyArg>,

    #[arg(long, default_value_t = 48.0)]
    outage_hours: f64,

    #[arg(long)]
    basement_flooded: bool,

    /// Write an export after validation.
    #[arg(long, value_enum)]
    export: Option<ExportFormat>,

    /// Export destination (stdout when omitted).
    #[arg(long, requires = "export")]
    out: Option<PathBuf>,

    /// Random households checked by the property sweep.
    #[arg(long, default_value_t = 200)]
    sweep: usize,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmergencyArg {
    PowerOutage,
    Flood,
    Pandemic,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportFormat {
    /// Inventory as CSV.
    Csv,
    /// Sustainability report as JSON.
    Json,
}

impl Cli {
    fn emergency_scenario(&self) -> Option<EmergencyScenario> {
        self.emergency.map(|arg| match arg {
            EmergencyArg::PowerOutage => EmergencyScenario::PowerOutage {
                duration_hours: self.outage_hours,
            },
            EmergencyArg::Flood => EmergencyScenario::Flood {
                basement_flooded: self.basement_flooded,
            },
            EmergencyArg::Pandemic => EmergencyScenario::Pandemic,
        })
    }
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    println!("=== PrepperTrack Simulation Harness ===\n");

    let mut state = load_state(cli.state.as_ref())?;
    if let Some(path) = &cli.settings {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        state = reduce(&state, Action::ImportSettings(json))?;
    }
    if let Some(scenario) = cli.emergency_scenario() {
        state = reduce(&state, Action::SetEmergency(Some(scenario)))?;
    }
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let seed = cli.seed.unwrap_or(DEFAULT_SEED);
    log::info!("today {today}, sweep {} with seed {seed}", cli.sweep);

    let report = state.report(today);
    print_dashboard(&report);

    let mut results = Vec::new();

    // 1. Loaded state integrity
    results.extend(validate_state_integrity(&state, cli.verbose));

    // 2. Report consistency on the loaded state
    results.extend(validate_report(&state, &report));

    // 3. Reference household
    results.extend(validate_reference_household(today));

    // 4. Emergency previews against the loaded inventory
    results.extend(validate_emergencies(&state, today, cli.verbose));

    // 5. Reducer referential rules
    results.extend(validate_store(&state));

    // 6. Random property sweep
    results.extend(validate_random_sweep(cli.sweep, seed, cli.verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || cli.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if let Some(format) = cli.export {
        write_export(format, &state, &report, cli.out.as_ref())?;
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn load_state(path: Option<&PathBuf>) -> anyhow::Result<AppState> {
    let json = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("reading state from {}", p.display()))?,
        None => SAMPLE_STATE_JSON.to_string(),
    };
    let state: AppState = serde_json::from_str(&json).context("parsing household state")?;
    log::info!(
        "loaded {} items, {} members, {} groups",
        state.inventory.len(),
        state.household.len(),
        state.groups.len()
    );
    Ok(state)
}

fn write_export(
    format: ExportFormat,
    state: &AppState,
    report: &SustainabilityReport,
    out: Option<&PathBuf>,
) -> anyhow::Result<()> {
    let body = match format {
        ExportFormat::Csv => inventory_csv(&state.inventory),
        ExportFormat::Json => report_json(report)?,
    };
    match out {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("writing export to {}", path.display()))?;
            println!("Export written to {}", path.display());
        }
        None => println!("\n{body}"),
    }
    Ok(())
}

// ── Dashboard ───────────────────────────────────────────────────────────

fn print_dashboard(report: &SustainabilityReport) {
    println!("--- Dashboard ({}) ---", report.generated_on);
    if let Some(emergency) = &report.emergency {
        println!("  Emergency preview: {}", emergency.label());
        for tip in emergency.tips() {
            println!("    - {tip}");
        }
    }
    println!(
        "  Household: {} member(s), {:.0} kcal/day, {:.2} L/day ({:.2} L before margin)",
        report.needs.member_count,
        report.needs.daily_calories,
        report.needs.daily_water_liters,
        report.needs.base_water_liters
    );
    println!(
        "  Supply:    {:.0} kcal, {:.1} L → food {}d, water {}d, normal usage {}d",
        report.supply.total_calories,
        report.supply.total_water_liters,
        report.supply.food_days,
        report.supply.water_days,
        report.normal_usage_days
    );
    println!(
        "  Preparedness: {:.0}% ({}), inventory value {:.2}",
        report.preparedness_percent,
        report.preparedness_band.label(),
        report.inventory_value
    );

    println!("  Rationing:");
    for s in &report.scenarios {
        println!(
            "    {:20} {:>5.1}%  {:>6.0} kcal/person  food {:>4}d  overall {:>4}d{}",
            s.name,
            s.reduction_percentage,
            s.calories_per_person,
            s.food_days,
            s.overall_days,
            if s.is_unsafe { "  UNSAFE" } else { "" }
        );
    }

    if !report.item_coverage.is_empty() {
        println!("  Item coverage:");
        for c in &report.item_coverage {
            println!("    {:20} {:>7.1}d", c.name, c.days);
        }
    }

    println!("  Warnings:");
    for w in &report.warnings {
        let tag = match w.severity {
            Severity::Critical => "CRIT",
            Severity::Warning => "WARN",
            Severity::Info => "INFO",
        };
        println!("    [{tag}] {}: {}", w.title, w.message);
    }
    println!();
}

// ── 1. State Integrity ──────────────────────────────────────────────────

fn validate_state_integrity(state: &AppState, verbose: bool) -> Vec<TestResult> {
    println!("--- State Integrity ---");
    let mut results = Vec::new();

    let ids: Vec<u64> = state
        .inventory
        .iter()
        .map(|i| i.id.0)
        .chain(state.household.iter().map(|m| m.id.0))
        .chain(state.groups.iter().map(|g| g.id.0))
        .chain(state.scenarios.iter().map(|s| s.id.0))
        .collect();
    let unique: HashSet<u64> = ids.iter().copied().collect();
    results.push(TestResult {
        name: "state_ids_unique".into(),
        passed: unique.len() == ids.len(),
        detail: format!("{} ids, {} distinct", ids.len(), unique.len()),
    });

    let max_id = ids.iter().copied().max().unwrap_or(0);
    results.push(TestResult {
        name: "state_next_id_fresh".into(),
        passed: state.next_id > max_id,
        detail: format!("next_id={} highest={}", state.next_id, max_id),
    });

    let mut group_mismatches = Vec::new();
    for member in &state.household {
        let listed_in: Vec<_> = state
            .groups
            .iter()
            .filter(|g| g.contains(member.id))
            .map(|g| g.id)
            .collect();
        let consistent = match member.group_id {
            Some(g) => listed_in == vec![g],
            None => listed_in.is_empty(),
        };
        if !consistent {
            group_mismatches.push(member.name.clone());
        }
    }
    let leaders_ok = state
        .groups
        .iter()
        .all(|g| g.leader_id.map_or(true, |l| g.contains(l)));
    results.push(TestResult {
        name: "state_groups_in_sync".into(),
        passed: group_mismatches.is_empty() && leaders_ok,
        detail: format!(
            "mismatched members: {:?}, leaders valid: {}",
            group_mismatches, leaders_ok
        ),
    });

    let member_ids: HashSet<MemberId> = state.household.iter().map(|m| m.id).collect();
    let dangling = state
        .inventory
        .iter()
        .flat_map(|i| i.required_by.iter())
        .filter(|m| !member_ids.contains(m))
        .count();
    results.push(TestResult {
        name: "state_medical_links_resolve".into(),
        passed: dangling == 0,
        detail: format!("{} dangling required_by link(s)", dangling),
    });

    let mut stale = Vec::new();
    for m in &state.household {
        let (kcal, water) = derive_daily_needs(m.age, m.activity_level);
        if (kcal - m.daily_calories).abs() > 1e-6 || (water - m.daily_water_liters).abs() > 1e-6 {
            stale.push(format!(
                "{} ({:.0}/{:.3} vs {:.0}/{:.3})",
                m.name, m.daily_calories, m.daily_water_liters, kcal, water
            ));
        }
    }
    results.push(TestResult {
        name: "state_needs_derived".into(),
        passed: stale.is_empty(),
        detail: if stale.is_empty() {
            format!("{} member(s) match the need table", state.household.len())
        } else {
            stale.join(", ")
        },
    });

    let settings_errors = validate_settings(&state.settings);
    results.push(TestResult {
        name: "state_settings_valid".into(),
        passed: settings_errors.is_empty(),
        detail: format!("{:?}", state.settings),
    });

    if verbose {
        for category in Category::all() {
            let count = state
                .inventory
                .iter()
                .filter(|i| i.category == *category)
                .count();
            if count > 0 {
                println!("    {:14}: {} item(s)", category.label(), count);
            }
        }
    }

    results
}

// ── 2. Report Consistency ───────────────────────────────────────────────

fn validate_report(state: &AppState, report: &SustainabilityReport) -> Vec<TestResult> {
    println!("--- Report Consistency ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "report_overall_is_min".into(),
        passed: report.supply.overall_days
            == report.supply.food_days.min(report.supply.water_days)
            && report.normal_usage_days == report.supply.overall_days,
        detail: format!(
            "food={} water={} overall={}",
            report.supply.food_days, report.supply.water_days, report.supply.overall_days
        ),
    });

    let order_matches = report
        .scenarios
        .iter()
        .map(|o| o.scenario_id)
        .eq(state.scenarios.iter().map(|s| s.id));
    results.push(TestResult {
        name: "report_scenarios_in_order".into(),
        passed: order_matches,
        detail: format!("{} scenario outcome(s)", report.scenarios.len()),
    });

    let unsafe_outcomes = report.scenarios.iter().filter(|o| o.is_unsafe).count();
    let unsafe_warnings = report
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::UnsafeRationing)
        .count();
    let expected_warnings = if report.needs.is_empty() {
        0
    } else {
        unsafe_outcomes
    };
    results.push(TestResult {
        name: "report_unsafe_warned".into(),
        passed: unsafe_warnings == expected_warnings,
        detail: format!(
            "{} unsafe outcome(s), {} warning(s)",
            unsafe_outcomes, unsafe_warnings
        ),
    });

    let preparedness = report
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::Preparedness)
        .count();
    results.push(TestResult {
        name: "report_single_preparedness".into(),
        passed: preparedness == 1,
        detail: format!("{} preparedness warning(s)", preparedness),
    });

    results
}

// ── 3. Reference Household ──────────────────────────────────────────────

fn adult(name: &str) -> MemberDraft {
    MemberDraft {
        name: name.to_string(),
        age: 35,
        activity_level: ActivityLevel::Sedentary,
        group_id: None,
        medical_conditions: Vec::new(),
        dietary_restrictions: Vec::new(),
        skills: Vec::new(),
    }
}

fn draft(name: &str, category: Category, quantity: f64, unit: Unit) -> ItemDraft {
    ItemDraft {
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

fn reference_state() -> Result<AppState, prepper_logic::error::StoreError> {
    let mut food = draft("Ration bars", Category::Food, 28.0, Unit::Each);
    food.calories_per_unit = Some(1000.0);
    let actions = vec![
        Action::AddMember(adult("A")),
        Action::AddMember(adult("B")),
        Action::AddItem(food),
        Action::AddItem(draft("Water", Category::Water, 10.0, Unit::Gallons)),
    ];
    actions
        .into_iter()
        .try_fold(AppState::default(), |state, action| reduce(&state, action))
}

fn validate_reference_household(today: NaiveDate) -> Vec<TestResult> {
    println!("--- Reference Household ---");
    let mut results = Vec::new();

    let state = match reference_state() {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "reference_build".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };
    let report = state.report(today);

    results.push(TestResult {
        name: "reference_needs".into(),
        passed: (report.needs.daily_calories - 4000.0).abs() < 1e-9
            && (report.needs.base_water_liters - 6.0).abs() < 1e-9,
        detail: format!(
            "{:.0} kcal, {:.2} L",
            report.needs.daily_calories, report.needs.base_water_liters
        ),
    });

    results.push(TestResult {
        name: "reference_days".into(),
        passed: report.supply.food_days == 7
            && report.supply.water_days == 5
            && report.normal_usage_days == 5,
        detail: format!(
            "food={} water={} normal={}",
            report.supply.food_days, report.supply.water_days, report.normal_usage_days
        ),
    });

    let water_note = report
        .warnings
        .iter()
        .find(|w| w.kind == WarningKind::WaterSafety);
    results.push(TestResult {
        name: "reference_water_note".into(),
        passed: water_note.is_some_and(|w| {
            w.severity == Severity::Info && w.message.contains("(1 day difference)")
        }),
        detail: water_note
            .map(|w| w.message.clone())
            .unwrap_or_else(|| "missing".into()),
    });

    results
}

// ── 4. Emergencies ──────────────────────────────────────────────────────

fn emergency_key(scenario: &EmergencyScenario) -> String {
    match scenario {
        EmergencyScenario::PowerOutage { duration_hours } => {
            format!("power_outage_{:.0}h", duration_hours)
        }
        EmergencyScenario::Flood {
            basement_flooded: true,
        } => "flood_basement".into(),
        EmergencyScenario::Flood {
            basement_flooded: false,
        } => "flood_dry".into(),
        EmergencyScenario::Pandemic => "pandemic".into(),
    }
}

fn validate_emergencies(state: &AppState, today: NaiveDate, verbose: bool) -> Vec<TestResult> {
    println!("--- Emergency Scenarios ---");
    let mut results = Vec::new();

    let mut baseline_state = state.clone();
    baseline_state.active_emergency = None;
    let baseline = baseline_state.report(today);

    let scenarios = [
        EmergencyScenario::PowerOutage {
            duration_hours: 12.0,
        },
        EmergencyScenario::PowerOutage {
            duration_hours: 72.0,
        },
        EmergencyScenario::Flood {
            basement_flooded: false,
        },
        EmergencyScenario::Flood {
            basement_flooded: true,
        },
        EmergencyScenario::Pandemic,
    ];

    for scenario in scenarios {
        let snapshot = baseline_state.inventory.clone();
        let adjusted = adjust_inventory(&baseline_state.inventory, &scenario);
        let destroyed = baseline_state
            .inventory
            .iter()
            .filter(|i| scenario.destroys(i))
            .count();
        let untouched = baseline_state
            .inventory
            .iter()
            .zip(&adjusted)
            .all(|(before, after)| scenario.destroys(before) || before == after);

        let mut preview = baseline_state.clone();
        preview.active_emergency = Some(scenario.clone());
        let report = preview.report(today);

        let key = emergency_key(&scenario);
        results.push(TestResult {
            name: format!("emergency_{}_non_mutating", key),
            passed: baseline_state.inventory == snapshot && preview.inventory == snapshot,
            detail: format!("{} destroyed of {}", destroyed, snapshot.len()),
        });
        results.push(TestResult {
            name: format!("emergency_{}_untouched_rest", key),
            passed: untouched,
            detail: "non-matching items unchanged".into(),
        });
        results.push(TestResult {
            name: format!("emergency_{}_never_adds", key),
            passed: report.supply.food_days <= baseline.supply.food_days
                && report.supply.water_days <= baseline.supply.water_days,
            detail: format!(
                "food {}→{} water {}→{}",
                baseline.supply.food_days,
                report.supply.food_days,
                baseline.supply.water_days,
                report.supply.water_days
            ),
        });

        if verbose {
            println!(
                "    {:12} destroys {} item(s): food {}d, water {}d",
                scenario.label(),
                destroyed,
                report.supply.food_days,
                report.supply.water_days
            );
        }
    }

    results
}

// ── 5. Store ────────────────────────────────────────────────────────────

fn validate_store(state: &AppState) -> Vec<TestResult> {
    println!("--- Store Reducer ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "store_unknown_item_rejected".into(),
        passed: reduce(state, Action::DeleteItem(ItemId(u64::MAX))).is_err(),
        detail: "delete of a missing item fails".into(),
    });
    results.push(TestResult {
        name: "store_unknown_scenario_rejected".into(),
        passed: reduce(state, Action::DeleteScenario(ScenarioId(u64::MAX))).is_err(),
        detail: "delete of a missing scenario fails".into(),
    });

    let bad_settings = PrepperSettings {
        water_safety_margin: 0.5,
        ..state.settings.clone()
    };
    results.push(TestResult {
        name: "store_invalid_settings_rejected".into(),
        passed: reduce(state, Action::UpdateSettings(bad_settings)).is_err(),
        detail: "margin 0.5 rejected".into(),
    });

    if let Some(member) = state.household.first() {
        match reduce(state, Action::DeleteMember(member.id)) {
            Ok(next) => {
                let in_groups = next.groups.iter().any(|g| g.contains(member.id));
                let leads = next.groups.iter().any(|g| g.leader_id == Some(member.id));
                let linked = next
                    .inventory
                    .iter()
                    .any(|i| i.required_by.contains(&member.id));
                results.push(TestResult {
                    name: "store_delete_member_cleans_links".into(),
                    passed: !in_groups && !leads && !linked,
                    detail: format!(
                        "{}: groups={} leader={} items={}",
                        member.name, in_groups, leads, linked
                    ),
                });
            }
            Err(e) => results.push(TestResult {
                name: "store_delete_member_cleans_links".into(),
                passed: false,
                detail: e.to_string(),
            }),
        }
    }

    let reload = state_json(state)
        .map_err(|e| e.to_string())
        .and_then(|json| serde_json::from_str::<AppState>(&json).map_err(|e| e.to_string()))
        .and_then(|reloaded| {
            let next = reduce(&reloaded, Action::AddGroup { name: "Reload".into() })
                .map_err(|e| e.to_string())?;
            Ok((reloaded, next))
        });
    match reload {
        Ok((reloaded, next)) => {
            let new_id = next.groups.last().map(|g| g.id.0);
            let fresh = new_id.is_some_and(|id| id > state.highest_id());
            results.push(TestResult {
                name: "store_reload_keeps_ids_fresh".into(),
                passed: reloaded == *state && fresh,
                detail: format!(
                    "round trip equal: {}, next id {:?} above {}",
                    reloaded == *state,
                    new_id,
                    state.highest_id()
                ),
            });
        }
        Err(e) => results.push(TestResult {
            name: "store_reload_keeps_ids_fresh".into(),
            passed: false,
            detail: e,
        }),
    }

    results
}

// ── 6. Random Property Sweep ────────────────────────────────────────────

const SWEEP_UNITS: [Unit; 7] = [
    Unit::Each,
    Unit::Cans,
    Unit::Pounds,
    Unit::Kilograms,
    Unit::Gallons,
    Unit::Liters,
    Unit::Milliliters,
];

const SWEEP_LOCATIONS: [&str; 4] = ["Pantry", "Basement", "Garage", "basement shelf"];

const SWEEP_ACTIVITY: [ActivityLevel; 4] = [
    ActivityLevel::Sedentary,
    ActivityLevel::Moderate,
    ActivityLevel::Active,
    ActivityLevel::VeryActive,
];

fn random_state(rng: &mut StdRng) -> Result<AppState, prepper_logic::error::StoreError> {
    let mut state = AppState::default();
    for i in 0..rng.gen_range(0..6usize) {
        let member = MemberDraft {
            name: format!("member {i}"),
            age: rng.gen_range(0..100),
            activity_level: SWEEP_ACTIVITY[rng.gen_range(0..SWEEP_ACTIVITY.len())],
            group_id: None,
            medical_conditions: Vec::new(),
            dietary_restrictions: Vec::new(),
            skills: Vec::new(),
        };
        state = reduce(&state, Action::AddMember(member))?;
    }
    let categories = Category::all();
    for i in 0..rng.gen_range(0..15usize) {
        let item = ItemDraft {
            name: if rng.gen_bool(0.2) {
                format!("canned item {i}")
            } else {
                format!("item {i}")
            },
            category: categories[rng.gen_range(0..categories.len())],
            quantity: rng.gen_range(0.0..500.0),
            unit: SWEEP_UNITS[rng.gen_range(0..SWEEP_UNITS.len())],
            expiration_date: None,
            storage_location: SWEEP_LOCATIONS[rng.gen_range(0..SWEEP_LOCATIONS.len())].to_string(),
            calories_per_unit: rng.gen_bool(0.6).then(|| rng.gen_range(0.0..3000.0)),
            usage_rate_per_person_per_day: 0.0,
            cost: None,
            requires_refrigeration: rng.gen_bool(0.3),
            required_by: Vec::new(),
        };
        state = reduce(&state, Action::AddItem(item))?;
    }
    let settings = PrepperSettings {
        water_safety_margin: rng.gen_range(1.0..=3.0),
        ..PrepperSettings::default()
    };
    reduce(&state, Action::UpdateSettings(settings))
}

#[derive(Default)]
struct SweepTally {
    binding: usize,
    monotone: usize,
    margin: usize,
    rationing: usize,
    emergency: usize,
}

fn validate_random_sweep(count: usize, seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Random Property Sweep (seed {seed}) ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut failures = SweepTally::default();

    for round in 0..count {
        let state = match random_state(&mut rng) {
            Ok(s) => s,
            Err(e) => {
                results.push(TestResult {
                    name: format!("sweep_build_{round}"),
                    passed: false,
                    detail: e.to_string(),
                });
                continue;
            }
        };
        let needs = aggregate_needs(&state.household, state.settings.water_safety_margin);
        let supply = compute_supply_duration(&state.inventory, &needs);

        if supply.overall_days != supply.food_days.min(supply.water_days) {
            failures.binding += 1;
        }

        if !state.inventory.is_empty() {
            let mut grown = state.inventory.clone();
            let pick = rng.gen_range(0..grown.len());
            grown[pick].quantity += rng.gen_range(0.0..200.0);
            let after = compute_supply_duration(&grown, &needs);
            if after.food_days < supply.food_days || after.water_days < supply.water_days {
                failures.monotone += 1;
            }
        }

        let plain_needs = aggregate_needs(&state.household, 1.0);
        let plain = compute_supply_duration(&state.inventory, &plain_needs);
        if supply.water_days > plain.water_days {
            failures.margin += 1;
        }

        let normal_intake = state.scenarios.iter().find(|s| s.reduction_percentage == 0.0);
        if let (false, Some(normal_intake)) = (needs.is_empty(), normal_intake) {
            let normal = evaluate_scenario(
                normal_intake,
                &needs,
                &supply,
                state.settings.minimum_calories_per_day,
            );
            for scenario in &state.scenarios {
                let outcome = evaluate_scenario(
                    scenario,
                    &needs,
                    &supply,
                    state.settings.minimum_calories_per_day,
                );
                let expected =
                    normal.calories_per_person * (1.0 - scenario.reduction_percentage / 100.0);
                let scale = expected.abs().max(1.0);
                let unsafe_ok = outcome.is_unsafe
                    == (outcome.calories_per_person < state.settings.minimum_calories_per_day);
                if (outcome.calories_per_person - expected).abs() > 1e-9 * scale || !unsafe_ok {
                    failures.rationing += 1;
                }
            }
        }

        let scenario = match rng.gen_range(0..3) {
            0 => EmergencyScenario::PowerOutage {
                duration_hours: rng.gen_range(0.0..96.0),
            },
            1 => EmergencyScenario::Flood {
                basement_flooded: rng.gen_bool(0.5),
            },
            _ => EmergencyScenario::Pandemic,
        };
        let snapshot = state.inventory.clone();
        let adjusted = adjust_inventory(&state.inventory, &scenario);
        let shape_ok = adjusted.len() == snapshot.len()
            && snapshot.iter().zip(&adjusted).all(|(before, after)| {
                if scenario.destroys(before) {
                    after.quantity == 0.0 && after.id == before.id
                } else {
                    before == after
                }
            });
        if !shape_ok || state.inventory != snapshot {
            failures.emergency += 1;
        }

        if verbose && round < 5 {
            println!(
                "    round {round}: {} member(s), {} item(s), food {}d, water {}d",
                needs.member_count,
                state.inventory.len(),
                supply.food_days,
                supply.water_days
            );
        }
    }

    let checks = [
        ("sweep_overall_is_binding", failures.binding),
        ("sweep_more_stock_monotone", failures.monotone),
        ("sweep_margin_never_adds_days", failures.margin),
        ("sweep_rationing_scales", failures.rationing),
        ("sweep_emergency_copy_on_write", failures.emergency),
    ];
    for (name, failed) in checks {
        results.push(TestResult {
            name: name.into(),
            passed: failed == 0,
            detail: format!("{} violation(s) over {} household(s)", failed, count),
        });
    }

    results
}
