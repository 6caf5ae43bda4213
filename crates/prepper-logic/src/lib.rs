//! Pure sustainability logic for PrepperTrack.
//!
//! This crate contains the household preparedness engine and the state it
//! runs over, independent of any UI or storage. Functions take plain data
//! and return results, making them unit-testable and usable from the
//! headless harness, a browser front end (WASM), or any future shell.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Unit conversions, thresholds, need tables |
//! | [`emergency`] | Power outage / flood / pandemic inventory adjustment |
//! | [`error`] | Store, import and export errors |
//! | [`export`] | CSV and JSON exports, settings import |
//! | [`household`] | Members, derived daily needs, groups, medical links |
//! | [`ids`] | Typed identifiers for items, members, groups, scenarios |
//! | [`inventory`] | Items, categories, units, expiry status |
//! | [`needs`] | Household calorie and water aggregation |
//! | [`rationing`] | Rationing scenarios and caloric adequacy |
//! | [`report`] | Full pipeline into a `SustainabilityReport` |
//! | [`settings`] | Preparedness settings and validation |
//! | [`store`] | Application state and pure reducer |
//! | [`supplies`] | Food/water days of supply, per-item coverage |
//! | [`warnings`] | Warning flags and preparedness bands |

pub mod constants;
pub mod emergency;
pub mod error;
pub mod export;
pub mod household;
pub mod ids;
pub mod inventory;
pub mod needs;
pub mod rationing;
pub mod report;
pub mod settings;
pub mod store;
pub mod supplies;
pub mod warnings;
