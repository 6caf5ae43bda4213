//! Emergency scenarios: preview how a disruption shrinks usable stock.
//!
//! [`adjust_inventory`] returns a fresh inventory; the caller's inventory is
//! left untouched so both raw and adjusted views stay available.
//!
//! | Scenario | Effect |
//! |----------|--------|
//! | Power outage ≥ 30 h | refrigerated items spoil (quantity 0) |
//! | Flood with basement flooded | basement items lost unless canned |
//! | Pandemic | no inventory effect |

use serde::{Deserialize, Serialize};

use crate::constants::thresholds;
use crate::inventory::InventoryItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EmergencyScenario {
    PowerOutage { duration_hours: f64 },
    Flood { basement_flooded: bool },
    Pandemic,
}

impl EmergencyScenario {
    pub fn label(&self) -> &'static str {
        match self {
            EmergencyScenario::PowerOutage { .. } => "Power Outage",
            EmergencyScenario::Flood { .. } => "Flood",
            EmergencyScenario::Pandemic => "Pandemic",
        }
    }

    pub fn tips(&self) -> &'static [&'static str] {
        match self {
            EmergencyScenario::PowerOutage { .. } => &[
                "Keep refrigerator and freezer doors closed.",
                "Eat perishable food first, then frozen, then shelf-stable.",
                "Use flashlights instead of candles.",
                "Unplug electronics to protect against surges when power returns.",
            ],
            EmergencyScenario::Flood { .. } => &[
                "Move supplies to upper floors before water rises.",
                "Discard any food that touched flood water, except undamaged cans.",
                "Do not drink tap water until authorities declare it safe.",
                "Turn off electricity at the main breaker if water enters the home.",
            ],
            EmergencyScenario::Pandemic => &[
                "Limit trips outside; plan for two weeks of self-isolation.",
                "Keep a separate stock of fever reducers and hygiene supplies.",
                "Rotate perishables so fresh stock lasts through isolation.",
            ],
        }
    }

    /// Whether this scenario would zero out the given item.
    pub fn destroys(&self, item: &InventoryItem) -> bool {
        match self {
            EmergencyScenario::PowerOutage { duration_hours } => {
                *duration_hours >= thresholds::POWER_OUTAGE_SPOILAGE_HOURS
                    && item.requires_refrigeration
            }
            EmergencyScenario::Flood { basement_flooded } => {
                *basement_flooded
                    && item.stored_in(thresholds::FLOOD_LOCATION_KEYWORD)
                    && !item.is_canned()
            }
            // TODO: pandemic should feed preparedness metrics once the effect
            // on stock (e.g. stay-home consumption) is decided.
            EmergencyScenario::Pandemic => false,
        }
    }
}

/// Copy of `items` with quantities zeroed for stock the scenario destroys.
pub fn adjust_inventory(
    items: &[InventoryItem],
    scenario: &EmergencyScenario,
) -> Vec<InventoryItem> {
    items
        .iter()
        .map(|item| {
            let mut adjusted = item.clone();
            if scenario.destroys(item) {
                log::debug!(
                    "{}: {} ({}) lost, {} {} zeroed",
                    scenario.label(),
                    item.name,
                    item.id,
                    item.quantity,
                    item.unit.label()
                );
                adjusted.quantity = 0.0;
            }
            adjusted
        })
        .collect()
}
