//! Household needs aggregation.

use serde::{Deserialize, Serialize};

use crate::household::HouseholdMember;

/// Combined daily needs of the whole household.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HouseholdNeeds {
    pub member_count: usize,
    pub daily_calories: f64,
    /// Sum of member water needs without any margin.
    pub base_water_liters: f64,
    /// `base_water_liters * water_safety_margin`.
    pub daily_water_liters: f64,
}

impl HouseholdNeeds {
    pub fn is_empty(&self) -> bool {
        self.member_count == 0
    }
}

/// Sum member needs and scale water by the safety margin.
///
/// An empty household yields all zeros; flagging it is the caller's job.
pub fn aggregate_needs(members: &[HouseholdMember], water_safety_margin: f64) -> HouseholdNeeds {
    let daily_calories = members.iter().map(|m| m.daily_calories).sum();
    let base_water_liters: f64 = members.iter().map(|m| m.daily_water_liters).sum();
    HouseholdNeeds {
        member_count: members.len(),
        daily_calories,
        base_water_liters,
        daily_water_liters: base_water_liters * water_safety_margin,
    }
}
