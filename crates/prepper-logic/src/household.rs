//! Household members, their derived daily needs, and groups.
//!
//! Daily calories and water come from an age bracket scaled by activity
//! level. The store recomputes them whenever a member is added or edited.

use serde::{Deserialize, Serialize};

use crate::constants::needs;
use crate::ids::{GroupId, MemberId};
use crate::inventory::InventoryItem;

/// How physically demanding a member's day is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => needs::SEDENTARY_FACTOR,
            ActivityLevel::Moderate => needs::MODERATE_FACTOR,
            ActivityLevel::Active => needs::ACTIVE_FACTOR,
            ActivityLevel::VeryActive => needs::VERY_ACTIVE_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdMember {
    pub id: MemberId,
    pub name: String,
    pub age: u32,
    pub activity_level: ActivityLevel,
    /// Derived; see [`derive_daily_needs`].
    pub daily_calories: f64,
    /// Derived; see [`derive_daily_needs`].
    pub daily_water_liters: f64,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Member fields supplied by a caller; needs are derived, never supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDraft {
    pub name: String,
    pub age: u32,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl MemberDraft {
    pub fn into_member(self, id: MemberId) -> HouseholdMember {
        let (daily_calories, daily_water_liters) =
            derive_daily_needs(self.age, self.activity_level);
        HouseholdMember {
            id,
            name: self.name,
            age: self.age,
            activity_level: self.activity_level,
            daily_calories,
            daily_water_liters,
            group_id: self.group_id,
            medical_conditions: self.medical_conditions,
            dietary_restrictions: self.dietary_restrictions,
            skills: self.skills,
        }
    }
}

impl HouseholdMember {
    /// Re-derive stored needs from age and activity level.
    pub fn recompute_needs(&mut self) {
        let (kcal, water) = derive_daily_needs(self.age, self.activity_level);
        self.daily_calories = kcal;
        self.daily_water_liters = water;
    }

    pub fn has_medical_needs(&self) -> bool {
        !self.medical_conditions.is_empty()
    }
}

/// Daily (kcal, liters) for a person of the given age and activity.
pub fn derive_daily_needs(age: u32, activity: ActivityLevel) -> (f64, f64) {
    let (kcal, water) = needs::AGE_BRACKETS
        .iter()
        .find(|(max_age, _, _)| age <= *max_age)
        .map(|&(_, kcal, water)| (kcal, water))
        .unwrap_or((needs::SENIOR_CALORIES, needs::SENIOR_WATER_LITERS));
    let factor = activity.factor();
    ((kcal * factor).round(), water * factor)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub member_ids: Vec<MemberId>,
    #[serde(default)]
    pub leader_id: Option<MemberId>,
}

impl HouseholdGroup {
    pub fn contains(&self, member: MemberId) -> bool {
        self.member_ids.contains(&member)
    }
}

/// Items linked to a member as medical requirements.
pub fn linked_items<'a>(
    member: MemberId,
    items: &'a [InventoryItem],
) -> impl Iterator<Item = &'a InventoryItem> + 'a {
    items.iter().filter(move |i| i.required_by.contains(&member))
}

/// Members with medical conditions but no linked item in stock.
pub fn uncovered_medical_members<'a>(
    members: &'a [HouseholdMember],
    items: &[InventoryItem],
) -> Vec<&'a HouseholdMember> {
    members
        .iter()
        .filter(|m| m.has_medical_needs())
        .filter(|m| !linked_items(m.id, items).any(|i| i.quantity > 0.0))
        .collect()
}

#[cfg(test)]
pub(crate) fn test_member(id: u64, kcal: f64, water: f64) -> HouseholdMember {
    HouseholdMember {
        id: MemberId(id),
        name: format!("Member {id}"),
        age: 30,
        activity_level: ActivityLevel::Moderate,
        daily_calories: kcal,
        daily_water_liters: water,
        group_id: None,
        medical_conditions: Vec::new(),
        dietary_restrictions: Vec::new(),
        skills: Vec::new(),
    }
}
