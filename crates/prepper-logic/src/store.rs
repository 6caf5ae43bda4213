//! Application state and the reducer that transitions it.
//!
//! All edits go through [`reduce`], which either returns the next state or
//! an error and leaves the previous state untouched. The reducer keeps
//! cross-references consistent:
//! - deleting a member drops it from groups, group leadership and item links
//! - deleting a group clears `group_id` on its members
//! - a member's `group_id` and the group's `member_ids` always agree
//!
//! Loading tolerates missing keys but never yields a state whose next
//! allocated id collides with a loaded one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::emergency::EmergencyScenario;
use crate::error::StoreError;
use crate::export::import_settings;
use crate::household::{HouseholdGroup, HouseholdMember, MemberDraft};
use crate::ids::{GroupId, ItemId, MemberId, ScenarioId};
use crate::inventory::{InventoryItem, ItemDraft};
use crate::rationing::{default_scenarios, RationingScenario, ScenarioDraft};
use crate::report::{calculate_sustainability, ReportInput, SustainabilityReport};
use crate::settings::{validate_settings, PrepperSettings};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredState")]
pub struct AppState {
    pub inventory: Vec<InventoryItem>,
    pub household: Vec<HouseholdMember>,
    pub groups: Vec<HouseholdGroup>,
    pub scenarios: Vec<RationingScenario>,
    pub settings: PrepperSettings,
    /// Emergency previewed on the dashboard; never applied to `inventory`.
    pub active_emergency: Option<EmergencyScenario>,
    /// Lower bound for the next allocated id.
    pub next_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        let scenarios: Vec<RationingScenario> = (1..)
            .zip(default_scenarios())
            .map(|(id, draft)| draft.into_scenario(ScenarioId(id)))
            .collect();
        Self {
            inventory: Vec::new(),
            household: Vec::new(),
            groups: Vec::new(),
            next_id: scenarios.len() as u64 + 1,
            scenarios,
            settings: PrepperSettings::default(),
            active_emergency: None,
        }
    }
}

/// State as read from JSON: every key optional.
///
/// A missing `scenarios` key seeds the default scenarios with ids above
/// everything loaded, and `next_id` is raised past the highest loaded id.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredState {
    inventory: Vec<InventoryItem>,
    household: Vec<HouseholdMember>,
    groups: Vec<HouseholdGroup>,
    scenarios: Option<Vec<RationingScenario>>,
    settings: PrepperSettings,
    active_emergency: Option<EmergencyScenario>,
    next_id: u64,
}

impl TryFrom<StoredState> for AppState {
    type Error = StoreError;

    fn try_from(stored: StoredState) -> Result<Self, StoreError> {
        let seed_scenarios = stored.scenarios.is_none();
        let mut state = AppState {
            inventory: stored.inventory,
            household: stored.household,
            groups: stored.groups,
            scenarios: stored.scenarios.unwrap_or_default(),
            settings: stored.settings,
            active_emergency: stored.active_emergency,
            next_id: stored.next_id,
        };
        // Saturates: a full id space still loads and the next add errors
        state.next_id = state.next_id.max(state.highest_id().saturating_add(1));
        if seed_scenarios {
            for draft in default_scenarios() {
                let id = ScenarioId(state.allocate_id()?);
                state.scenarios.push(draft.into_scenario(id));
            }
        }
        Ok(state)
    }
}

/// A state transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum Action {
    AddItem(ItemDraft),
    UpdateItem(InventoryItem),
    DeleteItem(ItemId),
    AddMember(MemberDraft),
    UpdateMember(HouseholdMember),
    DeleteMember(MemberId),
    AddGroup { name: String },
    RenameGroup { id: GroupId, name: String },
    DeleteGroup(GroupId),
    AssignMemberToGroup { member: MemberId, group: Option<GroupId> },
    SetGroupLeader { group: GroupId, leader: Option<MemberId> },
    AddScenario(ScenarioDraft),
    UpdateScenario(RationingScenario),
    DeleteScenario(ScenarioId),
    UpdateSettings(PrepperSettings),
    /// Settings as a JSON object.
    ImportSettings(String),
    SetEmergency(Option<EmergencyScenario>),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddItem(_) => "add_item",
            Action::UpdateItem(_) => "update_item",
            Action::DeleteItem(_) => "delete_item",
            Action::AddMember(_) => "add_member",
            Action::UpdateMember(_) => "update_member",
            Action::DeleteMember(_) => "delete_member",
            Action::AddGroup { .. } => "add_group",
            Action::RenameGroup { .. } => "rename_group",
            Action::DeleteGroup(_) => "delete_group",
            Action::AssignMemberToGroup { .. } => "assign_member_to_group",
            Action::SetGroupLeader { .. } => "set_group_leader",
            Action::AddScenario(_) => "add_scenario",
            Action::UpdateScenario(_) => "update_scenario",
            Action::DeleteScenario(_) => "delete_scenario",
            Action::UpdateSettings(_) => "update_settings",
            Action::ImportSettings(_) => "import_settings",
            Action::SetEmergency(_) => "set_emergency",
        }
    }
}

/// Apply `action` to a copy of `state`.
pub fn reduce(state: &AppState, action: Action) -> Result<AppState, StoreError> {
    let mut next = state.clone();
    next.apply(action)?;
    Ok(next)
}

impl AppState {
    /// Dashboard report, with the active emergency applied if one is set.
    pub fn report(&self, today: NaiveDate) -> SustainabilityReport {
        calculate_sustainability(&self.report_input(), today, self.active_emergency.as_ref())
    }

    pub fn report_input(&self) -> ReportInput<'_> {
        ReportInput {
            items: &self.inventory,
            members: &self.household,
            scenarios: &self.scenarios,
            settings: &self.settings,
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&InventoryItem> {
        self.inventory.iter().find(|i| i.id == id)
    }

    pub fn member(&self, id: MemberId) -> Option<&HouseholdMember> {
        self.household.iter().find(|m| m.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&HouseholdGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn scenario(&self, id: ScenarioId) -> Option<&RationingScenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    fn apply(&mut self, action: Action) -> Result<(), StoreError> {
        log::debug!("reduce: {}", action.name());
        match action {
            Action::AddItem(draft) => {
                self.check_members(&draft.required_by)?;
                let id = ItemId(self.allocate_id()?);
                self.inventory.push(draft.into_item(id));
            }
            Action::UpdateItem(item) => {
                self.check_members(&item.required_by)?;
                let slot = self
                    .inventory
                    .iter_mut()
                    .find(|i| i.id == item.id)
                    .ok_or(StoreError::UnknownItem(item.id))?;
                *slot = item;
            }
            Action::DeleteItem(id) => {
                let before = self.inventory.len();
                self.inventory.retain(|i| i.id != id);
                if self.inventory.len() == before {
                    return Err(StoreError::UnknownItem(id));
                }
            }
            Action::AddMember(draft) => {
                let group = draft.group_id;
                if let Some(g) = group {
                    self.check_group(g)?;
                }
                let id = MemberId(self.allocate_id()?);
                let mut member = draft.into_member(id);
                member.group_id = None;
                self.household.push(member);
                self.set_member_group(id, group)?;
            }
            Action::UpdateMember(mut member) => {
                if let Some(g) = member.group_id {
                    self.check_group(g)?;
                }
                let group = member.group_id;
                let slot = self
                    .household
                    .iter_mut()
                    .find(|m| m.id == member.id)
                    .ok_or(StoreError::UnknownMember(member.id))?;
                member.recompute_needs();
                // Group membership is moved below so both sides stay in sync
                member.group_id = slot.group_id;
                let id = member.id;
                *slot = member;
                self.set_member_group(id, group)?;
            }
            Action::DeleteMember(id) => {
                let before = self.household.len();
                self.household.retain(|m| m.id != id);
                if self.household.len() == before {
                    return Err(StoreError::UnknownMember(id));
                }
                for group in &mut self.groups {
                    group.member_ids.retain(|m| *m != id);
                    if group.leader_id == Some(id) {
                        group.leader_id = None;
                    }
                }
                for item in &mut self.inventory {
                    item.required_by.retain(|m| *m != id);
                }
            }
            Action::AddGroup { name } => {
                let id = GroupId(self.allocate_id()?);
                self.groups.push(HouseholdGroup {
                    id,
                    name,
                    member_ids: Vec::new(),
                    leader_id: None,
                });
            }
            Action::RenameGroup { id, name } => {
                let group = self
                    .groups
                    .iter_mut()
                    .find(|g| g.id == id)
                    .ok_or(StoreError::UnknownGroup(id))?;
                group.name = name;
            }
            Action::DeleteGroup(id) => {
                let before = self.groups.len();
                self.groups.retain(|g| g.id != id);
                if self.groups.len() == before {
                    return Err(StoreError::UnknownGroup(id));
                }
                for member in &mut self.household {
                    if member.group_id == Some(id) {
                        member.group_id = None;
                    }
                }
            }
            Action::AssignMemberToGroup { member, group } => {
                if let Some(g) = group {
                    self.check_group(g)?;
                }
                self.set_member_group(member, group)?;
            }
            Action::SetGroupLeader { group, leader } => {
                let g = self
                    .groups
                    .iter_mut()
                    .find(|g| g.id == group)
                    .ok_or(StoreError::UnknownGroup(group))?;
                if let Some(l) = leader {
                    if !g.contains(l) {
                        return Err(StoreError::LeaderNotInGroup { group, leader: l });
                    }
                }
                g.leader_id = leader;
            }
            Action::AddScenario(draft) => {
                check_reduction(draft.reduction_percentage)?;
                let id = ScenarioId(self.allocate_id()?);
                self.scenarios.push(draft.into_scenario(id));
            }
            Action::UpdateScenario(scenario) => {
                check_reduction(scenario.reduction_percentage)?;
                let slot = self
                    .scenarios
                    .iter_mut()
                    .find(|s| s.id == scenario.id)
                    .ok_or(StoreError::UnknownScenario(scenario.id))?;
                *slot = scenario;
            }
            Action::DeleteScenario(id) => {
                let before = self.scenarios.len();
                self.scenarios.retain(|s| s.id != id);
                if self.scenarios.len() == before {
                    return Err(StoreError::UnknownScenario(id));
                }
            }
            Action::UpdateSettings(settings) => {
                let errors = validate_settings(&settings);
                if !errors.is_empty() {
                    return Err(StoreError::InvalidSettings(errors));
                }
                self.settings = settings;
            }
            Action::ImportSettings(json) => {
                self.settings = import_settings(&json)?;
            }
            Action::SetEmergency(emergency) => {
                self.active_emergency = emergency;
            }
        }
        Ok(())
    }

    /// Highest id held by any entity, 0 when empty.
    pub fn highest_id(&self) -> u64 {
        self.inventory
            .iter()
            .map(|i| i.id.0)
            .chain(self.household.iter().map(|m| m.id.0))
            .chain(self.groups.iter().map(|g| g.id.0))
            .chain(self.scenarios.iter().map(|s| s.id.0))
            .max()
            .unwrap_or(0)
    }

    /// Next unused id; ids are unique across every entity kind.
    fn allocate_id(&mut self) -> Result<u64, StoreError> {
        let floor = self
            .highest_id()
            .checked_add(1)
            .ok_or(StoreError::IdSpaceExhausted)?;
        let id = self.next_id.max(floor);
        self.next_id = id.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?;
        Ok(id)
    }

    fn check_group(&self, id: GroupId) -> Result<(), StoreError> {
        self.group(id).map(|_| ()).ok_or(StoreError::UnknownGroup(id))
    }

    fn check_members(&self, ids: &[MemberId]) -> Result<(), StoreError> {
        match ids.iter().find(|id| self.member(**id).is_none()) {
            Some(missing) => Err(StoreError::UnknownMember(*missing)),
            None => Ok(()),
        }
    }

    /// Move a member between groups, keeping both sides consistent.
    fn set_member_group(
        &mut self,
        id: MemberId,
        group: Option<GroupId>,
    ) -> Result<(), StoreError> {
        let member = self
            .household
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::UnknownMember(id))?;
        member.group_id = group;

        for g in &mut self.groups {
            if Some(g.id) == group {
                if !g.contains(id) {
                    g.member_ids.push(id);
                }
            } else {
                g.member_ids.retain(|m| *m != id);
                if g.leader_id == Some(id) {
                    g.leader_id = None;
                }
            }
        }
        Ok(())
    }
}

fn check_reduction(reduction: f64) -> Result<(), StoreError> {
    if (0.0..=100.0).contains(&reduction) {
        Ok(())
    } else {
        Err(StoreError::InvalidReduction(reduction))
    }
}
