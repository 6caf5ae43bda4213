//! Errors for the fallible edges: store actions, settings import, exports.
//!
//! The engine itself never fails; degenerate inputs produce zeros plus a
//! warning instead.

use crate::ids::{GroupId, ItemId, MemberId, ScenarioId};
use crate::settings::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unknown inventory item {0}")]
    UnknownItem(ItemId),

    #[error("unknown household member {0}")]
    UnknownMember(MemberId),

    #[error("unknown group {0}")]
    UnknownGroup(GroupId),

    #[error("unknown rationing scenario {0}")]
    UnknownScenario(ScenarioId),

    #[error("reduction {0}% outside 0..=100")]
    InvalidReduction(f64),

    #[error("{leader} cannot lead {group}: not a member")]
    LeaderNotInGroup { group: GroupId, leader: MemberId },

    #[error("no unused id left")]
    IdSpaceExhausted,

    #[error("invalid settings: {}", join_settings_errors(.0))]
    InvalidSettings(Vec<SettingsError>),

    #[error("settings import failed: {0}")]
    Import(#[from] ImportError),
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("settings JSON malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("imported settings rejected: {}", join_settings_errors(.0))]
    Invalid(Vec<SettingsError>),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_settings_errors(errors: &[SettingsError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_id() {
        assert_eq!(
            StoreError::UnknownMember(MemberId(9)).to_string(),
            "unknown household member member-9"
        );
        assert_eq!(
            StoreError::LeaderNotInGroup {
                group: GroupId(2),
                leader: MemberId(5)
            }
            .to_string(),
            "member-5 cannot lead group-2: not a member"
        );
    }

    #[test]
    fn test_settings_errors_joined() {
        let err = ImportError::Invalid(vec![
            SettingsError::GoalDaysOutOfRange(0),
            SettingsError::WaterMarginOutOfRange(0.5),
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("imported settings rejected: preparedness goal 0 days"));
        assert!(msg.contains("; water safety margin 0.5"));
    }
}
