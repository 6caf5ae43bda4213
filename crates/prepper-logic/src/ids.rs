//! Typed identifiers for inventory items, members, groups and scenarios.
//!
//! Each id wraps an opaque `u64` so an item id can never be passed where a
//! member id is expected. Ids serialize as bare numbers.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

typed_id!(
    /// Identifies an [`InventoryItem`](crate::inventory::InventoryItem).
    ItemId,
    "item"
);
typed_id!(
    /// Identifies a [`HouseholdMember`](crate::household::HouseholdMember).
    MemberId,
    "member"
);
typed_id!(
    /// Identifies a [`HouseholdGroup`](crate::household::HouseholdGroup).
    GroupId,
    "group"
);
typed_id!(
    /// Identifies a [`RationingScenario`](crate::rationing::RationingScenario).
    ScenarioId,
    "scenario"
);
