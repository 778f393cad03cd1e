use super::{Clip, Inventory, ResourcePool};

/// Everything the overload core reads from and writes to on the player's side.
///
/// Persisted wholesale by the host save system; the core owns no save format.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub resources: ResourcePool,
    pub clip: Clip,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Inventory,
}

impl PlayerState {
    pub fn new(resources: ResourcePool, clip: Clip, inventory: Inventory) -> Self {
        Self {
            resources,
            clip,
            inventory,
        }
    }
}
