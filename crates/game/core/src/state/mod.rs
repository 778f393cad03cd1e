//! Player-side state consumed by the overload core.
//!
//! Only values that must survive between encounters live here: the resource
//! gauges, the clip, and consumable stock. Queue contents are transient and
//! belong to [`crate::overload::Encounter`].

mod clip;
mod common;
mod inventory;
mod player;
mod resources;

pub use clip::{Clip, Round};
pub use common::{ActionId, ItemId, TargetHandle};
pub use inventory::Inventory;
pub use player::PlayerState;
pub use resources::{Gauge, GaugeMeter, GaugeRegen, RegenDelta, Regeneration, ResourcePool};
