//! Action definitions - the immutable content the overload core consumes.
//!
//! Definitions are loaded from RON data files by `overload-content` and shared
//! by reference ([`std::sync::Arc`]) between the catalog and queue entries.

use bitflags::bitflags;

use crate::state::{ActionId, ItemId};

bitflags! {
    /// Kinds of unit an action may be aimed at.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct TargetMask: u8 {
        const PLAYER      = 1 << 0;
        const ENEMY       = 1 << 1;
        const ENVIRONMENT = 1 << 2;
    }
}

/// Kind of a concrete unit, as reported by the target registry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    Player,
    Enemy,
    Environment,
}

impl TargetKind {
    pub const fn mask(self) -> TargetMask {
        match self {
            TargetKind::Player => TargetMask::PLAYER,
            TargetKind::Enemy => TargetMask::ENEMY,
            TargetKind::Environment => TargetMask::ENVIRONMENT,
        }
    }
}

/// Elemental effect carried by an imbued round.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Fire,
    Frost,
    Shock,
    Void,
}

/// What a consumable does when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Restores health on the target.
    Heal(u32),
    /// Refunds energy to the user.
    RestoreEnergy(u32),
    /// Refunds action points to the user.
    RestoreAction(u32),
}

/// Category-specific payload of an action.
///
/// Each variant carries only what its cost model needs, so availability
/// checks dispatch with `match` instead of inspecting the action at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Non-combat menu action; costs resources but affects no target.
    Menu,
    /// Fires one round from the clip.
    Attack { damage: u32 },
    /// Marks a round in the clip with an element.
    Imbue { element: Element },
    /// Consumes one item from the inventory.
    Item { item: ItemId, effect: ItemEffect },
}

/// Flat category tag, for display and grouping.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionCategory {
    Menu,
    Attack,
    Imbue,
    Item,
}

impl ActionKind {
    pub const fn category(&self) -> ActionCategory {
        match self {
            ActionKind::Menu => ActionCategory::Menu,
            ActionKind::Attack { .. } => ActionCategory::Attack,
            ActionKind::Imbue { .. } => ActionCategory::Imbue,
            ActionKind::Item { .. } => ActionCategory::Item,
        }
    }
}

/// Complete definition of an action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDef {
    pub id: ActionId,
    pub name: String,

    /// Action points paid on execution.
    #[cfg_attr(feature = "serde", serde(default))]
    pub action_cost: u32,

    /// Energy paid on execution, before the overload surcharge.
    #[cfg_attr(feature = "serde", serde(default))]
    pub energy_cost: u32,

    pub targets: TargetMask,

    /// Maximum effective distance; `None` means unlimited.
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: Option<f32>,

    /// At most one copy of a single-use action may sit in the queue.
    #[cfg_attr(feature = "serde", serde(default))]
    pub single_use: bool,

    pub kind: ActionKind,
}

impl ActionDef {
    pub fn new(id: ActionId, name: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            id,
            name: name.into(),
            action_cost: 0,
            energy_cost: 0,
            targets: TargetMask::ENEMY,
            range: None,
            single_use: false,
            kind,
        }
    }

    pub fn with_costs(mut self, action_cost: u32, energy_cost: u32) -> Self {
        self.action_cost = action_cost;
        self.energy_cost = energy_cost;
        self
    }

    pub fn with_targets(mut self, targets: TargetMask) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.range = Some(range);
        self
    }

    pub fn single_use(mut self) -> Self {
        self.single_use = true;
        self
    }

    pub fn category(&self) -> ActionCategory {
        self.kind.category()
    }

    /// Energy refunded by this action when it is a restorative item.
    pub fn energy_restored(&self) -> u32 {
        match self.kind {
            ActionKind::Item {
                effect: ItemEffect::RestoreEnergy(amount),
                ..
            } => amount,
            _ => 0,
        }
    }

    /// Health restored by this action when it is a healing item.
    pub fn heal_amount(&self) -> u32 {
        match self.kind {
            ActionKind::Item {
                effect: ItemEffect::Heal(amount),
                ..
            } => amount,
            _ => 0,
        }
    }

    pub fn can_target(&self, kind: TargetKind) -> bool {
        self.targets.contains(kind.mask())
    }
}
