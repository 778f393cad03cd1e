//! Generation-checked unit storage.
//!
//! Slots are reused after despawn; each reuse bumps the slot generation so
//! handles minted for the previous occupant stop resolving.

use super::registry::{Impact, ImpactError, ImpactOutcome, TargetInfo, TargetRegistry};
use crate::action::{Element, TargetKind};
use crate::state::TargetHandle;

/// Spawn parameters for a unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    pub name: String,
    pub kind: TargetKind,
    pub max_health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance: Option<f32>,
    /// Damage from this element is doubled.
    #[cfg_attr(feature = "serde", serde(default))]
    pub weakness: Option<Element>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub owner: Option<TargetHandle>,
}

impl UnitSpec {
    pub fn new(name: impl Into<String>, kind: TargetKind, max_health: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            max_health,
            distance: None,
            weakness: None,
            owner: None,
        }
    }

    pub fn at_distance(mut self, distance: f32) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn weak_to(mut self, element: Element) -> Self {
        self.weakness = Some(element);
        self
    }
}

/// A spawned unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub spec: UnitSpec,
    pub health: u32,
}

impl Unit {
    fn new(spec: UnitSpec) -> Self {
        let health = spec.max_health;
        Self { spec, health }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    fn info(&self) -> TargetInfo {
        TargetInfo {
            kind: self.spec.kind,
            health: self.health,
            max_health: self.spec.max_health,
            owner: self.spec.owner,
            distance: self.spec.distance,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    unit: Option<Unit>,
}

/// In-memory [`TargetRegistry`] backed by a slot vector.
///
/// Slot 0 always holds the player, so [`TargetHandle::PLAYER`] resolves for
/// as long as the player is alive.
#[derive(Clone, Debug)]
pub struct UnitArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl UnitArena {
    pub fn new(player: UnitSpec) -> Self {
        Self {
            slots: vec![Slot {
                generation: TargetHandle::PLAYER.generation,
                unit: Some(Unit::new(player)),
            }],
            free: Vec::new(),
        }
    }

    pub fn spawn(&mut self, spec: UnitSpec) -> TargetHandle {
        let unit = Some(Unit::new(spec));
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.unit = unit;
            return TargetHandle::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            unit,
        });
        TargetHandle::new(index, 0)
    }

    /// Removes a unit. The player slot cannot be despawned.
    pub fn despawn(&mut self, handle: TargetHandle) -> Option<Unit> {
        if handle.is_player() {
            return None;
        }
        let slot = self.slot_mut(handle)?;
        let unit = slot.unit.take()?;
        self.free.push(handle.index);
        Some(unit)
    }

    pub fn get(&self, handle: TargetHandle) -> Option<&Unit> {
        self.slot(handle)?.unit.as_ref()
    }

    /// Units still in the arena, dead ones included, with their current handles.
    pub fn iter(&self) -> impl Iterator<Item = (TargetHandle, &Unit)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.unit
                .as_ref()
                .map(|unit| (TargetHandle::new(index as u32, slot.generation), unit))
        })
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, handle: TargetHandle) -> Option<&Slot> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }

    fn slot_mut(&mut self, handle: TargetHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }

    fn live_unit_mut(&mut self, handle: TargetHandle) -> Option<&mut Unit> {
        self.slot_mut(handle)?
            .unit
            .as_mut()
            .filter(|unit| unit.is_alive())
    }
}

impl TargetRegistry for UnitArena {
    fn resolve(&self, handle: TargetHandle) -> Option<TargetInfo> {
        self.get(handle)
            .filter(|unit| unit.is_alive())
            .map(Unit::info)
    }

    fn apply(
        &mut self,
        handle: TargetHandle,
        impact: Impact,
    ) -> Result<ImpactOutcome, ImpactError> {
        let unit = self
            .live_unit_mut(handle)
            .ok_or(ImpactError::Stale(handle))?;

        match impact {
            Impact::Damage { amount, element } => {
                let amount = match (element, unit.spec.weakness) {
                    (Some(hit), Some(weak)) if hit == weak => amount.saturating_mul(2),
                    _ => amount,
                };
                let dealt = amount.min(unit.health);
                unit.health -= dealt;
                Ok(ImpactOutcome::Damaged {
                    dealt,
                    remaining: unit.health,
                    killed: unit.health == 0,
                })
            }
            Impact::Heal { amount } => {
                if unit.spec.kind == TargetKind::Environment {
                    return Err(ImpactError::Immune(handle));
                }
                let restored = amount.min(unit.spec.max_health - unit.health);
                unit.health += restored;
                Ok(ImpactOutcome::Healed {
                    restored,
                    health: unit.health,
                })
            }
        }
    }
}
