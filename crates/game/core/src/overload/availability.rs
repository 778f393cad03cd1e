//! Availability predicates for adding an action to the overload queue.
//!
//! Each resource has its own exhaustion rule, so each category gets its own
//! predicate:
//! - energy is continuous and compared strictly (`required < available`)
//! - ammo and items are discrete counts
//! - imbuement is a positional slot assignment within the clip

use crate::action::{ActionDef, ActionKind, TargetKind};
use crate::env::TargetRegistry;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActionId, Gauge, ItemId, PlayerState, TargetHandle};

use super::OverloadQueue;
use super::queue::saturate_i32;

/// Reason a candidate action cannot join the queue.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unavailable {
    #[error("overload queue is full ({max} actions)")]
    QueueFull { max: usize },

    #[error("not enough energy: need more than {required}, have {available}")]
    InsufficientEnergy { required: i32, available: f32 },

    #[error("out of ammo: {queued} shots queued, {loaded} rounds loaded")]
    OutOfAmmo { queued: usize, loaded: usize },

    #[error("no free imbue slot (next slot {slot})")]
    NoImbueSlot { slot: usize },

    #[error("{item} is out of stock")]
    OutOfStock { item: ItemId },

    #[error("target {0} is gone")]
    StaleTarget(TargetHandle),

    #[error("action cannot target {kind}")]
    InvalidTarget { kind: TargetKind },

    #[error("target at {distance} is beyond range {range}")]
    OutOfRange { distance: f32, range: f32 },

    #[error("{0} is single-use and already queued")]
    AlreadyQueued(ActionId),
}

impl GameError for Unavailable {
    fn severity(&self) -> ErrorSeverity {
        use Unavailable::*;
        match self {
            InsufficientEnergy { .. } | OutOfAmmo { .. } | StaleTarget(_) => {
                ErrorSeverity::Recoverable
            }
            QueueFull { .. }
            | NoImbueSlot { .. }
            | OutOfStock { .. }
            | InvalidTarget { .. }
            | OutOfRange { .. }
            | AlreadyQueued(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use Unavailable::*;
        match self {
            QueueFull { .. } => "QUEUE_FULL",
            InsufficientEnergy { .. } => "INSUFFICIENT_ENERGY",
            OutOfAmmo { .. } => "OUT_OF_AMMO",
            NoImbueSlot { .. } => "NO_IMBUE_SLOT",
            OutOfStock { .. } => "OUT_OF_STOCK",
            StaleTarget(_) => "STALE_TARGET",
            InvalidTarget { .. } => "INVALID_TARGET",
            OutOfRange { .. } => "OUT_OF_RANGE",
            AlreadyQueued(_) => "ALREADY_QUEUED",
        }
    }
}

/// Pure checks over the current queue and player state.
#[derive(Clone, Copy, Debug)]
pub struct AvailabilityChecker<'a> {
    queue: &'a OverloadQueue,
    player: &'a PlayerState,
}

impl<'a> AvailabilityChecker<'a> {
    pub fn new(queue: &'a OverloadQueue, player: &'a PlayerState) -> Self {
        Self { queue, player }
    }

    /// Energy the queue would cost with `candidate` appended, saturated into `i32`.
    pub fn energy_required(&self, candidate: &ActionDef) -> i32 {
        saturate_i32(self.net_energy_required(candidate))
    }

    fn net_energy_required(&self, candidate: &ActionDef) -> i64 {
        self.queue.net_energy()
            + i64::from(candidate.energy_cost)
            + i64::from(self.queue.next_surcharge())
    }

    /// Strict comparison: landing exactly on the current energy is rejected.
    pub fn can_afford_energy(&self, candidate: &ActionDef) -> bool {
        let available = f64::from(self.player.resources.get(Gauge::Energy));
        (self.net_energy_required(candidate) as f64) < available
    }

    pub fn can_afford_ammo(&self, candidate: &ActionDef) -> bool {
        match candidate.kind {
            ActionKind::Attack { .. } => {
                self.queue.ammo_cost() < self.player.clip.loaded_rounds()
            }
            _ => true,
        }
    }

    /// Slot an Imbue candidate would claim: the walk starts at the imbuements
    /// already committed and advances once per queued Attack or Imbue.
    fn next_imbue_slot(&self) -> usize {
        let claimed = self
            .queue
            .iter()
            .filter(|entry| {
                matches!(
                    entry.action.kind,
                    ActionKind::Attack { .. } | ActionKind::Imbue { .. }
                )
            })
            .count();
        self.player.clip.committed_imbues() + claimed
    }

    /// The clip slot `candidate` would imbue, or `None` when there is no free
    /// slot (or the candidate is not an imbue).
    pub fn imbue_slot(&self, candidate: &ActionDef) -> Option<usize> {
        match candidate.kind {
            ActionKind::Imbue { .. } => {
                let slot = self.next_imbue_slot();
                match self.player.clip.round(slot) {
                    Some(round) if !round.is_imbued() => Some(slot),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    pub fn can_imbue(&self, candidate: &ActionDef) -> bool {
        match candidate.kind {
            ActionKind::Imbue { .. } => self.imbue_slot(candidate).is_some(),
            _ => true,
        }
    }

    pub fn can_use_item(&self, candidate: &ActionDef) -> bool {
        match candidate.kind {
            ActionKind::Item { item, .. } => {
                let owned = self.player.inventory.count(item) as i64;
                let queued = self.queue.queued_item_count(item) as i64;
                owned - queued > 0
            }
            _ => true,
        }
    }

    /// Runs every check that applies to `candidate` aimed at `target`.
    pub fn check<R>(
        &self,
        candidate: &ActionDef,
        target: TargetHandle,
        registry: &R,
    ) -> Result<(), Unavailable>
    where
        R: TargetRegistry + ?Sized,
    {
        if self.queue.is_full() {
            return Err(Unavailable::QueueFull {
                max: self.queue.max_overload(),
            });
        }

        self.check_target(candidate, target, registry)?;

        if candidate.single_use && self.queue.contains_action(candidate.id) {
            return Err(Unavailable::AlreadyQueued(candidate.id));
        }

        if !self.can_afford_energy(candidate) {
            return Err(Unavailable::InsufficientEnergy {
                required: self.energy_required(candidate),
                available: self.player.resources.get(Gauge::Energy),
            });
        }

        match candidate.kind {
            ActionKind::Menu => Ok(()),
            ActionKind::Attack { .. } => {
                if self.can_afford_ammo(candidate) {
                    Ok(())
                } else {
                    Err(Unavailable::OutOfAmmo {
                        queued: self.queue.ammo_cost(),
                        loaded: self.player.clip.loaded_rounds(),
                    })
                }
            }
            ActionKind::Imbue { .. } => {
                if self.can_imbue(candidate) {
                    Ok(())
                } else {
                    Err(Unavailable::NoImbueSlot {
                        slot: self.next_imbue_slot(),
                    })
                }
            }
            ActionKind::Item { item, .. } => {
                if self.can_use_item(candidate) {
                    Ok(())
                } else {
                    Err(Unavailable::OutOfStock { item })
                }
            }
        }
    }

    fn check_target<R>(
        &self,
        candidate: &ActionDef,
        target: TargetHandle,
        registry: &R,
    ) -> Result<(), Unavailable>
    where
        R: TargetRegistry + ?Sized,
    {
        let info = registry
            .resolve(target)
            .ok_or(Unavailable::StaleTarget(target))?;

        if !candidate.can_target(info.kind) {
            return Err(Unavailable::InvalidTarget { kind: info.kind });
        }

        if let (Some(range), Some(distance)) = (candidate.range, info.distance)
            && distance > range
        {
            return Err(Unavailable::OutOfRange { distance, range });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::action::{Element, ItemEffect, TargetMask};
    use crate::config::OverloadConfig;
    use crate::env::{UnitArena, UnitSpec};
    use crate::overload::QueueEntry;
    use crate::state::{Clip, GaugeMeter, Inventory, ResourcePool};

    const POTION: ItemId = ItemId(7);

    fn player(energy: f32, clip: Clip) -> PlayerState {
        PlayerState::new(
            ResourcePool::new(GaugeMeter::full(100.0), GaugeMeter::new(energy, 100.0)),
            clip,
            Inventory::new().with_item(POTION, 1),
        )
    }

    fn shot() -> Arc<ActionDef> {
        Arc::new(
            ActionDef::new(ActionId(1), "Shot", ActionKind::Attack { damage: 5 }).with_costs(0, 2),
        )
    }

    fn imbue() -> Arc<ActionDef> {
        Arc::new(
            ActionDef::new(
                ActionId(2),
                "Ignite",
                ActionKind::Imbue {
                    element: Element::Fire,
                },
            )
            .with_targets(TargetMask::PLAYER),
        )
    }

    fn potion() -> Arc<ActionDef> {
        Arc::new(
            ActionDef::new(
                ActionId(3),
                "Potion",
                ActionKind::Item {
                    item: POTION,
                    effect: ItemEffect::Heal(20),
                },
            )
            .with_targets(TargetMask::PLAYER),
        )
    }

    fn setup() -> (UnitArena, TargetHandle) {
        let mut arena = UnitArena::new(UnitSpec::new("Hunter", TargetKind::Player, 100));
        let imp = arena.spawn(UnitSpec::new("Imp", TargetKind::Enemy, 20).at_distance(8.0));
        (arena, imp)
    }

    fn queue() -> OverloadQueue {
        OverloadQueue::new(&OverloadConfig::new())
    }

    #[test]
    fn energy_check_is_strict() {
        let (_, imp) = setup();
        let mut queue = queue();
        queue.add(QueueEntry::new(shot(), imp, 0)).unwrap();
        queue.add(QueueEntry::new(shot(), imp, 1)).unwrap();

        // 9 queued + 2 + 10 surcharge
        let at_limit = player(21.0, Clip::loaded(6));
        assert!(!AvailabilityChecker::new(&queue, &at_limit).can_afford_energy(&shot()));

        let above = player(22.0, Clip::loaded(6));
        assert!(AvailabilityChecker::new(&queue, &above).can_afford_energy(&shot()));
    }

    #[test]
    fn oversized_surcharge_never_reads_as_affordable() {
        let (_, imp) = setup();
        let config = OverloadConfig::new().with_base_overload_cost(3_000_000_000);
        let mut queue = OverloadQueue::new(&config);
        queue.add(QueueEntry::new(shot(), imp, 0)).unwrap();
        let state = player(10.0, Clip::loaded(6));

        let checker = AvailabilityChecker::new(&queue, &state);
        assert_eq!(queue.next_surcharge(), 3_000_000_000);
        assert_eq!(checker.energy_required(&shot()), i32::MAX);
        assert!(!checker.can_afford_energy(&shot()));
    }

    #[test]
    fn ammo_limited_by_loaded_rounds() {
        let (arena, imp) = setup();
        let mut queue = queue();
        let state = player(100.0, Clip::loaded(1));
        queue.add(QueueEntry::new(shot(), imp, 0)).unwrap();

        let checker = AvailabilityChecker::new(&queue, &state);
        assert!(!checker.can_afford_ammo(&shot()));
        assert!(checker.can_afford_ammo(&potion()));
        assert_eq!(
            checker.check(&shot(), imp, &arena),
            Err(Unavailable::OutOfAmmo {
                queued: 1,
                loaded: 1
            })
        );
    }

    #[test]
    fn imbue_walk_skips_rounds_claimed_by_attacks() {
        let (_, imp) = setup();
        let mut clip = Clip::loaded(3);
        clip.imbue(0, Element::Frost);
        let state = player(100.0, clip);

        let mut queue = queue();
        let empty = AvailabilityChecker::new(&queue, &state);
        assert_eq!(empty.imbue_slot(&imbue()), Some(1));

        queue.add(QueueEntry::new(shot(), imp, 0)).unwrap();
        let after_shot = AvailabilityChecker::new(&queue, &state);
        assert_eq!(after_shot.imbue_slot(&imbue()), Some(2));

        queue
            .add(QueueEntry::new(imbue(), TargetHandle::PLAYER, 1).with_imbue_slot(2))
            .unwrap();
        let exhausted = AvailabilityChecker::new(&queue, &state);
        assert_eq!(exhausted.imbue_slot(&imbue()), None);
        assert!(!exhausted.can_imbue(&imbue()));
    }

    #[test]
    fn imbue_rejects_already_marked_slot() {
        let mut clip = Clip::loaded(3);
        clip.imbue(1, Element::Shock);
        let state = player(100.0, clip);
        let queue = queue();

        // One committed imbue puts the cursor on slot 1, which is already marked.
        let checker = AvailabilityChecker::new(&queue, &state);
        assert!(!checker.can_imbue(&imbue()));
    }

    #[test]
    fn item_stock_accounts_for_queued_copies() {
        let (arena, _) = setup();
        let mut queue = queue();
        let state = player(100.0, Clip::loaded(6));

        assert!(AvailabilityChecker::new(&queue, &state).can_use_item(&potion()));
        queue
            .add(QueueEntry::new(potion(), TargetHandle::PLAYER, 0))
            .unwrap();

        let checker = AvailabilityChecker::new(&queue, &state);
        assert!(!checker.can_use_item(&potion()));
        assert_eq!(
            checker.check(&potion(), TargetHandle::PLAYER, &arena),
            Err(Unavailable::OutOfStock { item: POTION })
        );
    }

    #[test]
    fn target_kind_and_range_are_enforced() {
        let (arena, imp) = setup();
        let queue = queue();
        let state = player(100.0, Clip::loaded(6));
        let checker = AvailabilityChecker::new(&queue, &state);

        assert_eq!(
            checker.check(&potion(), imp, &arena),
            Err(Unavailable::InvalidTarget {
                kind: TargetKind::Enemy
            })
        );

        let short =
            ActionDef::new(ActionId(9), "Jab", ActionKind::Attack { damage: 1 }).with_range(2.0);
        assert_eq!(
            checker.check(&short, imp, &arena),
            Err(Unavailable::OutOfRange {
                distance: 8.0,
                range: 2.0
            })
        );

        let gone = TargetHandle::new(42, 0);
        assert_eq!(
            checker.check(&shot(), gone, &arena),
            Err(Unavailable::StaleTarget(gone))
        );
    }

    #[test]
    fn single_use_actions_queue_once() {
        let (arena, imp) = setup();
        let mut queue = queue();
        let state = player(100.0, Clip::loaded(6));
        let finisher = Arc::new(
            ActionDef::new(ActionId(5), "Finisher", ActionKind::Attack { damage: 40 }).single_use(),
        );

        assert!(AvailabilityChecker::new(&queue, &state).check(&finisher, imp, &arena).is_ok());
        queue.add(QueueEntry::new(finisher.clone(), imp, 0)).unwrap();
        assert_eq!(
            AvailabilityChecker::new(&queue, &state).check(&finisher, imp, &arena),
            Err(Unavailable::AlreadyQueued(ActionId(5)))
        );
    }
}
