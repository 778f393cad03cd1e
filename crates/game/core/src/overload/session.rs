//! Queue lifecycle for a single combat encounter.
//!
//! ```text
//! Empty --enqueue--> Filling --undo/cancel--> Filling | Empty
//!                    Filling --commit--> Draining --> Empty
//! ```
//!
//! `enqueue` re-runs the availability checks itself, so callers cannot
//! overcommit by skipping them.

use std::sync::Arc;

use crate::action::ActionDef;
use crate::config::OverloadConfig;
use crate::env::TargetRegistry;
use crate::state::{PlayerState, TargetHandle};

use super::availability::{AvailabilityChecker, Unavailable};
use super::execute::{DrainReport, ExecutionEngine};
use super::queue::{OverloadQueue, QueueEntry, QueuePreview};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueuePhase {
    Empty,
    Filling,
    Draining,
}

/// Overload queue plus the bookkeeping of one encounter.
#[derive(Clone, Debug)]
pub struct Encounter {
    queue: OverloadQueue,
    phase: QueuePhase,
    next_order: u32,
    commits: u32,
}

impl Encounter {
    pub fn new(config: &OverloadConfig) -> Self {
        Self {
            queue: OverloadQueue::new(config),
            phase: QueuePhase::Empty,
            next_order: 0,
            commits: 0,
        }
    }

    pub fn phase(&self) -> QueuePhase {
        self.phase
    }

    pub fn queue(&self) -> &OverloadQueue {
        &self.queue
    }

    /// Number of batches committed so far in this encounter.
    pub fn commits(&self) -> u32 {
        self.commits
    }

    pub fn preview(&self) -> QueuePreview {
        self.queue.preview()
    }

    /// Checks `action` against the current queue and player, then appends it.
    pub fn enqueue<R>(
        &mut self,
        action: Arc<ActionDef>,
        target: TargetHandle,
        player: &PlayerState,
        registry: &R,
    ) -> Result<QueuePreview, Unavailable>
    where
        R: TargetRegistry + ?Sized,
    {
        let checker = AvailabilityChecker::new(&self.queue, player);
        checker.check(&action, target, registry)?;
        let imbue_slot = checker.imbue_slot(&action);

        let mut entry = QueueEntry::new(action, target, self.next_order);
        if let Some(slot) = imbue_slot {
            entry = entry.with_imbue_slot(slot);
        }

        self.queue.add(entry).map_err(|_| Unavailable::QueueFull {
            max: self.queue.max_overload(),
        })?;
        self.next_order += 1;
        self.phase = QueuePhase::Filling;
        Ok(self.queue.preview())
    }

    /// Removes the most recently queued action.
    pub fn undo(&mut self) -> Option<QueueEntry> {
        let removed = self.queue.remove_last();
        self.sync_phase();
        removed
    }

    /// Drops every queued action. Never touches the player's resources.
    pub fn cancel(&mut self) {
        self.queue.clear();
        self.sync_phase();
    }

    /// Executes the queued batch and returns to `Empty`.
    pub fn commit<R>(&mut self, player: &mut PlayerState, registry: &mut R) -> DrainReport
    where
        R: TargetRegistry + ?Sized,
    {
        if self.queue.is_empty() {
            return DrainReport::default();
        }

        self.phase = QueuePhase::Draining;
        let report = ExecutionEngine::new(player, registry).drain(&mut self.queue);
        self.commits += 1;
        self.sync_phase();
        report
    }

    fn sync_phase(&mut self) {
        self.phase = if self.queue.is_empty() {
            QueuePhase::Empty
        } else {
            QueuePhase::Filling
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, Element, TargetKind, TargetMask};
    use crate::env::{UnitArena, UnitSpec};
    use crate::state::{ActionId, Clip, Gauge, Inventory, ResourcePool};

    fn fixtures() -> (Encounter, PlayerState, UnitArena, TargetHandle) {
        let mut arena = UnitArena::new(UnitSpec::new("Hunter", TargetKind::Player, 100));
        let imp = arena.spawn(UnitSpec::new("Imp", TargetKind::Enemy, 40));
        let player = PlayerState::new(
            ResourcePool::full(100.0, 100.0),
            Clip::loaded(2),
            Inventory::new(),
        );
        (Encounter::new(&OverloadConfig::new()), player, arena, imp)
    }

    fn shot() -> Arc<ActionDef> {
        Arc::new(
            ActionDef::new(ActionId(1), "Shot", ActionKind::Attack { damage: 5 }).with_costs(0, 2),
        )
    }

    #[test]
    fn phases_follow_queue_contents() {
        let (mut encounter, mut player, mut arena, imp) = fixtures();
        assert_eq!(encounter.phase(), QueuePhase::Empty);

        encounter.enqueue(shot(), imp, &player, &arena).unwrap();
        assert_eq!(encounter.phase(), QueuePhase::Filling);

        encounter.undo();
        assert_eq!(encounter.phase(), QueuePhase::Empty);

        encounter.enqueue(shot(), imp, &player, &arena).unwrap();
        let report = encounter.commit(&mut player, &mut arena);
        assert_eq!(report.executed, 1);
        assert_eq!(encounter.phase(), QueuePhase::Empty);
        assert_eq!(encounter.commits(), 1);
    }

    #[test]
    fn enqueue_revalidates_instead_of_overcommitting() {
        let (mut encounter, player, arena, imp) = fixtures();
        encounter.enqueue(shot(), imp, &player, &arena).unwrap();
        encounter.enqueue(shot(), imp, &player, &arena).unwrap();

        let err = encounter.enqueue(shot(), imp, &player, &arena).unwrap_err();
        assert_eq!(err, Unavailable::OutOfAmmo { queued: 2, loaded: 2 });
        assert_eq!(encounter.queue().len(), 2);
    }

    #[test]
    fn enqueue_records_claimed_imbue_slot() {
        let (mut encounter, player, arena, imp) = fixtures();
        let frost = Arc::new(
            ActionDef::new(ActionId(2), "Chill", ActionKind::Imbue { element: Element::Frost })
                .with_targets(TargetMask::PLAYER),
        );
        encounter.enqueue(shot(), imp, &player, &arena).unwrap();
        encounter
            .enqueue(frost, TargetHandle::PLAYER, &player, &arena)
            .unwrap();

        let last = encounter.queue().last().unwrap();
        assert_eq!(last.imbue_slot, Some(1));
        assert_eq!(last.order, 1);
    }

    #[test]
    fn cancel_leaves_resources_alone() {
        let (mut encounter, player, arena, imp) = fixtures();
        let before = player.clone();
        encounter.enqueue(shot(), imp, &player, &arena).unwrap();
        encounter.cancel();

        assert!(encounter.queue().is_empty());
        assert_eq!(player, before);
        assert_eq!(player.resources.get(Gauge::Energy), 100.0);
    }
}
