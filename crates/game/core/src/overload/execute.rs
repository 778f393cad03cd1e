//! Drains the overload queue and applies each action.
//!
//! Draining always runs to completion: failed entries are recorded and
//! skipped, already-applied entries are never rolled back, and the queue is
//! empty afterwards regardless of outcome.
//!
//! Energy is charged for executed entries only:
//! `Σ energy_cost(executed) + Σ_{i < executed} i * base_overload_cost`.
//! The preview charges every queued entry, so the two agree exactly when
//! every entry succeeds. [`DrainReport`] carries both figures.

use crate::action::{ActionDef, ActionKind, ItemEffect};
use crate::env::{Impact, ImpactError, ImpactOutcome, TargetRegistry};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActionId, Gauge, PlayerState, TargetHandle};

use super::queue::{OverloadQueue, QueueEntry};

/// Why a single queued entry did not execute.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryFailure {
    #[error("target {0} no longer exists")]
    StaleTarget(TargetHandle),

    #[error("clip is empty")]
    OutOfAmmo,

    #[error("no stock left for this item")]
    OutOfStock,

    #[error("imbue slot {slot} is unavailable")]
    SlotUnavailable { slot: usize },

    #[error("target {0} rejected the effect")]
    Rejected(TargetHandle),
}

impl GameError for EntryFailure {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            EntryFailure::StaleTarget(_) => "STALE_TARGET",
            EntryFailure::OutOfAmmo => "OUT_OF_AMMO",
            EntryFailure::OutOfStock => "OUT_OF_STOCK",
            EntryFailure::SlotUnavailable { .. } => "SLOT_UNAVAILABLE",
            EntryFailure::Rejected(_) => "REJECTED",
        }
    }
}

impl From<ImpactError> for EntryFailure {
    fn from(error: ImpactError) -> Self {
        match error {
            ImpactError::Stale(handle) => EntryFailure::StaleTarget(handle),
            ImpactError::Immune(handle) => EntryFailure::Rejected(handle),
        }
    }
}

/// What an executed entry did.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Applied {
    /// Menu actions have no target-side effect.
    Nothing,
    Impact(ImpactOutcome),
    Imbued { slot: usize },
    Restored { gauge: Gauge, amount: f32 },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryReport {
    pub order: u32,
    pub action: ActionId,
    pub target: TargetHandle,
    pub outcome: Result<Applied, EntryFailure>,
}

impl EntryReport {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Summary of one drain.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrainReport {
    pub entries: Vec<EntryReport>,
    pub executed: usize,
    pub failed: usize,
    /// Energy actually removed from the pool (after clamping).
    pub energy_spent: f32,
    /// Action points actually removed from the pool (after clamping).
    pub action_spent: f32,
    /// Net energy the preview showed right before the drain.
    pub previewed_energy: i32,
}

impl DrainReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Applies queued actions in FIFO order.
pub struct ExecutionEngine<'a, R: TargetRegistry + ?Sized> {
    player: &'a mut PlayerState,
    registry: &'a mut R,
}

impl<'a, R: TargetRegistry + ?Sized> ExecutionEngine<'a, R> {
    pub fn new(player: &'a mut PlayerState, registry: &'a mut R) -> Self {
        Self { player, registry }
    }

    /// Executes and clears the queue.
    ///
    /// An empty queue is a no-op that leaves the player untouched.
    pub fn drain(&mut self, queue: &mut OverloadQueue) -> DrainReport {
        let previewed_energy = queue.energy_cost();
        let entries = queue.take();
        if entries.is_empty() {
            return DrainReport::default();
        }

        let mut report = DrainReport {
            previewed_energy,
            ..DrainReport::default()
        };
        let mut fired = 0usize;
        let mut energy_cost = 0u64;
        let mut action_cost = 0u64;

        for entry in entries.iter() {
            let outcome = self.execute_entry(entry, &mut fired);
            if outcome.is_ok() {
                report.executed += 1;
                energy_cost += u64::from(entry.action.energy_cost);
                action_cost += u64::from(entry.action.action_cost);
            } else {
                report.failed += 1;
            }
            report.entries.push(EntryReport {
                order: entry.order,
                action: entry.action.id,
                target: entry.target,
                outcome,
            });
        }

        let surcharge = queue.surcharge_for(report.executed);
        let energy_total = (energy_cost + u64::from(surcharge)) as f32;
        report.energy_spent = -self.player.resources.add(Gauge::Energy, -energy_total);
        report.action_spent = -self
            .player
            .resources
            .add(Gauge::Action, -(action_cost as f32));

        report
    }

    fn execute_entry(
        &mut self,
        entry: &QueueEntry,
        fired: &mut usize,
    ) -> Result<Applied, EntryFailure> {
        if !self.registry.is_alive(entry.target) {
            return Err(EntryFailure::StaleTarget(entry.target));
        }

        let action: &ActionDef = &entry.action;
        match action.kind {
            ActionKind::Menu => Ok(Applied::Nothing),
            ActionKind::Attack { damage } => {
                let round = self.player.clip.fire().ok_or(EntryFailure::OutOfAmmo)?;
                *fired += 1;
                let outcome = self.registry.apply(
                    entry.target,
                    Impact::Damage {
                        amount: damage,
                        element: round.imbue,
                    },
                )?;
                Ok(Applied::Impact(outcome))
            }
            ActionKind::Imbue { element } => {
                // Slots were claimed against the clip as it stood before the
                // drain; rounds fired since then shift everything forward.
                let claimed = entry
                    .imbue_slot
                    .unwrap_or_else(|| self.player.clip.committed_imbues() + *fired);
                let slot = claimed
                    .checked_sub(*fired)
                    .ok_or(EntryFailure::SlotUnavailable { slot: claimed })?;
                if self.player.clip.imbue(slot, element) {
                    Ok(Applied::Imbued { slot })
                } else {
                    Err(EntryFailure::SlotUnavailable { slot })
                }
            }
            ActionKind::Item { item, effect } => {
                if self.player.inventory.count(item) == 0 {
                    return Err(EntryFailure::OutOfStock);
                }
                // Stock is only spent once the effect has landed.
                let applied = match effect {
                    ItemEffect::Heal(amount) => {
                        let outcome = self
                            .registry
                            .apply(entry.target, Impact::Heal { amount })?;
                        Applied::Impact(outcome)
                    }
                    ItemEffect::RestoreEnergy(amount) => self.restore(Gauge::Energy, amount),
                    ItemEffect::RestoreAction(amount) => self.restore(Gauge::Action, amount),
                };
                self.player.inventory.consume(item);
                Ok(applied)
            }
        }
    }

    fn restore(&mut self, gauge: Gauge, amount: u32) -> Applied {
        let amount = self.player.resources.add(gauge, amount as f32);
        Applied::Restored { gauge, amount }
    }
}
