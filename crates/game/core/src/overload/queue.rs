//! Bounded FIFO of pending overload actions and its cost previews.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::action::{ActionCategory, ActionDef};
use crate::config::OverloadConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActionId, ItemId, TargetHandle};

/// One queued action.
#[derive(Clone, Debug, PartialEq)]
pub struct QueueEntry {
    pub action: Arc<ActionDef>,
    pub target: TargetHandle,
    /// Enqueue sequence number within the encounter.
    pub order: u32,
    /// Clip slot claimed by an Imbue entry at enqueue time.
    pub imbue_slot: Option<usize>,
}

impl QueueEntry {
    pub fn new(action: Arc<ActionDef>, target: TargetHandle, order: u32) -> Self {
        Self {
            action,
            target,
            order,
            imbue_slot: None,
        }
    }

    pub fn with_imbue_slot(mut self, slot: usize) -> Self {
        self.imbue_slot = Some(slot);
        self
    }

    pub fn action_id(&self) -> ActionId {
        self.action.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("overload queue is full ({max} actions)")]
    Full { max: usize },
}

impl GameError for QueueError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "QUEUE_FULL"
    }
}

/// Aggregate effect of the current queue on the player's resources.
///
/// Pulled after every queue mutation by whatever draws the resource bars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuePreview {
    pub queued: usize,
    /// Net energy: costs plus surcharge minus restorative items. May be negative.
    pub energy_cost: i32,
    pub action_cost: u32,
    pub ammo_cost: usize,
    pub health_delta: u32,
    pub next_surcharge: u32,
}

/// Ordered list of `(action, target)` pairs awaiting simultaneous execution.
///
/// Insertion order is significant for both the surcharge and execution.
#[derive(Clone, Debug, PartialEq)]
pub struct OverloadQueue {
    entries: ArrayVec<QueueEntry, { OverloadConfig::MAX_OVERLOAD }>,
    max_overload: usize,
    base_overload_cost: u32,
}

impl OverloadQueue {
    pub fn new(config: &OverloadConfig) -> Self {
        Self {
            entries: ArrayVec::new(),
            max_overload: config.effective_max_overload(),
            base_overload_cost: config.base_overload_cost,
        }
    }

    pub fn max_overload(&self) -> usize {
        self.max_overload
    }

    pub fn base_overload_cost(&self) -> u32 {
        self.base_overload_cost
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_overload
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&QueueEntry> {
        self.entries.last()
    }

    /// Appends an entry. A full queue is left unchanged.
    ///
    /// This only enforces the length bound; resource checks belong to
    /// [`AvailabilityChecker`](super::AvailabilityChecker).
    pub fn add(&mut self, entry: QueueEntry) -> Result<(), QueueError> {
        if self.is_full() {
            return Err(QueueError::Full {
                max: self.max_overload,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Removes the most recently added entry (undo).
    pub fn remove_last(&mut self) -> Option<QueueEntry> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Moves every entry out, leaving the queue empty.
    pub(crate) fn take(&mut self) -> ArrayVec<QueueEntry, { OverloadConfig::MAX_OVERLOAD }> {
        std::mem::take(&mut self.entries)
    }

    /// Surcharge owed by the first `count` queue positions: `Σ i * base` for `i < count`.
    ///
    /// Saturates at `u32::MAX`.
    pub fn surcharge_for(&self, count: usize) -> u32 {
        let count = count as u64;
        // 0 + 1 + ... + (count - 1)
        let positions = count.saturating_mul(count.saturating_sub(1)) / 2;
        let total = positions.saturating_mul(u64::from(self.base_overload_cost));
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    /// Net energy cost of executing the whole queue, saturated into `i32`.
    pub fn energy_cost(&self) -> i32 {
        saturate_i32(self.net_energy())
    }

    /// Unsaturated net energy: costs plus surcharge minus restored energy.
    pub(crate) fn net_energy(&self) -> i64 {
        let base: i64 = self
            .entries
            .iter()
            .map(|e| i64::from(e.action.energy_cost))
            .sum();
        let restored: i64 = self
            .entries
            .iter()
            .map(|e| i64::from(e.action.energy_restored()))
            .sum();
        base + i64::from(self.surcharge_for(self.entries.len())) - restored
    }

    pub fn action_cost(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |total, e| total.saturating_add(e.action.action_cost))
    }

    /// Rounds the queued attacks will fire.
    pub fn ammo_cost(&self) -> usize {
        self.count_category(ActionCategory::Attack)
    }

    /// Health the queued items will restore on the player.
    pub fn health_delta(&self) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.target.is_player())
            .fold(0u32, |total, e| total.saturating_add(e.action.heal_amount()))
    }

    /// Surcharge for appending one more action right now. Saturates at `u32::MAX`.
    pub fn next_surcharge(&self) -> u32 {
        (self.entries.len() as u32).saturating_mul(self.base_overload_cost)
    }

    pub fn count_category(&self, category: ActionCategory) -> usize {
        self.entries
            .iter()
            .filter(|e| e.action.category() == category)
            .count()
    }

    pub fn queued_item_count(&self, item: ItemId) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.action.kind,
                    crate::action::ActionKind::Item { item: queued, .. } if queued == item
                )
            })
            .count()
    }

    pub fn contains_action(&self, id: ActionId) -> bool {
        self.entries.iter().any(|e| e.action.id == id)
    }

    pub fn preview(&self) -> QueuePreview {
        QueuePreview {
            queued: self.len(),
            energy_cost: self.energy_cost(),
            action_cost: self.action_cost(),
            ammo_cost: self.ammo_cost(),
            health_delta: self.health_delta(),
            next_surcharge: self.next_surcharge(),
        }
    }
}

pub(crate) fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
