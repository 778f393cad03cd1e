//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving an encounter or streaming events from specific topics.
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};

use overload_core::{
    ActionDef, ActionId, DrainReport, PlayerState, QueuePreview, TargetHandle, Unit, UnitSpec,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// A live unit together with the handle that currently addresses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitView {
    pub handle: TargetHandle,
    pub unit: Unit,
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Spawn the encounter roster, open an empty queue, and enter combat.
    pub async fn begin_encounter(&self) -> Result<Vec<UnitView>> {
        self.request(|reply| Command::BeginEncounter { reply })
            .await?
    }

    /// Drop any pending batch without charging, despawn the roster, and leave
    /// combat. Returns the number of batches committed during the encounter.
    pub async fn end_encounter(&self) -> Result<u32> {
        self.request(|reply| Command::EndEncounter { reply }).await?
    }

    /// Queue `action` against `target`. Returns the updated preview.
    pub async fn enqueue(&self, action: ActionId, target: TargetHandle) -> Result<QueuePreview> {
        self.request(|reply| Command::Enqueue {
            action,
            target,
            reply,
        })
        .await?
    }

    /// Remove the most recently queued action.
    pub async fn undo(&self) -> Result<Option<ActionId>> {
        self.request(|reply| Command::Undo { reply }).await?
    }

    /// Drop every queued action. Returns how many were dropped.
    pub async fn cancel(&self) -> Result<usize> {
        self.request(|reply| Command::Cancel { reply }).await?
    }

    /// Execute the queued batch.
    pub async fn commit(&self) -> Result<DrainReport> {
        self.request(|reply| Command::Commit { reply }).await?
    }

    pub async fn preview(&self) -> Result<QueuePreview> {
        self.request(|reply| Command::Preview { reply }).await?
    }

    /// Top the clip up to capacity. Returns how many rounds were added.
    pub async fn reload(&self) -> Result<usize> {
        self.request(|reply| Command::Reload { reply }).await
    }

    /// Switch between combat and out-of-combat regeneration rates.
    pub async fn set_combat(&self, in_combat: bool) -> Result<()> {
        self.request(|reply| Command::SetCombat { in_combat, reply })
            .await
    }

    pub async fn spawn(&self, spec: UnitSpec) -> Result<TargetHandle> {
        self.request(|reply| Command::Spawn { spec, reply }).await
    }

    /// Returns `false` when the handle was already stale or names the player.
    pub async fn despawn(&self, handle: TargetHandle) -> Result<bool> {
        self.request(|reply| Command::Despawn { handle, reply })
            .await
    }

    /// Snapshot of the player's gauges, clip, and inventory.
    pub async fn player(&self) -> Result<PlayerState> {
        self.request(|reply| Command::QueryPlayer { reply }).await
    }

    /// Live units, including the player at [`TargetHandle::PLAYER`].
    pub async fn units(&self) -> Result<Vec<UnitView>> {
        self.request(|reply| Command::QueryUnits { reply }).await
    }

    /// Every action in the catalog, ordered by id.
    pub async fn actions(&self) -> Result<Vec<Arc<ActionDef>>> {
        self.request(|reply| Command::QueryActions { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Queue` - Enqueue, undo, cancel, and rejection
    /// - `Topic::Resources` - Regeneration and spending
    /// - `Topic::Combat` - Encounter start/end and drains
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }
}
