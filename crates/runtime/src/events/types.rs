//! Event types for different topics.

use serde::{Deserialize, Serialize};

use overload_core::{ActionId, DrainReport, QueuePreview, RegenDelta, TargetHandle, Unavailable};

/// Changes to the overload queue.
///
/// Every variant that follows a mutation carries the fresh preview, so a
/// subscriber can redraw cost bars without querying the worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum QueueEvent {
    Enqueued {
        action: ActionId,
        target: TargetHandle,
        preview: QueuePreview,
    },
    /// The most recent entry was undone.
    Removed {
        action: ActionId,
        preview: QueuePreview,
    },
    /// The queue was emptied without executing anything.
    Cleared { dropped: usize },
    /// A candidate failed its availability check. The queue is unchanged.
    Rejected {
        action: ActionId,
        target: TargetHandle,
        reason: Unavailable,
    },
}

/// Changes to the player's gauges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResourceEvent {
    /// Passive regeneration applied. Only published when something changed.
    Regenerated {
        delta: RegenDelta,
        action: f32,
        energy: f32,
    },
    /// A drain charged the player.
    Spent {
        action_spent: f32,
        energy_spent: f32,
        action: f32,
        energy: f32,
    },
}

/// Encounter lifecycle and batch execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CombatEvent {
    EncounterStarted { units: Vec<TargetHandle> },
    EncounterEnded { commits: u32 },
    Drained { report: DrainReport },
}
