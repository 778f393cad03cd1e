//! Target resolution capability consumed by the overload core.

use crate::action::{Element, TargetKind};
use crate::error::{ErrorSeverity, GameError};
use crate::state::TargetHandle;

/// Snapshot of a live unit, as seen by availability checks and execution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetInfo {
    pub kind: TargetKind,
    pub health: u32,
    pub max_health: u32,
    pub owner: Option<TargetHandle>,
    /// Distance from the player, when the host tracks positions.
    pub distance: Option<f32>,
}

/// Effect delivered to a target by an executed action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Impact {
    Damage {
        amount: u32,
        element: Option<Element>,
    },
    Heal {
        amount: u32,
    },
}

/// Result of a successfully applied impact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImpactOutcome {
    Damaged {
        dealt: u32,
        remaining: u32,
        killed: bool,
    },
    Healed {
        restored: u32,
        health: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImpactError {
    #[error("target {0} no longer exists")]
    Stale(TargetHandle),

    #[error("target {0} is immune to this effect")]
    Immune(TargetHandle),
}

impl GameError for ImpactError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ImpactError::Stale(_) => ErrorSeverity::Recoverable,
            ImpactError::Immune(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ImpactError::Stale(_) => "IMPACT_STALE",
            ImpactError::Immune(_) => "IMPACT_IMMUNE",
        }
    }
}

/// Lookup-and-apply access to the units an action can target.
///
/// Handles may dangle: a unit destroyed between enqueue and execution must
/// make [`resolve`](Self::resolve) return `None`.
pub trait TargetRegistry {
    /// Returns the unit behind `handle` if it is still alive.
    fn resolve(&self, handle: TargetHandle) -> Option<TargetInfo>;

    /// Applies an impact to a live unit.
    fn apply(&mut self, handle: TargetHandle, impact: Impact)
    -> Result<ImpactOutcome, ImpactError>;

    fn is_alive(&self, handle: TargetHandle) -> bool {
        self.resolve(handle).is_some()
    }
}
