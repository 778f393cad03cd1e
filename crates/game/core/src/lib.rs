//! Deterministic overload rules shared by the runtime and tools.
//!
//! `overload-core` defines the canonical rules for queueing several player
//! actions, previewing their combined resource cost, and executing them as
//! one batch. It exposes pure, synchronous APIs with no I/O; all mutation of
//! long-lived state flows through [`overload::Encounter`] and
//! [`overload::ExecutionEngine`], and the runtime crate is the single writer
//! that calls them.
pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod overload;
pub mod state;

pub use action::{
    ActionCatalog, ActionCategory, ActionDef, ActionKind, CatalogError, Element, ItemEffect,
    TargetKind, TargetMask,
};
pub use config::OverloadConfig;
pub use env::{
    Impact, ImpactError, ImpactOutcome, TargetInfo, TargetRegistry, Unit, UnitArena, UnitSpec,
};
pub use error::{ErrorSeverity, GameError};
pub use overload::{
    Applied, AvailabilityChecker, DrainReport, Encounter, EntryFailure, EntryReport,
    ExecutionEngine, OverloadQueue, QueueEntry, QueueError, QueuePhase, QueuePreview, Unavailable,
};
pub use state::{
    ActionId, Clip, Gauge, GaugeMeter, GaugeRegen, Inventory, ItemId, PlayerState, RegenDelta,
    Regeneration, ResourcePool, Round, TargetHandle,
};
