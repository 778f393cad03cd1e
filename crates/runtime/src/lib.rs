//! Runtime orchestration for overload encounters.
//!
//! This crate owns all mutable encounter state in a single worker task and
//! exposes it through a cloneable [`RuntimeHandle`]. Consumers embed
//! [`Runtime`] to begin encounters, queue and commit actions, and subscribe to
//! events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle, UnitView};
pub use events::{CombatEvent, Event, EventBus, QueueEvent, ResourceEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
