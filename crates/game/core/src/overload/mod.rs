//! The overload mechanic: queue several actions, preview their combined cost,
//! then execute them together at an escalating energy surcharge.
//!
//! - [`queue`] holds pending entries and computes previews
//! - [`availability`] decides whether a candidate may join the queue
//! - [`execute`] drains the queue into the player and target registry
//! - [`session`] ties them into the per-encounter lifecycle
pub mod availability;
pub mod execute;
pub mod queue;
pub mod session;

pub use availability::{AvailabilityChecker, Unavailable};
pub use execute::{Applied, DrainReport, EntryFailure, EntryReport, ExecutionEngine};
pub use queue::{OverloadQueue, QueueEntry, QueueError, QueuePreview};
pub use session::{Encounter, QueuePhase};
