//! External collaborators the overload core talks to.
//!
//! The core never owns units. It resolves [`TargetHandle`](crate::state::TargetHandle)s
//! through a [`TargetRegistry`] and delivers [`Impact`]s back through it.
//! [`UnitArena`] is the in-memory registry used by the runtime and tests.
mod arena;
mod registry;

pub use arena::{Unit, UnitArena, UnitSpec};
pub use registry::{Impact, ImpactError, ImpactOutcome, TargetInfo, TargetRegistry};
