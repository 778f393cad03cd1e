//! Worker tasks that back the runtime orchestration.
//!
//! The encounter worker is the single writer of all encounter state; the
//! regen ticker feeds it elapsed time so regeneration is serialized with every
//! other mutation.

mod encounter;
mod regen;

pub use encounter::{Command, EncounterWorker, WorldState};
pub use regen::RegenTicker;
