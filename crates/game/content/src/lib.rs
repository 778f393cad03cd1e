//! Data-driven content definitions and loaders.
//!
//! This crate houses the static content of an overload encounter and provides
//! loaders for its RON/TOML data files:
//! - Action catalog (attacks, imbues, items, menu actions via RON)
//! - Overload configuration (TOML)
//! - Player loadout (RON)
//! - Encounter roster (RON)
//!
//! A copy of every file under `data/` is embedded at compile time, so the
//! runtime can start without a content directory.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionLoader, ConfigLoader, ContentBundle, ContentFactory, EncounterLoader, LoadResult,
    PlayerLoader, PlayerSpec,
};
