//! Content loaders for reading overload data from files.
//!
//! Every loader offers `load(path)` for files on disk and `parse(source, origin)`
//! for text already in memory; [`ContentFactory`] ties them to a directory or
//! to the embedded copies.

pub mod actions;
pub mod config;
pub mod encounter;
pub mod factory;
pub mod player;

pub use actions::ActionLoader;
pub use config::ConfigLoader;
pub use encounter::EncounterLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use player::{PlayerLoader, PlayerSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
