//! Overload configuration loader.

use std::path::Path;

use overload_core::OverloadConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for overload configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`OverloadConfig::default`].
    pub fn load(path: &Path) -> LoadResult<OverloadConfig> {
        let content = read_file(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn parse(source: &str, origin: &str) -> LoadResult<OverloadConfig> {
        let config: OverloadConfig = toml::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", origin, e))?;

        if config.max_overload == 0 {
            anyhow::bail!("{}: max_overload must be at least 1", origin);
        }
        if config.max_overload > OverloadConfig::MAX_OVERLOAD {
            anyhow::bail!(
                "{}: max_overload {} exceeds the supported maximum of {}",
                origin,
                config.max_overload,
                OverloadConfig::MAX_OVERLOAD
            );
        }
        if config.base_overload_cost > OverloadConfig::MAX_BASE_OVERLOAD_COST {
            anyhow::bail!(
                "{}: base_overload_cost {} exceeds the supported maximum of {}",
                origin,
                config.base_overload_cost,
                OverloadConfig::MAX_BASE_OVERLOAD_COST
            );
        }

        Ok(config)
    }
}
