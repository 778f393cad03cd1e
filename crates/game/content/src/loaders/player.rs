//! Player loadout loader.

use std::path::Path;

use overload_core::{
    Clip, Inventory, OverloadConfig, PlayerState, ResourcePool, TargetKind, UnitSpec,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Starting loadout of the player, as written in `player.ron`.
///
/// Gauges start full and the clip starts loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub max_health: u32,
    /// Maximum of the Action gauge.
    pub action: f32,
    /// Maximum of the Energy gauge.
    pub energy: f32,
    pub clip_size: usize,
    #[serde(default)]
    pub inventory: Inventory,
}

impl PlayerSpec {
    /// The arena entry that stands in for the player as a target.
    pub fn unit_spec(&self) -> UnitSpec {
        UnitSpec::new(self.name.clone(), TargetKind::Player, self.max_health)
    }

    pub fn state(&self) -> PlayerState {
        PlayerState::new(
            ResourcePool::full(self.action, self.energy),
            Clip::loaded(self.clip_size),
            self.inventory.clone(),
        )
    }

    fn validate(&self, origin: &str) -> LoadResult<()> {
        if self.clip_size == 0 || self.clip_size > OverloadConfig::MAX_CLIP_SIZE {
            anyhow::bail!(
                "{}: clip_size must be between 1 and {}, got {}",
                origin,
                OverloadConfig::MAX_CLIP_SIZE,
                self.clip_size
            );
        }
        for (gauge, max) in [("action", self.action), ("energy", self.energy)] {
            if !max.is_finite() || max <= 0.0 {
                anyhow::bail!("{}: {} maximum must be positive, got {}", origin, gauge, max);
            }
        }
        if self.max_health == 0 {
            anyhow::bail!("{}: max_health must be positive", origin);
        }
        Ok(())
    }
}

/// Loader for the player loadout from RON files.
pub struct PlayerLoader;

impl PlayerLoader {
    pub fn load(path: &Path) -> LoadResult<PlayerSpec> {
        let content = read_file(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn parse(source: &str, origin: &str) -> LoadResult<PlayerSpec> {
        let spec: PlayerSpec = ron::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse player RON {}: {}", origin, e))?;
        spec.validate(origin)?;
        Ok(spec)
    }
}
