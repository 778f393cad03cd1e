use crate::state::Regeneration;

/// Overload tuning parameters and compile-time capacities.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverloadConfig {
    /// Maximum number of actions that can be queued in a single overload.
    /// Values above [`OverloadConfig::MAX_OVERLOAD`] are clamped.
    pub max_overload: usize,
    /// Extra energy charged per queue position (position `i` pays `i * base`).
    pub base_overload_cost: u32,
    /// Passive regeneration rates for the player's gauges.
    pub regeneration: Regeneration,
}

impl OverloadConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_OVERLOAD: usize = 8;
    pub const MAX_CLIP_SIZE: usize = 16;

    // ===== content bounds =====
    /// Largest surcharge base content may configure.
    pub const MAX_BASE_OVERLOAD_COST: u32 = 10_000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_OVERLOAD: usize = 8;
    pub const DEFAULT_BASE_OVERLOAD_COST: u32 = 5;

    pub fn new() -> Self {
        Self {
            max_overload: Self::DEFAULT_MAX_OVERLOAD,
            base_overload_cost: Self::DEFAULT_BASE_OVERLOAD_COST,
            regeneration: Regeneration::default(),
        }
    }

    pub fn with_max_overload(mut self, max_overload: usize) -> Self {
        self.max_overload = max_overload;
        self
    }

    pub fn with_base_overload_cost(mut self, base_overload_cost: u32) -> Self {
        self.base_overload_cost = base_overload_cost;
        self
    }

    pub fn with_regeneration(mut self, regeneration: Regeneration) -> Self {
        self.regeneration = regeneration;
        self
    }

    /// Queue bound actually enforced: the configured value, capped by the
    /// backing storage capacity.
    pub fn effective_max_overload(&self) -> usize {
        self.max_overload.min(Self::MAX_OVERLOAD)
    }
}

impl Default for OverloadConfig {
    fn default() -> Self {
        Self::new()
    }
}
