//! Player resource gauges.
//!
//! Two independent gauges feed the overload system:
//! - **Action**: paid by every executed action, regenerates while not full
//! - **Energy**: paid by actions plus the per-position overload surcharge,
//!   regenerates more slowly while in combat
//!
//! Every mutation clamps to `[0, maximum]`, so all operations are total.

/// Gauge selector.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gauge {
    Action,
    Energy,
}

/// A single clamped meter.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaugeMeter {
    current: f32,
    maximum: f32,
}

impl GaugeMeter {
    /// Creates a meter, clamping `current` into `[0, maximum]`.
    pub fn new(current: f32, maximum: f32) -> Self {
        let maximum = sanitize(maximum);
        Self {
            current: sanitize(current).min(maximum),
            maximum,
        }
    }

    /// Creates a meter filled to its maximum.
    pub fn full(maximum: f32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// Fill ratio in `[0, 1]`; an empty-capacity meter reports 0.
    pub fn fraction(&self) -> f32 {
        if self.maximum <= 0.0 {
            0.0
        } else {
            self.current / self.maximum
        }
    }

    /// Adjusts the current value by `delta`, clamped. Returns the change applied.
    pub fn add(&mut self, delta: f32) -> f32 {
        if !delta.is_finite() {
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current + delta).clamp(0.0, self.maximum);
        self.current - before
    }

    pub fn set_maximum(&mut self, maximum: f32) {
        self.maximum = sanitize(maximum);
        self.current = self.current.min(self.maximum);
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Regeneration rate for one gauge, in points per second.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaugeRegen {
    pub rate: f32,
    /// Multiplier applied while the combat flag is set.
    pub combat_factor: f32,
}

impl GaugeRegen {
    pub const fn new(rate: f32, combat_factor: f32) -> Self {
        Self {
            rate,
            combat_factor,
        }
    }

    fn effective_rate(&self, in_combat: bool) -> f32 {
        if in_combat {
            self.rate * self.combat_factor
        } else {
            self.rate
        }
    }
}

/// Passive regeneration settings for both gauges.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Regeneration {
    pub action: GaugeRegen,
    pub energy: GaugeRegen,
}

impl Regeneration {
    pub const DEFAULT_ACTION: GaugeRegen = GaugeRegen::new(10.0, 1.0);
    pub const DEFAULT_ENERGY: GaugeRegen = GaugeRegen::new(5.0, 0.5);

    pub fn get(&self, gauge: Gauge) -> GaugeRegen {
        match gauge {
            Gauge::Action => self.action,
            Gauge::Energy => self.energy,
        }
    }
}

impl Default for Regeneration {
    fn default() -> Self {
        Self {
            action: Self::DEFAULT_ACTION,
            energy: Self::DEFAULT_ENERGY,
        }
    }
}

/// Amount actually regenerated by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenDelta {
    pub action: f32,
    pub energy: f32,
}

impl RegenDelta {
    pub fn is_zero(&self) -> bool {
        self.action == 0.0 && self.energy == 0.0
    }
}

/// The player's Action and Energy gauges.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    action: GaugeMeter,
    energy: GaugeMeter,
}

impl ResourcePool {
    pub fn new(action: GaugeMeter, energy: GaugeMeter) -> Self {
        Self { action, energy }
    }

    /// Both gauges filled to the given maximums.
    pub fn full(action_max: f32, energy_max: f32) -> Self {
        Self::new(GaugeMeter::full(action_max), GaugeMeter::full(energy_max))
    }

    pub fn meter(&self, gauge: Gauge) -> &GaugeMeter {
        match gauge {
            Gauge::Action => &self.action,
            Gauge::Energy => &self.energy,
        }
    }

    fn meter_mut(&mut self, gauge: Gauge) -> &mut GaugeMeter {
        match gauge {
            Gauge::Action => &mut self.action,
            Gauge::Energy => &mut self.energy,
        }
    }

    pub fn get(&self, gauge: Gauge) -> f32 {
        self.meter(gauge).current()
    }

    pub fn maximum(&self, gauge: Gauge) -> f32 {
        self.meter(gauge).maximum()
    }

    pub fn is_full(&self, gauge: Gauge) -> bool {
        self.meter(gauge).is_full()
    }

    /// Adjusts a gauge by `delta`, clamped to `[0, max]`. Returns the change applied.
    pub fn add(&mut self, gauge: Gauge, delta: f32) -> f32 {
        self.meter_mut(gauge).add(delta)
    }

    pub fn set_maximum(&mut self, gauge: Gauge, maximum: f32) {
        self.meter_mut(gauge).set_maximum(maximum);
    }

    /// Applies one tick of passive regeneration.
    ///
    /// Full gauges are skipped. Non-positive or non-finite `elapsed_secs` is a no-op.
    pub fn regenerate(
        &mut self,
        rates: &Regeneration,
        elapsed_secs: f32,
        in_combat: bool,
    ) -> RegenDelta {
        let mut delta = RegenDelta::default();
        if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 {
            return delta;
        }

        for gauge in [Gauge::Action, Gauge::Energy] {
            if self.is_full(gauge) {
                continue;
            }
            let amount = rates.get(gauge).effective_rate(in_combat) * elapsed_secs;
            let applied = self.add(gauge, amount);
            match gauge {
                Gauge::Action => delta.action = applied,
                Gauge::Energy => delta.energy = applied,
            }
        }

        delta
    }
}
