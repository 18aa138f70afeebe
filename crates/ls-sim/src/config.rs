//! Top-level run configuration.

use ls_core::SimConfig;
use ls_signal::{SignalPolicy, SignalSystemBuilder, SignalTiming};
use ls_vehicle::VehicleParams;

use crate::{IncidentConfig, SimError, SimResult};

/// Everything tunable about a run, typically loaded from JSON by an
/// application and handed to [`SimBuilder`][crate::SimBuilder].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrafficConfig {
    pub sim:                     SimConfig,
    pub vehicle_count:           usize,
    pub vehicle:                 VehicleParams,
    /// Policy every controller starts with.
    pub policy:                  SignalPolicy,
    pub timing:                  SignalTiming,
    /// Controllers wait a random offset drawn from
    /// `[startup_offset_min_secs, startup_offset_max_secs)` before their
    /// first Green.
    pub startup_offset_min_secs: f32,
    pub startup_offset_max_secs: f32,
    pub incidents:               IncidentConfig,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            sim:                     SimConfig::default(),
            vehicle_count:           0,
            vehicle:                 VehicleParams::default(),
            policy:                  SignalPolicy::default(),
            timing:                  SignalTiming::default(),
            startup_offset_min_secs: 0.0,
            startup_offset_max_secs: 10.0,
            incidents:               IncidentConfig::default(),
        }
    }
}

impl TrafficConfig {
    /// Check every section.  Signal timing is checked again when the signal
    /// system is built.
    pub fn validate(&self) -> SimResult<()> {
        self.sim.validate()?;
        self.vehicle.validate()?;
        self.timing.validate()?;
        let inc = &self.incidents;
        if !(inc.interval_secs.is_finite() && inc.interval_secs > 0.0) {
            return Err(SimError::Config(format!("incident interval must be positive, got {}", inc.interval_secs)));
        }
        if !(0.0..=1.0).contains(&inc.chance) {
            return Err(SimError::Config(format!("incident chance must be in [0, 1], got {}", inc.chance)));
        }
        if !(inc.duration_secs.is_finite() && inc.duration_secs >= 0.0) {
            return Err(SimError::Config(format!("incident duration must be non-negative, got {}", inc.duration_secs)));
        }
        Ok(())
    }

    /// A signal builder carrying this config's policy, timing and startup
    /// offsets.
    pub fn signal_builder(&self) -> SignalSystemBuilder {
        SignalSystemBuilder::new(self.policy, self.timing.clone())
            .startup_offsets(self.startup_offset_min_secs, self.startup_offset_max_secs)
    }
}
