//! Random, temporary lane closures.

use tracing::debug;

use ls_core::{LaneId, SimRng};
use ls_network::{LaneNetwork, NetworkResult};

#[cfg(feature = "fx-hash")]
type LaneMap<V> = rustc_hash::FxHashMap<LaneId, V>;
#[cfg(not(feature = "fx-hash"))]
type LaneMap<V> = std::collections::HashMap<LaneId, V>;

/// When and for how long incidents close lanes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IncidentConfig {
    /// Off by default.
    pub enabled:       bool,
    /// Seconds between draws.
    pub interval_secs: f32,
    /// Probability that a draw closes a lane.
    pub chance:        f64,
    /// Seconds a closed lane stays closed.
    pub duration_secs: f32,
}

impl Default for IncidentConfig {
    fn default() -> Self {
        Self {
            enabled:       false,
            interval_secs: 10.0,
            chance:        0.5,
            duration_secs: 15.0,
        }
    }
}

/// A lane closed or reopened by the scheduler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Incident {
    pub lane:   LaneId,
    pub closed: bool,
}

/// Every `interval_secs`, with probability `chance`, closes one random open
/// lane for `duration_secs`.
pub struct IncidentScheduler {
    config:     IncidentConfig,
    rng:        SimRng,
    since_draw: f32,
    /// Lane → seconds until it reopens.
    active:     LaneMap<f32>,
}

impl IncidentScheduler {
    pub fn new(config: IncidentConfig, rng: SimRng) -> Self {
        Self { config, rng, since_draw: 0.0, active: LaneMap::default() }
    }

    pub fn config(&self) -> &IncidentConfig {
        &self.config
    }

    /// Lanes currently closed by an incident, ascending.
    pub fn active_lanes(&self) -> Vec<LaneId> {
        let mut lanes: Vec<LaneId> = self.active.keys().copied().collect();
        lanes.sort_unstable();
        lanes
    }

    pub fn is_active(&self, lane: LaneId) -> bool {
        self.active.contains_key(&lane)
    }

    /// Advance by `dt`: reopen expired closures, then maybe start a new one.
    /// Changes are appended to `out`, reopenings first, in ascending lane id.
    pub fn update(
        &mut self,
        dt:      f32,
        network: &mut LaneNetwork,
        out:     &mut Vec<Incident>,
    ) -> NetworkResult<()> {
        let mut expired = Vec::new();
        for (&lane, remaining) in &mut self.active {
            *remaining -= dt;
            if *remaining <= 0.0 {
                expired.push(lane);
            }
        }
        expired.sort_unstable();
        for lane in expired {
            self.active.remove(&lane);
            network.set_closed(lane, false)?;
            debug!(lane = %lane, "incident cleared; lane reopened");
            out.push(Incident { lane, closed: false });
        }

        if !self.config.enabled {
            return Ok(());
        }
        self.since_draw += dt;
        if self.since_draw < self.config.interval_secs {
            return Ok(());
        }
        self.since_draw -= self.config.interval_secs;
        if !self.rng.gen_bool(self.config.chance) {
            return Ok(());
        }

        let candidates = network.open_lanes();
        if let Some(&lane) = self.rng.choose(&candidates) {
            network.set_closed(lane, true)?;
            self.active.insert(lane, self.config.duration_secs);
            debug!(lane = %lane, secs = self.config.duration_secs, "incident closed lane");
            out.push(Incident { lane, closed: true });
        }
        Ok(())
    }
}
