//! Run-wide traffic statistics.

use ls_signal::SignalSystem;
use ls_vehicle::VehicleStore;

/// Completion counters since the last reset.  Owned by the [`Sim`] and fed
/// from the per-tick event queue.
///
/// [`Sim`]: crate::Sim
#[derive(Clone, Debug, Default)]
pub struct TrafficStats {
    completions: u64,
    wait_sum:    f64,
    /// Simulated time of the last reset.
    since_secs:  f64,
}

/// Point-in-time view of the statistics, combined with live vehicle and
/// controller state.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    pub completions:        u64,
    /// Completions per simulated minute since the last reset.
    pub throughput_per_min: f64,
    pub average_wait_secs:  f64,
    /// Largest total wait of any live vehicle.
    pub max_wait_secs:      f32,
    /// Green shown to empty groups, summed over controllers.
    pub wasted_green_secs:  f32,
}

impl TrafficStats {
    pub fn record_completion(&mut self, wait_secs: f32) {
        self.completions += 1;
        self.wait_sum += wait_secs as f64;
    }

    pub fn completions(&self) -> u64 {
        self.completions
    }

    /// Completions per minute over `[since, now_secs]`; 0 before any time
    /// has passed.
    pub fn throughput_per_min(&self, now_secs: f64) -> f64 {
        let runtime = now_secs - self.since_secs;
        if runtime <= 0.0 {
            return 0.0;
        }
        self.completions as f64 / runtime * 60.0
    }

    /// Mean wait per completion; 0 with no completions.
    pub fn average_wait_secs(&self) -> f64 {
        if self.completions == 0 {
            return 0.0;
        }
        self.wait_sum / self.completions as f64
    }

    /// Start counting afresh from `now_secs`.
    pub fn reset(&mut self, now_secs: f64) {
        *self = Self { since_secs: now_secs, ..Self::default() };
    }

    pub fn snapshot(&self, now_secs: f64, vehicles: &VehicleStore, signals: &SignalSystem) -> StatsSnapshot {
        StatsSnapshot {
            completions:        self.completions,
            throughput_per_min: self.throughput_per_min(now_secs),
            average_wait_secs:  self.average_wait_secs(),
            max_wait_secs:      vehicles.max_total_wait(),
            wasted_green_secs:  signals.total_wasted_green_secs(),
        }
    }
}
