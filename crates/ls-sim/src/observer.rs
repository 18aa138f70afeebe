//! Simulation observer trait for progress reporting and data collection.

use ls_core::{Tick, VehicleId};
use ls_network::LaneNetwork;
use ls_signal::PhaseChange;
use ls_vehicle::VehicleStore;

use crate::{Incident, StatsSnapshot, TickSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {:.1} cars/min", summary.stats.throughput_per_min);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// A vehicle flushed its accumulated wait.
    fn on_completion(&mut self, _tick: Tick, _vehicle: VehicleId, _wait_secs: f32) {}

    /// A signal group changed colour.
    fn on_phase_change(&mut self, _tick: Tick, _change: &PhaseChange) {}

    /// An incident closed or reopened a lane.
    fn on_incident(&mut self, _tick: Tick, _incident: &Incident) {}

    /// Called at the end of each tick, after events are drained.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    ///
    /// Provides read-only access to vehicle and lane state so that output
    /// writers can record positions without the sim knowing about any
    /// specific output format.
    fn on_snapshot(
        &mut self,
        _tick:     Tick,
        _vehicles: &VehicleStore,
        _network:  &LaneNetwork,
    ) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _stats: &StatsSnapshot) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
