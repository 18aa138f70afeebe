//! The `Sim` struct and its tick loop.

use tracing::info;

use ls_core::{SimClock, SimConfig, Tick};
use ls_network::{LaneNetwork, Router};
use ls_signal::{SignalPolicy, SignalSystem};
use ls_vehicle::TrafficEngine;

use crate::{
    Dispatcher, IncidentScheduler, SimEvent, SimObserver, SimResult, StatsSnapshot, TickSummary,
    TrafficStats,
};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<R, D>` holds all simulation state and drives the tick loop:
///
/// 1. **Signals**: every controller scores its groups from the vehicles'
///    current waits and advances its phase; colour changes set or clear the
///    lanes' stop flags.
/// 2. **Incidents**: expired closures reopen; a new one may close a lane.
/// 3. **Motion** (optionally parallel with the `parallel` feature): every
///    vehicle moves against a read-only network and returns its occupancy
///    changes.
/// 4. **Apply** (sequential, ascending `VehicleId`): occupancy changes.
/// 5. **Drain**: the tick's events feed [`TrafficStats`], the observer, and
///    the [`Dispatcher`] (which re-targets arrived vehicles).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Router, D: Dispatcher> {
    /// Tick length, run length, seed, snapshot interval.
    pub config:     SimConfig,

    /// Simulation clock — tracks the current tick and maps to seconds.
    pub clock:      SimClock,

    /// Lanes with their live stop/closed flags and occupants.
    pub network:    LaneNetwork,

    pub signals:    SignalSystem,

    /// Vehicles and the router they share.
    pub traffic:    TrafficEngine<R>,

    pub incidents:  IncidentScheduler,

    pub stats:      TrafficStats,

    pub dispatcher: D,

    /// Events of the tick in progress; empty between ticks.
    pub(crate) events: Vec<SimEvent>,
}

impl<R: Router, D: Dispatcher> Sim<R, D> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            vehicles = self.traffic.store.len(),
            lanes = self.network.lane_count(),
            controllers = self.signals.len(),
            ticks = self.config.total_ticks,
            "simulation starting"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.tick_once(observer)?;
        }
        let stats = self.stats_snapshot();
        info!(
            tick = %self.clock.current_tick,
            completions = stats.completions,
            throughput_per_min = stats.throughput_per_min,
            average_wait_secs = stats.average_wait_secs,
            "simulation finished"
        );
        observer.on_sim_end(self.clock.current_tick, &stats);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick_once(observer)?;
        }
        Ok(())
    }

    /// Switch every controller to `policy` and start the statistics afresh.
    pub fn set_policy(&mut self, policy: SignalPolicy) {
        self.signals.set_policy(policy, &mut self.network);
        self.reset_stats();
        info!(policy = policy.as_str(), tick = %self.clock.current_tick, "signal policy changed; statistics reset");
    }

    /// Zero completions, waits and wasted green, and restart the throughput
    /// clock.
    pub fn reset_stats(&mut self) {
        self.stats.reset(self.clock.elapsed_secs());
        self.signals.reset_stats();
        self.traffic.store.reset_waits();
    }

    pub fn stats_snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot(self.clock.elapsed_secs(), &self.traffic.store, &self.signals)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick_once<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.process_tick()?;
        // Stats time is the end of this tick.
        self.clock.advance();
        let summary = self.drain_events(now, observer)?;
        observer.on_tick_end(now, &summary);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.traffic.store, &self.network);
        }
        Ok(())
    }

    fn process_tick(&mut self) -> SimResult<()> {
        let dt = self.config.tick_secs;

        // ── Phase 1: signals ──────────────────────────────────────────────
        let mut changes = Vec::new();
        self.signals.update(dt, &mut self.network, &self.traffic.store, &mut changes);
        self.events.extend(changes.into_iter().map(SimEvent::Phase));

        // ── Phase 2: incidents ────────────────────────────────────────────
        let mut incidents = Vec::new();
        self.incidents.update(dt, &mut self.network, &mut incidents)?;
        self.events.extend(incidents.into_iter().map(SimEvent::Incident));

        // ── Phase 3 + 4: motion and apply ─────────────────────────────────
        for step in self.traffic.step(&mut self.network, dt)? {
            if let Some(wait_secs) = step.completion {
                self.events.push(SimEvent::Completion { vehicle: step.vehicle, wait_secs });
            }
            if let Some(lane) = step.arrived {
                self.events.push(SimEvent::Arrival { vehicle: step.vehicle, lane });
            }
        }
        Ok(())
    }

    /// Feed this tick's events to the statistics, the observer and the
    /// dispatcher, in the order they were queued.
    fn drain_events<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<TickSummary> {
        let mut summary = TickSummary::default();
        let events = std::mem::take(&mut self.events);
        for event in &events {
            match *event {
                SimEvent::Phase(ref change) => {
                    summary.phase_changes += 1;
                    observer.on_phase_change(now, change);
                }
                SimEvent::Incident(ref incident) => {
                    summary.incidents += 1;
                    observer.on_incident(now, incident);
                }
                SimEvent::Completion { vehicle, wait_secs } => {
                    summary.completions += 1;
                    self.stats.record_completion(wait_secs);
                    observer.on_completion(now, vehicle, wait_secs);
                }
                SimEvent::Arrival { vehicle, lane } => {
                    summary.arrivals += 1;
                    if let Some(dest) = self.dispatcher.next_destination(vehicle, lane, &self.network) {
                        self.traffic.assign_destination(&mut self.network, vehicle, dest)?;
                    }
                }
            }
        }
        // Hand the buffer back to keep its capacity.
        self.events = events;
        self.events.clear();

        summary.stopped = self.traffic.store.stopped_count();
        summary.stats = self.stats_snapshot();
        Ok(summary)
    }
}
