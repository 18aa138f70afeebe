//! Fluent builder for constructing a [`Sim`].

use tracing::{debug, info};

use ls_core::{LaneId, SimRng, VehicleId};
use ls_network::{LaneNetwork, Router};
use ls_signal::{SignalSystem, SignalSystemBuilder};
use ls_vehicle::TrafficEngine;

use crate::dispatch::random_fleet;
use crate::{Dispatcher, IncidentScheduler, Sim, SimError, SimResult, TrafficConfig, TrafficStats};

/// Child-stream offsets of the master RNG, one per consumer.
const SIGNAL_STREAM:   u64 = 1;
const INCIDENT_STREAM: u64 = 2;
const FLEET_STREAM:    u64 = 3;

/// Fluent builder for [`Sim<R, D>`].
///
/// # Required inputs
///
/// - [`TrafficConfig`]: tick length, vehicle count and parameters, signal
///   timing, incidents
/// - [`LaneNetwork`]: a finalised lane graph
/// - `R: Router`: the routing algorithm (e.g. [`ls_network::AStarRouter`])
/// - `D: Dispatcher`: re-targets arrived vehicles
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                   |
/// |--------------------------|-------------------------------------------|
/// | `.signals(b)`            | No controllers                            |
/// | `.initial_lanes(v)`      | All vehicles unplaced                     |
/// | `.destinations(v)`       | No destinations                           |
/// | `.random_fleet()`        | Off; places every vehicle at random       |
///
/// # Example
///
/// ```rust,ignore
/// let mut signals = config.signal_builder();
/// let c = signals.add_controller("centre");
/// signals.add_group(c, "north", north_turns, 3)?;
/// let mut sim = SimBuilder::new(config, network, AStarRouter, dispatcher)
///     .signals(signals)
///     .random_fleet()
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<R: Router, D: Dispatcher> {
    config:       TrafficConfig,
    network:      LaneNetwork,
    router:       R,
    dispatcher:   D,
    signals:      Option<SignalSystemBuilder>,
    lanes:        Option<Vec<Option<(LaneId, f32)>>>,
    destinations: Option<Vec<Option<LaneId>>>,
    random_fleet: bool,
}

impl<R: Router, D: Dispatcher> SimBuilder<R, D> {
    /// Create a builder with all required inputs.
    pub fn new(config: TrafficConfig, network: LaneNetwork, router: R, dispatcher: D) -> Self {
        Self {
            config,
            network,
            router,
            dispatcher,
            signals:      None,
            lanes:        None,
            destinations: None,
            random_fleet: false,
        }
    }

    /// Supply the signal controllers.
    pub fn signals(mut self, signals: SignalSystemBuilder) -> Self {
        self.signals = Some(signals);
        self
    }

    /// Supply each vehicle's starting lane and curve parameter.
    ///
    /// Must be length `vehicle_count`.  `None` entries stay unplaced and
    /// inert.
    pub fn initial_lanes(mut self, lanes: Vec<Option<(LaneId, f32)>>) -> Self {
        self.lanes = Some(lanes);
        self
    }

    /// Supply each vehicle's first destination (must be length
    /// `vehicle_count`).
    pub fn destinations(mut self, destinations: Vec<Option<LaneId>>) -> Self {
        self.destinations = Some(destinations);
        self
    }

    /// Place every vehicle on a random open lane with a random destination,
    /// after any explicit placement.
    pub fn random_fleet(mut self) -> Self {
        self.random_fleet = true;
        self
    }

    /// Validate inputs, build the controllers and the traffic engine, place
    /// vehicles, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<R, D>> {
        self.config.validate()?;
        let count = self.config.vehicle_count;

        // ── Validate optional inputs ──────────────────────────────────────
        if let Some(l) = &self.lanes {
            if l.len() != count {
                return Err(SimError::VehicleCountMismatch { expected: count, got: l.len(), what: "initial lanes" });
            }
        }
        if let Some(d) = &self.destinations {
            if d.len() != count {
                return Err(SimError::VehicleCountMismatch { expected: count, got: d.len(), what: "destinations" });
            }
        }

        configure_threads(self.config.sim.num_threads)?;

        let mut master = SimRng::new(self.config.sim.seed);
        let mut network = self.network;

        // ── Signals ───────────────────────────────────────────────────────
        let signals = match self.signals {
            Some(b) => b.build(&mut network, &mut master.child(SIGNAL_STREAM))?,
            None => SignalSystem::empty(),
        };

        // ── Vehicles ──────────────────────────────────────────────────────
        let mut traffic = TrafficEngine::new(self.router, self.config.vehicle.clone(), count)?;
        if self.random_fleet {
            random_fleet(&mut traffic, &mut network, &mut master.child(FLEET_STREAM))?;
        }
        if let Some(lanes) = self.lanes {
            for (i, slot) in lanes.into_iter().enumerate() {
                if let Some((lane, t)) = slot {
                    traffic.place(&mut network, VehicleId(i as u32), lane, t)?;
                }
            }
        }
        if let Some(dests) = self.destinations {
            for (i, dest) in dests.into_iter().enumerate() {
                let vehicle = VehicleId(i as u32);
                let Some(dest) = dest else { continue };
                if !traffic.store.vehicle(vehicle)?.is_inert() {
                    traffic.assign_destination(&mut network, vehicle, dest)?;
                }
            }
        }
        traffic.report_unplaced();

        let incidents = IncidentScheduler::new(self.config.incidents.clone(), master.child(INCIDENT_STREAM));

        info!(
            vehicles = count,
            controllers = signals.len(),
            policy = self.config.policy.as_str(),
            "simulation built"
        );

        Ok(Sim {
            clock:      self.config.sim.make_clock(),
            config:     self.config.sim,
            network,
            signals,
            traffic,
            incidents,
            stats:      TrafficStats::default(),
            dispatcher: self.dispatcher,
            events:     Vec::new(),
        })
    }
}

/// Size Rayon's global pool.  The pool can only be sized once per process;
/// later calls keep the existing pool.
#[cfg(feature = "parallel")]
fn configure_threads(num_threads: Option<usize>) -> SimResult<()> {
    if let Some(n) = num_threads {
        if n == 0 {
            return Err(SimError::Config("num_threads must be at least 1".into()));
        }
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(n).build_global() {
            debug!(error = %e, "rayon global pool already initialised");
        }
    }
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn configure_threads(num_threads: Option<usize>) -> SimResult<()> {
    if num_threads.is_some_and(|n| n > 1) {
        debug!("num_threads ignored without the `parallel` feature");
    }
    Ok(())
}
