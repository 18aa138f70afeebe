//! High-level traffic engine: placement, destinations, and the two-phase
//! motion tick.

use tracing::{debug, warn};

use ls_core::{LaneId, VehicleId, look_rotation};
use ls_network::{LaneNetwork, Router};

use crate::motion::{self, Step};
use crate::{AvoidanceIndex, VehicleError, VehicleParams, VehicleResult, VehicleStore};

/// Wraps a [`Router`] and a [`VehicleStore`] and moves every vehicle once per
/// tick.
///
/// # Type parameter
///
/// `R` must implement [`Router`] (e.g. [`ls_network::AStarRouter`]).  Swap it
/// at compile time for a different routing algorithm with no runtime
/// overhead.
pub struct TrafficEngine<R: Router> {
    /// The routing algorithm.
    pub router: R,

    /// Every vehicle's state.
    pub store:  VehicleStore,

    pub params: VehicleParams,

    /// Rebuilt at the start of every [`TrafficEngine::step`].
    avoidance:  AvoidanceIndex,
}

impl<R: Router> TrafficEngine<R> {
    /// Create an engine with `vehicle_count` unplaced vehicles.
    pub fn new(router: R, params: VehicleParams, vehicle_count: usize) -> VehicleResult<Self> {
        params.validate()?;
        Ok(Self {
            router,
            store: VehicleStore::new(vehicle_count),
            params,
            avoidance: AvoidanceIndex::default(),
        })
    }

    /// Put `vehicle` on `lane` at parameter `t`, facing along the lane, and
    /// add it to the lane's occupants.  Any previous lane and route are
    /// dropped.
    pub fn place(
        &mut self,
        network: &mut LaneNetwork,
        vehicle: VehicleId,
        lane:    LaneId,
        t:       f32,
    ) -> VehicleResult<()> {
        let l = network.get(lane)?;
        if l.closed {
            return Err(VehicleError::LaneClosed(lane));
        }
        let t = t.clamp(0.0, 1.0);
        let position = l.point(t);
        let rotation = look_rotation(l.tangent(t));

        let v = self.store.get_mut(vehicle).ok_or(VehicleError::VehicleNotFound(vehicle))?;
        if v.occupying {
            network.leave(v.lane, vehicle)?;
        }
        v.lane = lane;
        v.t = t;
        v.clear_route();
        v.position = position;
        if let Some(r) = rotation {
            v.rotation = r;
        }
        v.occupying = true;
        network.enter(lane, vehicle)?;
        Ok(())
    }

    /// Route `vehicle` from its current lane to `destination`, replacing any
    /// previous route.  A vehicle that had arrived rejoins its lane.
    ///
    /// Returns whether a route was found; without one the vehicle holds at
    /// the end of its lane.
    pub fn assign_destination(
        &mut self,
        network:     &mut LaneNetwork,
        vehicle:     VehicleId,
        destination: LaneId,
    ) -> VehicleResult<bool> {
        network.get(destination)?;
        let v = self.store.get_mut(vehicle).ok_or(VehicleError::VehicleNotFound(vehicle))?;
        if v.is_inert() {
            return Err(VehicleError::NotPlaced(vehicle));
        }

        let found = match self.router.route(network, v.lane, destination) {
            Ok(route) => {
                v.set_route(destination, route.lanes);
                true
            }
            Err(e) => {
                debug!(vehicle = %vehicle, from = %v.lane, to = %destination, error = %e, "no route to destination");
                v.set_route(destination, Vec::new());
                false
            }
        };

        if !v.occupying {
            network.enter(v.lane, vehicle)?;
            v.occupying = true;
        }
        Ok(found)
    }

    /// Warn once about every vehicle that was never placed.  Returns how
    /// many there are.
    pub fn report_unplaced(&self) -> usize {
        let mut n = 0;
        for v in self.store.iter().filter(|v| v.is_inert()) {
            warn!(vehicle = %v.id, "vehicle has no lane; it will stay inert");
            n += 1;
        }
        n
    }

    /// Advance every vehicle by `dt` seconds.
    ///
    /// 1. Rebuild the avoidance index from current positions.
    /// 2. Motion phase: each vehicle updates itself against a read-only view
    ///    of the network (parallel with the `parallel` feature).
    /// 3. Apply phase: occupancy changes in ascending `VehicleId`.
    ///
    /// Returns the steps that carried a lane change or an event.
    pub fn step(&mut self, network: &mut LaneNetwork, dt: f32) -> VehicleResult<Vec<Step>> {
        self.avoidance = AvoidanceIndex::build(&self.store.vehicles);

        let steps = self.motion_phase(network, dt);

        let mut out = Vec::new();
        for s in steps {
            if let Some(lane) = s.leave {
                network.leave(lane, s.vehicle)?;
            }
            if let Some(lane) = s.enter {
                network.enter(lane, s.vehicle)?;
            }
            if !s.is_idle() {
                out.push(s);
            }
        }
        debug_assert!(network.check_occupancy().is_ok(), "vehicle listed on two lanes");
        Ok(out)
    }

    fn motion_phase(&mut self, network: &LaneNetwork, dt: f32) -> Vec<Step> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let index  = &self.avoidance;
        let params = &self.params;
        let router = &self.router;

        #[cfg(not(feature = "parallel"))]
        {
            self.store
                .vehicles
                .iter_mut()
                .map(|v| motion::step(v, network, index, params, router, dt))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.store
                .vehicles
                .par_iter_mut()
                .map(|v| motion::step(v, network, index, params, router, dt))
                .collect()
        }
    }
}
