//! Choosing where vehicles go.

use ls_core::{LaneId, SimRng, VehicleId};
use ls_network::{LaneNetwork, Router};
use ls_vehicle::TrafficEngine;

use crate::{SimError, SimResult};

/// Hands out a new destination to each vehicle that arrives.
///
/// Called once per arrival while the tick's event queue is drained, in
/// ascending vehicle id.
pub trait Dispatcher {
    /// Where `vehicle`, which just reached `lane`, goes next.  `None` leaves
    /// it parked at the end of `lane`.
    fn next_destination(
        &mut self,
        vehicle: VehicleId,
        lane:    LaneId,
        network: &LaneNetwork,
    ) -> Option<LaneId>;
}

/// A [`Dispatcher`] that parks every vehicle on arrival.
pub struct Parked;

impl Dispatcher for Parked {
    fn next_destination(&mut self, _: VehicleId, _: LaneId, _: &LaneNetwork) -> Option<LaneId> {
        None
    }
}

/// Sends each arriving vehicle to a uniformly random open lane other than
/// the one it is on.
pub struct RandomDispatcher {
    rng: SimRng,
}

impl RandomDispatcher {
    pub fn new(rng: SimRng) -> Self {
        Self { rng }
    }
}

impl Dispatcher for RandomDispatcher {
    fn next_destination(&mut self, _vehicle: VehicleId, lane: LaneId, network: &LaneNetwork) -> Option<LaneId> {
        random_destination(&mut self.rng, network, lane)
    }
}

/// A random open lane other than `current`.  On a network where `current`
/// is the only candidate, `current` itself.
pub fn random_destination(rng: &mut SimRng, network: &LaneNetwork, current: LaneId) -> Option<LaneId> {
    let candidates: Vec<LaneId> = network.open_lanes().into_iter().filter(|&l| l != current).collect();
    match rng.choose(&candidates) {
        Some(&lane) => Some(lane),
        None => network.contains(current).then_some(current),
    }
}

/// Place every vehicle of `engine` on a random open lane at a random `t`
/// and give it a random destination.  Returns how many found a route.
pub fn random_fleet<R: Router>(
    engine:  &mut TrafficEngine<R>,
    network: &mut LaneNetwork,
    rng:     &mut SimRng,
) -> SimResult<usize> {
    let open = network.open_lanes();
    if open.is_empty() && !engine.store.is_empty() {
        return Err(SimError::Config("cannot spawn vehicles: no open lanes".into()));
    }
    let mut routed = 0;
    for i in 0..engine.store.len() {
        let vehicle = VehicleId(i as u32);
        let Some(&lane) = rng.choose(&open) else {
            break;
        };
        let t: f32 = rng.gen_range(0.0..1.0);
        engine.place(network, vehicle, lane, t)?;
        if let Some(dest) = random_destination(rng, network, lane) {
            if engine.assign_destination(network, vehicle, dest)? {
                routed += 1;
            }
        }
    }
    Ok(routed)
}
