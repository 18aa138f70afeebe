//! The per-vehicle motion step.
//!
//! [`step`] reads the network and the avoidance index but never writes to
//! them: it updates the one vehicle it owns and returns what the network
//! should do about occupancy.  That keeps it safe to run for every vehicle in
//! parallel, with [`Step`]s applied afterwards in ascending id.

use tracing::debug;

use ls_core::{LaneId, Vec3, VehicleId, look_rotation};
use ls_network::{LaneNetwork, Router, TANGENT_FLOOR};

use crate::{AvoidanceIndex, MotionState, Vehicle, VehicleParams};

/// Occupancy changes and events produced by one vehicle in one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Step {
    pub vehicle:    VehicleId,
    /// Remove the vehicle from this lane's occupants.
    pub leave:      Option<LaneId>,
    /// Add the vehicle to this lane's occupants.
    pub enter:      Option<LaneId>,
    /// Wait seconds flushed by reaching the destination or leaving an
    /// intersection lane.
    pub completion: Option<f32>,
    /// The destination lane, when it was reached this tick.
    pub arrived:    Option<LaneId>,
}

impl Step {
    fn idle(vehicle: VehicleId) -> Self {
        Self { vehicle, ..Self::default() }
    }

    /// Nothing happened beyond the vehicle's own movement.
    pub fn is_idle(&self) -> bool {
        self.leave.is_none() && self.enter.is_none() && self.completion.is_none() && self.arrived.is_none()
    }
}

/// Advance `v` by `dt` seconds.
pub fn step<R: Router + ?Sized>(
    v:       &mut Vehicle,
    network: &LaneNetwork,
    index:   &AvoidanceIndex,
    params:  &VehicleParams,
    router:  &R,
    dt:      f32,
) -> Step {
    let mut out = Step::idle(v.id);
    let Some(lane) = network.lane(v.lane) else {
        return out;
    };
    if !v.occupying {
        // Arrived; parked until re-targeted.
        v.speed = 0.0;
        v.state = MotionState::Cruising;
        return out;
    }

    // ── Speed ─────────────────────────────────────────────────────────────
    let base = params.max_speed.min(lane.speed_limit);
    let mut speed = base;
    if params.avoidance {
        let ahead = index.nearest_ahead(
            v.id,
            v.position,
            v.rotation * Vec3::Z,
            params.detection_distance,
            params.half_width,
        );
        if let Some(d) = ahead {
            speed = params.damped_speed(base, d);
        }
    }

    let at_signal = v.t >= params.signal_stop_t
        && v.next_lane().and_then(|n| network.lane(n)).is_some_and(|n| n.stop_signal);
    let held = v.t >= 1.0 && !can_leave(v, network);

    // ── Stuck detection ───────────────────────────────────────────────────
    // Only avoidance damping counts; a Red light or a dead end is no deadlock.
    if at_signal || held {
        v.stuck_secs = 0.0;
        v.override_secs = 0.0;
    } else if v.override_secs <= 0.0 {
        if base > params.moving_speed && speed < params.stuck_speed {
            v.stuck_secs += dt;
            if v.stuck_secs >= params.stuck_secs(lane.intersection) {
                debug!(vehicle = %v.id, lane = %v.lane, "vehicle stuck; overriding avoidance");
                v.override_secs = params.override_secs;
            }
        } else {
            v.stuck_secs = 0.0;
        }
    }

    v.state = MotionState::Cruising;
    if v.override_secs > 0.0 {
        v.override_secs -= dt;
        v.stuck_secs = 0.0;
        speed = base;
        v.state = MotionState::StuckOverride;
    }
    if at_signal {
        speed = 0.0;
        v.state = MotionState::BlockedAtSignal;
    }
    if held {
        speed = 0.0;
    }

    v.speed = speed;
    v.wait.observe(dt, speed, params.max_speed);

    // ── Advance along the curve ───────────────────────────────────────────
    let tangent_len = lane.tangent(v.t).length().max(TANGENT_FLOOR);
    v.t += speed * dt / tangent_len;

    if v.t >= 1.0 {
        let overflow = v.t - 1.0;
        v.t = 1.0;
        if v.route.is_empty() {
            // Hold at the lane end; retry a destination that was unreachable.
            if v.destination.is_some() {
                reroute(v, network, router);
            }
        } else if let Some(next) = v.next_lane() {
            let (blocked, closed) = network
                .lane(next)
                .map_or((false, true), |n| (n.stop_signal, n.closed));
            if closed {
                reroute(v, network, router);
                snap_to_end(v, network);
                return out;
            }
            if blocked {
                snap_to_end(v, network);
                return out;
            }

            out.leave = Some(v.lane);
            if lane.intersection {
                out.completion = Some(v.wait.take_accumulated());
            }
            v.lane = next;
            v.cursor += 1;
            v.t = overflow.min(1.0);
            out.enter = Some(next);
        } else {
            // Route exhausted on the destination lane.
            out.leave = Some(v.lane);
            out.completion = Some(v.wait.take_accumulated());
            out.arrived = Some(v.lane);
            v.occupying = false;
            v.clear_route();
        }
    }

    // ── Pose ──────────────────────────────────────────────────────────────
    if let Some(lane) = network.lane(v.lane) {
        v.position = lane.point(v.t);
        if let Some(target) = look_rotation(lane.tangent(v.t)) {
            let k = (params.rotation_speed * dt).clamp(0.0, 1.0);
            v.rotation = v.rotation.slerp(target, k);
        }
    }
    out
}

/// Whether a vehicle at the end of its lane may move on this tick: onto an
/// open, unsignalled next lane, or off the network at its destination.
fn can_leave(v: &Vehicle, network: &LaneNetwork) -> bool {
    if v.route.is_empty() {
        return false;
    }
    match v.next_lane() {
        Some(next) => network.lane(next).is_some_and(|n| !n.closed && !n.stop_signal),
        None => true,
    }
}

/// Hold at the lane end, facing along the lane.
fn snap_to_end(v: &mut Vehicle, network: &LaneNetwork) {
    if let Some(lane) = network.lane(v.lane) {
        v.position = lane.point(1.0);
        if let Some(r) = look_rotation(lane.tangent(1.0)) {
            v.rotation = r;
        }
    }
}

/// Recompute the route from the current lane to the same destination.  An
/// unreachable destination leaves the vehicle holding with an empty route.
fn reroute<R: Router + ?Sized>(v: &mut Vehicle, network: &LaneNetwork, router: &R) {
    let Some(dest) = v.destination else {
        return;
    };
    match router.route(network, v.lane, dest) {
        Ok(route) => {
            debug!(vehicle = %v.id, from = %v.lane, to = %dest, lanes = route.len(), "rerouted");
            v.set_route(dest, route.lanes);
        }
        Err(e) => {
            if !v.route.is_empty() {
                debug!(vehicle = %v.id, from = %v.lane, to = %dest, error = %e, "no route; holding");
            }
            v.set_route(dest, Vec::new());
        }
    }
}
