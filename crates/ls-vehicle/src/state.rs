//! Per-vehicle motion state.

use ls_core::{LaneId, Quat, Vec3, VehicleId};

use crate::WaitTracker;

/// What the motion step did with a vehicle's speed this tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionState {
    /// Driving at base speed, possibly damped by a vehicle ahead.
    #[default]
    Cruising,
    /// Held near the end of the lane because the next lane shows Red.
    BlockedAtSignal,
    /// Damping ignored to break a deadlock.
    StuckOverride,
}

impl MotionState {
    pub fn as_str(self) -> &'static str {
        match self {
            MotionState::Cruising        => "cruising",
            MotionState::BlockedAtSignal => "blocked_at_signal",
            MotionState::StuckOverride   => "stuck_override",
        }
    }
}

/// One vehicle: where it is on the network, where it is going, and its
/// timers.
///
/// `route[cursor] == lane` whenever the route is non-empty.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub id:            VehicleId,
    /// Current lane; `LaneId::INVALID` for an unplaced (inert) vehicle.
    pub lane:          LaneId,
    /// Curve parameter on `lane`, in `[0, 1]`.
    pub t:             f32,
    pub destination:   Option<LaneId>,
    /// Lanes from the current one to the destination, inclusive.
    pub route:         Vec<LaneId>,
    pub cursor:        usize,

    // ── Kinematics ────────────────────────────────────────────────────────
    pub position:      Vec3,
    pub rotation:      Quat,
    /// Effective speed applied on the last tick.
    pub speed:         f32,
    pub state:         MotionState,

    // ── Timers ────────────────────────────────────────────────────────────
    pub wait:          WaitTracker,
    pub stuck_secs:    f32,
    pub override_secs: f32,

    /// Listed in `lane`'s occupants.  Cleared on arrival until the vehicle is
    /// re-targeted.
    pub(crate) occupying: bool,
}

impl Vehicle {
    /// An unplaced vehicle.
    pub fn unplaced(id: VehicleId) -> Self {
        Self {
            id,
            lane: LaneId::INVALID,
            t: 0.0,
            destination: None,
            route: Vec::new(),
            cursor: 0,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            speed: 0.0,
            state: MotionState::Cruising,
            wait: WaitTracker::default(),
            stuck_secs: 0.0,
            override_secs: 0.0,
            occupying: false,
        }
    }

    /// Has no lane and never moves.
    #[inline]
    pub fn is_inert(&self) -> bool {
        !self.lane.is_valid()
    }

    /// Whether the vehicle is listed in its lane's occupants.
    #[inline]
    pub fn is_occupying(&self) -> bool {
        self.occupying
    }

    /// The lane after the current one on the route.
    #[inline]
    pub fn next_lane(&self) -> Option<LaneId> {
        self.route.get(self.cursor + 1).copied()
    }

    /// Lanes still ahead, excluding the current one.
    pub fn remaining(&self) -> &[LaneId] {
        self.route.get(self.cursor + 1..).unwrap_or(&[])
    }

    /// Install a new route starting at the current lane.  Any previous route
    /// is discarded.
    pub(crate) fn set_route(&mut self, destination: LaneId, route: Vec<LaneId>) {
        self.destination = Some(destination);
        self.route = route;
        self.cursor = 0;
    }

    pub(crate) fn clear_route(&mut self) {
        self.destination = None;
        self.route.clear();
        self.cursor = 0;
    }
}
