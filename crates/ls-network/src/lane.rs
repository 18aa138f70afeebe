//! A single directed lane.

use ls_core::{LaneId, Placement, Vec3, VehicleId};

use crate::geometry::{ARC_LENGTH_SAMPLES, CubicBezier};

// ── Speed limits ──────────────────────────────────────────────────────────────

/// Lanes shorter than this get the low limit.
pub const SHORT_LANE_M: f32 = 30.0;
/// Lanes shorter than this (and not short) get the mid limit.
pub const MEDIUM_LANE_M: f32 = 60.0;

pub const LOW_SPEED_LIMIT:  f32 = 20.0;
pub const MID_SPEED_LIMIT:  f32 = 40.0;
pub const HIGH_SPEED_LIMIT: f32 = 60.0;

/// Speed limit for a lane of the given arc length.
pub fn speed_limit_for_length(length: f32) -> f32 {
    if length < SHORT_LANE_M {
        LOW_SPEED_LIMIT
    } else if length < MEDIUM_LANE_M {
        MID_SPEED_LIMIT
    } else {
        HIGH_SPEED_LIMIT
    }
}

// ── Congestion ────────────────────────────────────────────────────────────────

/// Coarse occupancy class reported to observers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Congestion {
    Free,
    Moderate,
    Heavy,
}

impl Congestion {
    pub const MODERATE_AT: usize = 2;
    pub const HEAVY_AT:    usize = 5;

    pub fn from_occupants(count: usize) -> Self {
        if count >= Self::HEAVY_AT {
            Congestion::Heavy
        } else if count >= Self::MODERATE_AT {
            Congestion::Moderate
        } else {
            Congestion::Free
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Congestion::Free     => "free",
            Congestion::Moderate => "moderate",
            Congestion::Heavy    => "heavy",
        }
    }
}

// ── Lane ──────────────────────────────────────────────────────────────────────

/// Directed lane: a Bézier centreline in a local frame, its connectivity, and
/// the live per-tick state (flags and occupants).
///
/// Topology fields are fixed once the network is built.  Only `closed`,
/// `stop_signal` and `occupants` change during a run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lane {
    pub id:           LaneId,
    pub name:         String,
    pub curve:        CubicBezier,
    pub placement:    Placement,

    // ── Cached at build ───────────────────────────────────────────────────
    pub length:       f32,
    pub speed_limit:  f32,
    /// World-space point at `t = 0.5`; routing costs are measured between these.
    pub midpoint:     Vec3,

    // ── Connectivity ──────────────────────────────────────────────────────
    pub successors:   Vec<LaneId>,
    pub predecessors: Vec<LaneId>,
    pub left:         Option<LaneId>,
    pub right:        Option<LaneId>,
    /// Turning lane inside an intersection.
    pub intersection: bool,

    // ── Live state ────────────────────────────────────────────────────────
    pub closed:       bool,
    pub stop_signal:  bool,
    /// Vehicles on this lane in the order they entered.
    pub occupants:    Vec<VehicleId>,

    /// Geometry was rejected at build; the lane stays closed for the run.
    pub(crate) disabled: bool,
}

impl Lane {
    pub(crate) fn new(
        id: LaneId,
        name: String,
        curve: CubicBezier,
        placement: Placement,
        intersection: bool,
    ) -> Self {
        let disabled = !(curve.is_finite()
            && placement.translation.is_finite()
            && placement.rotation.is_finite());
        let (length, midpoint) = if disabled {
            (0.0, Vec3::ZERO)
        } else {
            (
                curve.arc_length(ARC_LENGTH_SAMPLES),
                placement.transform_point(curve.point(0.5)),
            )
        };
        Self {
            id,
            name,
            curve,
            placement,
            length,
            speed_limit: speed_limit_for_length(length),
            midpoint,
            successors: Vec::new(),
            predecessors: Vec::new(),
            left: None,
            right: None,
            intersection,
            closed: disabled,
            stop_signal: false,
            occupants: Vec::new(),
            disabled,
        }
    }

    /// World-space point at `t`.
    #[inline]
    pub fn point(&self, t: f32) -> Vec3 {
        self.placement.transform_point(self.curve.point(t))
    }

    /// World-space (unnormalised) tangent at `t`.
    #[inline]
    pub fn tangent(&self, t: f32) -> Vec3 {
        self.placement.transform_vector(self.curve.tangent(t))
    }

    #[inline]
    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    #[inline]
    pub fn congestion(&self) -> Congestion {
        Congestion::from_occupants(self.occupants.len())
    }

    /// Rejected at build because of non-finite geometry.
    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Append `vehicle` to the occupants unless it is already present.
    pub fn enter(&mut self, vehicle: VehicleId) {
        if !self.occupants.contains(&vehicle) {
            self.occupants.push(vehicle);
        }
    }

    /// Remove `vehicle`, preserving the order of the rest.  Returns whether it
    /// was present.
    pub fn leave(&mut self, vehicle: VehicleId) -> bool {
        match self.occupants.iter().position(|&v| v == vehicle) {
            Some(i) => {
                self.occupants.remove(i);
                true
            }
            None => false,
        }
    }

    /// Successors, then the left and right neighbours: every lane reachable
    /// in one hop.
    pub fn neighbors(&self) -> impl Iterator<Item = LaneId> + '_ {
        self.successors.iter().copied().chain(self.left).chain(self.right)
    }
}
