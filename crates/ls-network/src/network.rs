//! Lane graph and builder.
//!
//! # Data layout
//!
//! Lanes live in a `Vec<Lane>` indexed by `LaneId`, so every lookup on the hot
//! path (motion step, router expansion, signal scoring) is a direct index.
//! Each lane carries its own successor / predecessor / lateral lists; the
//! builder guarantees
//!
//! ```text
//! B ∈ successors(A)  ⇔  A ∈ predecessors(B)
//! ```
//!
//! and that no list contains duplicates.  After `build()` the topology is
//! frozen: the only mutators on [`LaneNetwork`] touch per-lane live state
//! (`closed`, `stop_signal`, occupants).

use rustc_hash::FxHashMap;
use tracing::warn;

use ls_core::{LaneId, Placement, Vec3, VehicleId};

use crate::geometry::CubicBezier;
use crate::lane::Lane;
use crate::{NetworkError, NetworkResult};

// ── LaneNetwork ───────────────────────────────────────────────────────────────

/// The frozen lane graph plus per-lane live state.
///
/// Do not construct directly; use [`LaneNetworkBuilder`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneNetwork {
    lanes: Vec<Lane>,
}

impl LaneNetwork {
    /// A network with no lanes.
    pub fn empty() -> Self {
        Self::default()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Iterator over every `LaneId`, ascending.
    pub fn lane_ids(&self) -> impl Iterator<Item = LaneId> {
        (0..self.lanes.len() as u32).map(LaneId)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, id: LaneId) -> bool {
        id.index() < self.lanes.len()
    }

    #[inline]
    pub fn lane(&self, id: LaneId) -> Option<&Lane> {
        self.lanes.get(id.index())
    }

    #[inline]
    pub fn lane_mut(&mut self, id: LaneId) -> Option<&mut Lane> {
        self.lanes.get_mut(id.index())
    }

    /// Like [`lane`](Self::lane) but returns a typed error.
    pub fn get(&self, id: LaneId) -> NetworkResult<&Lane> {
        self.lane(id).ok_or(NetworkError::LaneNotFound(id))
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// First lane whose name matches exactly.
    pub fn find_by_name(&self, name: &str) -> Option<LaneId> {
        self.lanes.iter().find(|l| l.name == name).map(|l| l.id)
    }

    // ── Geometry & state accessors ────────────────────────────────────────

    pub fn point(&self, id: LaneId, t: f32) -> Option<Vec3> {
        self.lane(id).map(|l| l.point(t))
    }

    pub fn tangent(&self, id: LaneId, t: f32) -> Option<Vec3> {
        self.lane(id).map(|l| l.tangent(t))
    }

    /// Occupants on `id`; 0 for unknown lanes.
    pub fn occupant_count(&self, id: LaneId) -> usize {
        self.lane(id).map_or(0, Lane::occupant_count)
    }

    /// `true` if the lane exists and is not closed.
    #[inline]
    pub fn is_open(&self, id: LaneId) -> bool {
        self.lane(id).is_some_and(|l| !l.closed)
    }

    /// Lanes reachable in one hop from `id` (successors, left, right).
    pub fn neighbors(&self, id: LaneId) -> impl Iterator<Item = LaneId> + '_ {
        self.lane(id).into_iter().flat_map(Lane::neighbors)
    }

    /// Currently open lanes, ascending.
    pub fn open_lanes(&self) -> Vec<LaneId> {
        self.lanes.iter().filter(|l| !l.closed).map(|l| l.id).collect()
    }

    // ── Live-state mutators ───────────────────────────────────────────────

    /// Open or close a lane.  Lanes disabled at build stay closed.
    pub fn set_closed(&mut self, id: LaneId, closed: bool) -> NetworkResult<()> {
        let lane = self.lane_mut(id).ok_or(NetworkError::LaneNotFound(id))?;
        lane.closed = closed || lane.disabled;
        Ok(())
    }

    pub fn set_stop_signal(&mut self, id: LaneId, stop: bool) -> NetworkResult<()> {
        let lane = self.lane_mut(id).ok_or(NetworkError::LaneNotFound(id))?;
        lane.stop_signal = stop;
        Ok(())
    }

    pub fn enter(&mut self, id: LaneId, vehicle: VehicleId) -> NetworkResult<()> {
        let lane = self.lane_mut(id).ok_or(NetworkError::LaneNotFound(id))?;
        lane.enter(vehicle);
        Ok(())
    }

    /// Remove `vehicle` from `id`'s occupants; `Ok(false)` if it was absent.
    pub fn leave(&mut self, id: LaneId, vehicle: VehicleId) -> NetworkResult<bool> {
        let lane = self.lane_mut(id).ok_or(NetworkError::LaneNotFound(id))?;
        Ok(lane.leave(vehicle))
    }

    // ── Invariant checks ──────────────────────────────────────────────────

    /// Verify successor/predecessor symmetry.
    pub fn check_consistency(&self) -> NetworkResult<()> {
        for lane in &self.lanes {
            for &next in &lane.successors {
                let back = self.get(next)?;
                if !back.predecessors.contains(&lane.id) {
                    return Err(NetworkError::AsymmetricEdge { from: lane.id, to: next });
                }
            }
            for &prev in &lane.predecessors {
                let fwd = self.get(prev)?;
                if !fwd.successors.contains(&lane.id) {
                    return Err(NetworkError::AsymmetricEdge { from: prev, to: lane.id });
                }
            }
        }
        Ok(())
    }

    /// Verify that no vehicle is listed on more than one lane.
    pub fn check_occupancy(&self) -> NetworkResult<()> {
        let mut seen: FxHashMap<VehicleId, LaneId> = FxHashMap::default();
        for lane in &self.lanes {
            for &v in &lane.occupants {
                if let Some(first) = seen.insert(v, lane.id) {
                    return Err(NetworkError::DuplicateOccupant {
                        vehicle: v,
                        first,
                        second: lane.id,
                    });
                }
            }
        }
        Ok(())
    }
}

// ── LaneNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`LaneNetwork`] incrementally, then call [`build`](Self::build).
///
/// Lanes and edges may be added in any order.  `connect` records both sides
/// of an edge and ignores duplicates; `build()` validates every referenced
/// id and computes per-lane length, midpoint and speed limit.
///
/// # Example
///
/// ```
/// use ls_core::{Placement, Vec3};
/// use ls_network::{CubicBezier, LaneNetworkBuilder};
///
/// let mut b = LaneNetworkBuilder::new();
/// let a = b.add_lane("a", CubicBezier::line(Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0)), Placement::IDENTITY);
/// let c = b.add_lane("c", CubicBezier::line(Vec3::new(0.0, 0.0, 20.0), Vec3::new(0.0, 0.0, 40.0)), Placement::IDENTITY);
/// b.connect(a, c);
/// let net = b.build().unwrap();
/// assert_eq!(net.lane_count(), 2);
/// assert_eq!(net.lane(c).unwrap().predecessors, vec![a]);
/// ```
#[derive(Default)]
pub struct LaneNetworkBuilder {
    lanes:     Vec<Lane>,
    raw_edges: Vec<(LaneId, LaneId)>,
    lateral:   Vec<(LaneId, Option<LaneId>, Option<LaneId>)>,
}

impl LaneNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(lanes: usize, edges: usize) -> Self {
        Self {
            lanes:     Vec::with_capacity(lanes),
            raw_edges: Vec::with_capacity(edges),
            lateral:   Vec::new(),
        }
    }

    /// Add an ordinary road lane and return its `LaneId` (sequential from 0).
    pub fn add_lane(
        &mut self,
        name: impl Into<String>,
        curve: CubicBezier,
        placement: Placement,
    ) -> LaneId {
        self.push_lane(name.into(), curve, placement, false)
    }

    /// Add a turning lane inside an intersection.
    pub fn add_turn_lane(
        &mut self,
        name: impl Into<String>,
        curve: CubicBezier,
        placement: Placement,
    ) -> LaneId {
        self.push_lane(name.into(), curve, placement, true)
    }

    fn push_lane(&mut self, name: String, curve: CubicBezier, placement: Placement, intersection: bool) -> LaneId {
        let id = LaneId(self.lanes.len() as u32);
        self.lanes.push(Lane::new(id, name, curve, placement, intersection));
        id
    }

    /// Flag an already-added lane as an intersection lane.
    pub fn mark_intersection(&mut self, id: LaneId) -> NetworkResult<()> {
        let lane = self.lanes.get_mut(id.index()).ok_or(NetworkError::LaneNotFound(id))?;
        lane.intersection = true;
        Ok(())
    }

    /// Record the directed edge `from → to`.  The matching predecessor entry
    /// is added at build; repeated calls are ignored.
    pub fn connect(&mut self, from: LaneId, to: LaneId) {
        self.raw_edges.push((from, to));
    }

    /// Set the lateral neighbours of `lane`.
    pub fn set_neighbors(&mut self, lane: LaneId, left: Option<LaneId>, right: Option<LaneId>) {
        self.lateral.push((lane, left, right));
    }

    /// World-space end point of a lane added earlier; lets generators chain
    /// lanes end-to-start.
    pub fn lane_end(&self, id: LaneId) -> Option<Vec3> {
        self.lanes.get(id.index()).map(|l| l.point(1.0))
    }

    pub fn lane_count(&self) -> usize { self.lanes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`LaneNetwork`].
    ///
    /// Fails on any edge or lateral link that names an unknown lane.  Lanes
    /// with non-finite geometry are kept but closed for the whole run.
    pub fn build(self) -> NetworkResult<LaneNetwork> {
        let mut lanes = self.lanes;
        let n = lanes.len();
        let check = |id: LaneId| if id.index() < n { Ok(()) } else { Err(NetworkError::LaneNotFound(id)) };

        for &(from, to) in &self.raw_edges {
            check(from)?;
            check(to)?;
            if !lanes[from.index()].successors.contains(&to) {
                lanes[from.index()].successors.push(to);
            }
            if !lanes[to.index()].predecessors.contains(&from) {
                lanes[to.index()].predecessors.push(from);
            }
        }

        for &(lane, left, right) in &self.lateral {
            check(lane)?;
            for side in [left, right].into_iter().flatten() {
                check(side)?;
                if side == lane {
                    return Err(NetworkError::SelfNeighbor { lane });
                }
            }
            lanes[lane.index()].left = left;
            lanes[lane.index()].right = right;
        }

        for lane in lanes.iter().filter(|l| l.disabled) {
            warn!(lane = %lane.id, name = %lane.name, "non-finite lane geometry; lane stays closed");
        }

        let net = LaneNetwork { lanes };
        debug_assert!(net.check_consistency().is_ok());
        Ok(net)
    }
}
