//! Routing trait and default A* implementation.
//!
//! # Pluggability
//!
//! The vehicle engine calls routing through the [`Router`] trait, so
//! applications can swap in a congestion-aware or precomputed router without
//! touching the motion code.  The default [`AStarRouter`] searches the lane
//! graph directly.
//!
//! # Cost model
//!
//! Edge cost and heuristic are both the straight-line distance between lane
//! midpoints (metres).  The heuristic is therefore consistent and a lane is
//! never expanded twice.  Lane changes (left/right neighbours) cost the same
//! as successor hops.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ls_core::LaneId;

use crate::network::LaneNetwork;
use crate::NetworkError;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: every lane to occupy, starting with the
/// origin lane and ending with the destination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    pub lanes: Vec<LaneId>,
    /// Sum of midpoint-to-midpoint distances along `lanes`, in metres.
    pub cost:  f32,
}

impl Route {
    /// No route (no path found, or nowhere to go).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn destination(&self) -> Option<LaneId> {
        self.lanes.last().copied()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so they can be shared across Rayon
/// workers during the parallel motion phase.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to`, both inclusive.
    ///
    /// `from == to` yields the one-lane route `[from]`.  Returns
    /// [`NetworkError::NoRoute`] when `to` cannot be reached through open
    /// lanes.
    fn route(
        &self,
        network: &LaneNetwork,
        from: LaneId,
        to: LaneId,
    ) -> Result<Route, NetworkError>;
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// A* over the lane graph.
///
/// Neighbours are expanded in the order successors, left, right.  Closed
/// lanes are never expanded (the origin lane is exempt so a vehicle sitting
/// on a lane that just closed can still leave it).  Among frontier entries
/// with equal `f`, the lower `LaneId` is popped first.
pub struct AStarRouter;

impl Router for AStarRouter {
    fn route(
        &self,
        network: &LaneNetwork,
        from: LaneId,
        to: LaneId,
    ) -> Result<Route, NetworkError> {
        astar(network, from, to)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Total-ordered `f32` so costs can key a `BinaryHeap`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f32);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn astar(network: &LaneNetwork, from: LaneId, to: LaneId) -> Result<Route, NetworkError> {
    network.get(from)?;
    let goal = network.get(to)?;
    if from == to {
        return Ok(Route { lanes: vec![from], cost: 0.0 });
    }
    if goal.closed {
        return Err(NetworkError::NoRoute { from, to });
    }

    let n = network.lane_count();
    let goal_mid = goal.midpoint;
    let heuristic = |id: LaneId| network.lanes()[id.index()].midpoint.distance(goal_mid);

    // g[v] = best known cost (m) to reach v.
    let mut g = vec![f32::INFINITY; n];
    // prev[v] = lane we came from; LaneId::INVALID for unreached lanes.
    let mut prev = vec![LaneId::INVALID; n];
    let mut done = vec![false; n];

    g[from.index()] = 0.0;

    // Min-heap on (f, lane).  The LaneId secondary key breaks equal-f ties
    // toward the lower id.
    let mut heap: BinaryHeap<Reverse<(Cost, LaneId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(heuristic(from)), from)));

    while let Some(Reverse((_, lane))) = heap.pop() {
        if lane == to {
            return Ok(reconstruct(&prev, to, g[to.index()]));
        }

        // Skip stale heap entries.
        if done[lane.index()] {
            continue;
        }
        done[lane.index()] = true;

        let here = &network.lanes()[lane.index()];
        for next in here.neighbors() {
            let Some(next_lane) = network.lane(next) else { continue };
            if next_lane.closed || done[next.index()] {
                continue;
            }
            let tentative = g[lane.index()] + here.midpoint.distance(next_lane.midpoint);
            if tentative < g[next.index()] {
                g[next.index()] = tentative;
                prev[next.index()] = lane;
                heap.push(Reverse((Cost(tentative + heuristic(next)), next)));
            }
        }
    }

    Err(NetworkError::NoRoute { from, to })
}

fn reconstruct(prev: &[LaneId], to: LaneId, cost: f32) -> Route {
    let mut lanes = vec![to];
    let mut cur = to;
    while prev[cur.index()].is_valid() {
        cur = prev[cur.index()];
        lanes.push(cur);
    }
    lanes.reverse();
    Route { lanes, cost }
}
