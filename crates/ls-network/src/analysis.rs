//! Structural checks on a built network.
//!
//! Nothing here is needed to run a simulation; generators and applications
//! call [`analyze`] once after building to surface authoring mistakes.

use tracing::{info, warn};

use ls_core::LaneId;

use crate::network::LaneNetwork;

/// Findings from [`analyze`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkReport {
    /// Lanes with no successors.
    pub dead_ends:  Vec<LaneId>,
    /// Lanes with no predecessors.
    pub orphans:    Vec<LaneId>,
    /// Weakly connected components (following successor and predecessor
    /// edges), each sorted ascending.  Ordered by smallest member.
    pub components: Vec<Vec<LaneId>>,
}

impl NetworkReport {
    /// A vehicle can reach every lane from every other ignoring direction.
    pub fn is_connected(&self) -> bool {
        self.components.len() <= 1
    }

    /// Emit one `warn!` per finding and an `info!` summary.
    pub fn log(&self, network: &LaneNetwork) {
        let name = |id: LaneId| network.lane(id).map_or("?", |l| l.name.as_str());
        for &id in &self.dead_ends {
            warn!(lane = %id, name = name(id), "dead-end lane (no successors)");
        }
        for &id in &self.orphans {
            warn!(lane = %id, name = name(id), "orphan lane (no predecessors)");
        }
        if !self.is_connected() {
            for (i, c) in self.components.iter().enumerate() {
                warn!(component = i, lanes = c.len(), "disconnected component; vehicles cannot route out of it");
            }
        }
        info!(
            lanes = network.lane_count(),
            dead_ends = self.dead_ends.len(),
            orphans = self.orphans.len(),
            components = self.components.len(),
            "network analysis complete"
        );
    }
}

/// Find dead ends, orphans and weakly connected components.
pub fn analyze(network: &LaneNetwork) -> NetworkReport {
    let mut report = NetworkReport::default();
    for lane in network.lanes() {
        if lane.successors.is_empty() {
            report.dead_ends.push(lane.id);
        }
        if lane.predecessors.is_empty() {
            report.orphans.push(lane.id);
        }
    }

    // Iterative DFS over successor + predecessor edges.
    let mut visited = vec![false; network.lane_count()];
    let mut stack = Vec::new();
    for start in network.lane_ids() {
        if visited[start.index()] {
            continue;
        }
        let mut component = Vec::new();
        visited[start.index()] = true;
        stack.push(start);
        while let Some(cur) = stack.pop() {
            component.push(cur);
            let lane = &network.lanes()[cur.index()];
            for &next in lane.successors.iter().chain(&lane.predecessors) {
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    stack.push(next);
                }
            }
        }
        component.sort_unstable();
        report.components.push(component);
    }
    report
}
