//! Per-tick spatial index for local avoidance.
//!
//! Every placed vehicle's position goes into an R*-tree once per tick.  The
//! motion step then asks for the nearest vehicle inside a thin box along its
//! heading, which stands in for a forward ray cast against car bodies.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ls_core::{Vec3, VehicleId};

use crate::Vehicle;

#[derive(Copy, Clone, Debug)]
struct Entry {
    pos:     [f32; 3],
    vehicle: VehicleId,
}

impl RTreeObject for Entry {
    type Envelope = AABB<[f32; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.pos)
    }
}

impl PointDistance for Entry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let d = Vec3::from(self.pos) - Vec3::from(*point);
        d.length_squared()
    }
}

/// Positions of every placed vehicle at the start of a tick.
#[derive(Default)]
pub struct AvoidanceIndex {
    tree: RTree<Entry>,
}

impl AvoidanceIndex {
    /// Bulk-load the positions of every placed vehicle.
    pub fn build(vehicles: &[Vehicle]) -> Self {
        let entries = vehicles
            .iter()
            .filter(|v| !v.is_inert())
            .map(|v| Entry { pos: v.position.to_array(), vehicle: v.id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Distance along `forward` to the nearest other vehicle ahead of
    /// `origin`, at most `range` away and within `half_width` of the ray.
    ///
    /// Vehicles exactly level with `origin` (or behind it) are not "ahead".
    pub fn nearest_ahead(
        &self,
        me:         VehicleId,
        origin:     Vec3,
        forward:    Vec3,
        range:      f32,
        half_width: f32,
    ) -> Option<f32> {
        let fwd = forward.try_normalize()?;
        self.tree
            .locate_within_distance(origin.to_array(), range * range)
            .filter(|e| e.vehicle != me)
            .filter_map(|e| {
                let rel = Vec3::from(e.pos) - origin;
                let along = rel.dot(fwd);
                if along <= 0.0 || along > range {
                    return None;
                }
                let lateral = (rel - fwd * along).length();
                (lateral <= half_width).then_some(along)
            })
            .min_by(f32::total_cmp)
    }
}
