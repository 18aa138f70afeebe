//! The `VehicleStore` — every vehicle, indexed by `VehicleId`.

use ls_core::{VehicleId, WaitSource};

use crate::{Vehicle, VehicleError, VehicleResult};

/// All vehicles of a run.  `vehicles[i].id == VehicleId(i)`.
#[derive(Clone, Debug, Default)]
pub struct VehicleStore {
    pub vehicles: Vec<Vehicle>,
}

impl VehicleStore {
    /// `count` unplaced vehicles with ids `0..count`.
    pub fn new(count: usize) -> Self {
        Self {
            vehicles: (0..count).map(|i| Vehicle::unplaced(VehicleId(i as u32))).collect(),
        }
    }

    /// Append an unplaced vehicle and return its id.
    pub fn push(&mut self) -> VehicleId {
        let id = VehicleId(self.vehicles.len() as u32);
        self.vehicles.push(Vehicle::unplaced(id));
        id
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    #[inline]
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(id.index())
    }

    pub fn vehicle(&self, id: VehicleId) -> VehicleResult<&Vehicle> {
        self.get(id).ok_or(VehicleError::VehicleNotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    /// Largest `total` wait across vehicles; 0 for an empty store.
    pub fn max_total_wait(&self) -> f32 {
        self.vehicles.iter().map(|v| v.wait.total).fold(0.0, f32::max)
    }

    /// Vehicles currently below the stopped threshold.
    pub fn stopped_count(&self) -> usize {
        self.vehicles
            .iter()
            .filter(|v| !v.is_inert() && v.wait.current > 0.0)
            .count()
    }

    /// Zero every vehicle's queue and total wait.
    pub fn reset_waits(&mut self) {
        for v in &mut self.vehicles {
            v.wait.reset();
        }
    }
}

impl WaitSource for VehicleStore {
    #[inline]
    fn current_wait_secs(&self, vehicle: VehicleId) -> f32 {
        self.get(vehicle).map_or(0.0, |v| v.wait.current)
    }
}
