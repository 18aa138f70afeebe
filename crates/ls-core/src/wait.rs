//! Read access to per-vehicle waiting time.
//!
//! Signal controllers score their groups from the wait time of the vehicles
//! queued on governed lanes, but the trackers live with the vehicles.  This
//! trait is the seam: the vehicle store implements it and controllers take
//! `&impl WaitSource` each tick.

use crate::VehicleId;

/// Something that knows how long each vehicle has currently been waiting.
pub trait WaitSource {
    /// Seconds `vehicle` has been stopped in its current queue.  Unknown
    /// vehicles report `0.0`.
    fn current_wait_secs(&self, vehicle: VehicleId) -> f32;
}

/// A source that reports no waiting at all.
pub struct NoWait;

impl WaitSource for NoWait {
    #[inline]
    fn current_wait_secs(&self, _vehicle: VehicleId) -> f32 {
        0.0
    }
}

impl WaitSource for [f32] {
    #[inline]
    fn current_wait_secs(&self, vehicle: VehicleId) -> f32 {
        self.get(vehicle.index()).copied().unwrap_or(0.0)
    }
}
