//! Per-vehicle waiting time.

/// Three views of how long a vehicle has been held up.
///
/// - `current`: consecutive seconds below [`WaitTracker::STOPPED_BELOW`],
///   reset as soon as the vehicle moves.  Signal controllers score on this.
/// - `total`: every stopped second since the last statistics reset.
/// - `accumulated`: seconds below [`WaitTracker::WAITING_BELOW`] since the
///   last completion; flushed into each completion event.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitTracker {
    pub current:     f32,
    pub total:       f32,
    pub accumulated: f32,
}

impl WaitTracker {
    /// Speed (m/s) under which a vehicle counts as queued.
    pub const STOPPED_BELOW: f32 = 0.5;
    /// Speed (m/s) under which time is charged to the next completion.
    pub const WAITING_BELOW: f32 = 0.1;

    /// Record one tick of `dt` seconds at `speed`.  A vehicle that cannot
    /// move at all (`max_speed <= WAITING_BELOW`) is parked, not waiting.
    pub fn observe(&mut self, dt: f32, speed: f32, max_speed: f32) {
        if speed < Self::STOPPED_BELOW {
            self.current += dt;
            self.total += dt;
        } else {
            self.current = 0.0;
        }
        if speed < Self::WAITING_BELOW && max_speed > Self::WAITING_BELOW {
            self.accumulated += dt;
        }
    }

    /// Return the accumulated wait and zero it.
    pub fn take_accumulated(&mut self) -> f32 {
        std::mem::take(&mut self.accumulated)
    }

    /// Zero the queue and total counters.  `accumulated` belongs to the
    /// journey in progress and survives.
    pub fn reset(&mut self) {
        self.current = 0.0;
        self.total = 0.0;
    }
}
