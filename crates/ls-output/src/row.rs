//! Plain data row types written by output backends.

/// One vehicle's pose and motion state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshotRow {
    pub vehicle_id: u32,
    pub tick:       u64,
    /// `u32::MAX` for a vehicle that was never placed.
    pub lane:       u32,
    pub t:          f32,
    pub x:          f32,
    pub y:          f32,
    pub z:          f32,
    pub speed:      f32,
    /// `MotionState::as_str`, or `"unplaced"`.
    pub state:      &'static str,
    pub wait_secs:  f32,
    /// Congestion class of the vehicle's lane.
    pub congestion: &'static str,
}

/// Counts and running statistics for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:               u64,
    pub time_secs:          f64,
    pub completions:        u64,
    pub stopped:            u64,
    pub phase_changes:      u64,
    pub incidents:          u64,
    pub throughput_per_min: f64,
    pub average_wait_secs:  f64,
    pub max_wait_secs:      f32,
    pub wasted_green_secs:  f32,
}
