//! The per-tick event queue.

use ls_core::{LaneId, VehicleId};
use ls_signal::PhaseChange;

use crate::{Incident, StatsSnapshot};

/// Something that happened during a tick.  Queued while the tick runs and
/// drained once at its end by the statistics, the observer and the
/// dispatcher.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SimEvent {
    /// A signal group changed colour.
    Phase(PhaseChange),
    /// An incident closed or reopened a lane.
    Incident(Incident),
    /// A vehicle reached its destination or left an intersection lane,
    /// carrying the wait accumulated since its previous completion.
    Completion { vehicle: VehicleId, wait_secs: f32 },
    /// A vehicle reached the end of its route.
    Arrival { vehicle: VehicleId, lane: LaneId },
}

/// Counts for one tick, passed to
/// [`SimObserver::on_tick_end`][crate::SimObserver::on_tick_end].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickSummary {
    pub completions:   usize,
    pub arrivals:      usize,
    pub phase_changes: usize,
    pub incidents:     usize,
    /// Placed vehicles currently below the stopped threshold.
    pub stopped:       usize,
    pub stats:         StatsSnapshot,
}
