//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ls_core::{LaneId, SimConfig, Tick};
use ls_network::{Congestion, LaneNetwork};
use ls_sim::{SimObserver, StatsSnapshot, TickSummary};
use ls_vehicle::{Vehicle, VehicleStore};

use crate::row::{TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes vehicle snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    tick_secs:  f32,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` to convert ticks
    /// to seconds.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self { writer, tick_secs: config.tick_secs, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

fn snapshot_row(tick: Tick, v: &Vehicle, network: &LaneNetwork) -> VehicleSnapshotRow {
    let (lane, state, congestion) = if v.is_inert() {
        (LaneId::INVALID.0, "unplaced", Congestion::Free)
    } else {
        let congestion = network.lane(v.lane).map_or(Congestion::Free, |l| l.congestion());
        (v.lane.0, v.state.as_str(), congestion)
    };
    VehicleSnapshotRow {
        vehicle_id: v.id.0,
        tick:       tick.0,
        lane,
        t:          v.t,
        x:          v.position.x,
        y:          v.position.y,
        z:          v.position.z,
        speed:      v.speed,
        state,
        wait_secs:  v.wait.total,
        congestion: congestion.as_str(),
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        let row = TickSummaryRow {
            tick:               tick.0,
            time_secs:          (tick.0 + 1) as f64 * self.tick_secs as f64,
            completions:        summary.stats.completions,
            stopped:            summary.stopped as u64,
            phase_changes:      summary.phase_changes as u64,
            incidents:          summary.incidents as u64,
            throughput_per_min: summary.stats.throughput_per_min,
            average_wait_secs:  summary.stats.average_wait_secs,
            max_wait_secs:      summary.stats.max_wait_secs,
            wasted_green_secs:  summary.stats.wasted_green_secs,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, vehicles: &VehicleStore, network: &LaneNetwork) {
        let rows: Vec<VehicleSnapshotRow> =
            vehicles.iter().map(|v| snapshot_row(tick, v, network)).collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _stats: &StatsSnapshot) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
