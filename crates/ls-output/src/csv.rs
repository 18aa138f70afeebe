//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `vehicle_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, VehicleSnapshotRow};

pub const SNAPSHOT_HEADER: [&str; 11] = [
    "vehicle_id", "tick", "lane", "t", "x", "y", "z", "speed", "state", "wait_secs", "congestion",
];

pub const SUMMARY_HEADER: [&str; 10] = [
    "tick",
    "time_secs",
    "completions",
    "stopped",
    "phase_changes",
    "incidents",
    "throughput_per_min",
    "average_wait_secs",
    "max_wait_secs",
    "wasted_green_secs",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("vehicle_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.vehicle_id.to_string(),
                row.tick.to_string(),
                row.lane.to_string(),
                format!("{:.4}", row.t),
                format!("{:.3}", row.x),
                format!("{:.3}", row.y),
                format!("{:.3}", row.z),
                format!("{:.3}", row.speed),
                row.state.to_owned(),
                format!("{:.2}", row.wait_secs),
                row.congestion.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.2}", row.time_secs),
            row.completions.to_string(),
            row.stopped.to_string(),
            row.phase_changes.to_string(),
            row.incidents.to_string(),
            format!("{:.3}", row.throughput_per_min),
            format!("{:.3}", row.average_wait_secs),
            format!("{:.2}", row.max_wait_secs),
            format!("{:.2}", row.wasted_green_secs),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
