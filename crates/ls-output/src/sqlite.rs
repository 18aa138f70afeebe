//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `vehicle_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, VehicleSnapshotRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS vehicle_snapshots (
                 vehicle_id INTEGER NOT NULL,
                 tick       INTEGER NOT NULL,
                 lane       INTEGER NOT NULL,
                 t          REAL    NOT NULL,
                 x          REAL    NOT NULL,
                 y          REAL    NOT NULL,
                 z          REAL    NOT NULL,
                 speed      REAL    NOT NULL,
                 state      TEXT    NOT NULL,
                 wait_secs  REAL    NOT NULL,
                 congestion TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick               INTEGER PRIMARY KEY,
                 time_secs          REAL    NOT NULL,
                 completions        INTEGER NOT NULL,
                 stopped            INTEGER NOT NULL,
                 phase_changes      INTEGER NOT NULL,
                 incidents          INTEGER NOT NULL,
                 throughput_per_min REAL    NOT NULL,
                 average_wait_secs  REAL    NOT NULL,
                 max_wait_secs      REAL    NOT NULL,
                 wasted_green_secs  REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO vehicle_snapshots \
                 (vehicle_id, tick, lane, t, x, y, z, speed, state, wait_secs, congestion) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.vehicle_id,
                    row.tick as i64,
                    row.lane,
                    row.t as f64,
                    row.x as f64,
                    row.y as f64,
                    row.z as f64,
                    row.speed as f64,
                    row.state,
                    row.wait_secs as f64,
                    row.congestion,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, time_secs, completions, stopped, phase_changes, incidents, \
              throughput_per_min, average_wait_secs, max_wait_secs, wasted_green_secs) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
                row.tick as i64,
                row.time_secs,
                row.completions as i64,
                row.stopped as i64,
                row.phase_changes as i64,
                row.incidents as i64,
                row.throughput_per_min,
                row.average_wait_secs,
                row.max_wait_secs as f64,
                row.wasted_green_secs as f64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
