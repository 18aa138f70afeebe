//! `ls-output` — simulation output writers for the lanesim traffic simulator.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                     |
//! |-----------|---------|---------------------------------------------------|
//! | *(none)*  | CSV     | `vehicle_snapshots.csv`, `tick_summaries.csv`     |
//! | `sqlite`  | SQLite  | `output.db`                                       |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `ls_sim::SimObserver`.  Summaries are written every
//! tick; snapshots every `output_interval_ticks`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ls_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &sim.config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{TickSummaryRow, VehicleSnapshotRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
