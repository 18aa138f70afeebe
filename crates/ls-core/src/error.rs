//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `LsError` as one variant
//! via `#[from]` where a core error can surface through them.

use thiserror::Error;

use crate::{LaneId, VehicleId};

/// The top-level error type for `ls-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum LsError {
    #[error("lane {0} not found")]
    LaneNotFound(LaneId),

    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `ls-*` crates.
pub type LsResult<T> = Result<T, LsError>;
