//! Signal-subsystem error type.

use thiserror::Error;

use ls_core::{ControllerId, LaneId};
use ls_network::NetworkError;

/// Errors produced by `ls-signal` builders.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("signal group '{group}' references unknown lane {lane}")]
    UnknownLane { group: String, lane: LaneId },

    #[error("lane {lane} is governed by two signal groups ({first} and {second})")]
    LaneInTwoGroups { lane: LaneId, first: ControllerId, second: ControllerId },

    #[error("controller {0} not found")]
    ControllerNotFound(ControllerId),

    #[error("invalid signal timing: {0}")]
    InvalidTiming(String),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

pub type SignalResult<T> = Result<T, SignalError>;
