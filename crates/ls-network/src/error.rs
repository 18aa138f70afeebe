//! Network-subsystem error type.

use thiserror::Error;

use ls_core::{LaneId, VehicleId};

/// Errors produced by `ls-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: LaneId, to: LaneId },

    #[error("lane {0} not found in network")]
    LaneNotFound(LaneId),

    #[error("lane {lane} cannot be its own lateral neighbor")]
    SelfNeighbor { lane: LaneId },

    #[error("{vehicle} is listed as an occupant of both {first} and {second}")]
    DuplicateOccupant { vehicle: VehicleId, first: LaneId, second: LaneId },

    #[error("{from} -> {to} has no matching predecessor edge")]
    AsymmetricEdge { from: LaneId, to: LaneId },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
