use ls_core::{LaneId, VehicleId};
use ls_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("vehicle {0} does not exist")]
    VehicleNotFound(VehicleId),

    #[error("vehicle {0} has not been placed on a lane")]
    NotPlaced(VehicleId),

    #[error("cannot place a vehicle on closed lane {0}")]
    LaneClosed(LaneId),

    #[error("invalid vehicle parameter: {0}")]
    InvalidParams(String),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

pub type VehicleResult<T> = Result<T, VehicleError>;
