use ls_core::LsError;
use ls_network::NetworkError;
use ls_signal::SignalError;
use ls_vehicle::VehicleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match vehicle count {expected}")]
    VehicleCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] LsError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("vehicle error: {0}")]
    Vehicle(#[from] VehicleError),
}

pub type SimResult<T> = Result<T, SimError>;
