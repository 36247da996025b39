use thiserror::Error;

/// Why an allocation request was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AllocationError {
    #[error("no free block can hold a request of size {requested}")]
    NoFit { requested: u32 },

    #[error("allocation size must be a positive integer")]
    InvalidSize,
}

/// Why a deallocation request was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeallocationError {
    #[error("process {0} has no allocated block")]
    NotFound(u32),
}

/// Why a simulation run was rejected before processing any reference.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SimulationError {
    #[error("frame capacity must be at least 1")]
    InvalidConfiguration,
}
