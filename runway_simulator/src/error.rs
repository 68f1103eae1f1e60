use std::io;

use runway_control::error::{ScheduleError, SimulationError};
use thiserror::Error;

pub(crate) type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub(crate) enum ApplicationError {
    #[error("System input/output error: {0}")]
    IoError(#[from] io::Error),
    #[error("Failed to load schedule: {0}")]
    ScheduleError(#[from] ScheduleError),
    #[error("Simulation failed: {0}")]
    SimulationError(#[from] SimulationError),
}
