use std::io;

use thiserror::Error;
use tokio::task::JoinError;

use crate::rules::{CONTROLLER_LIMIT, MAX_AIRCRAFT, RUNWAY_CAPACITY};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Failed to read schedule: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed schedule line {line}: '{content}'")]
    Malformed { line: usize, content: String },
    #[error("Unknown aircraft type {code} on schedule line {line}")]
    UnknownAircraftType { line: usize, code: u32 },
    #[error("Schedule contains no aircraft")]
    Empty,
    #[error("Schedule contains more than {MAX_AIRCRAFT} aircraft")]
    TooManyAircraft,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{total} aircraft on a runway with capacity {RUNWAY_CAPACITY}")]
    CapacityExceeded { total: u32 },
    #[error("occupant total {total} does not match per class counts {commercial}+{cargo}+{emergency}")]
    OccupantMismatch {
        total: u32,
        commercial: u32,
        cargo: u32,
        emergency: u32,
    },
    #[error("{commercial} commercial and {cargo} cargo aircraft share the runway")]
    MixedTraffic { commercial: u32, cargo: u32 },
    #[error("{since_last_break} admissions since the last break, limit is {CONTROLLER_LIMIT}")]
    ControllerOverworked { since_last_break: u32 },
    #[error("{total} aircraft on the runway during a direction switch")]
    OccupiedDuringSwitch { total: u32 },
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Aircraft task failed: {0}")]
    AircraftTask(#[source] JoinError),
    #[error("Controller task failed: {0}")]
    ControllerTask(#[source] JoinError),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
pub type SimulationResult<T> = Result<T, SimulationError>;
