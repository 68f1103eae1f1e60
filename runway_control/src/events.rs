//! Events reported by the runway core.
//!
//! The core only emits; presentation is up to the [`EventSink`] (the simulator
//! prints them, tests record them). Events describing a change of runway state
//! are emitted while the runway lock is held, so sinks see them in the order
//! the core applied them.

use std::{fmt, time::Duration};

use jiff::Timestamp;

use crate::aircraft::{AircraftClass, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunwayEvent {
    ControllerOnDuty,
    ControllerOffDuty,
    AircraftArrived {
        id: usize,
        class: AircraftClass,
        fuel_reserve: Duration,
        at: Timestamp,
    },
    AircraftAdmitted {
        id: usize,
        class: AircraftClass,
        fuel_reserve: Duration,
        direction: Direction,
        waited: Duration,
    },
    RunwayOperationsStarted {
        id: usize,
        class: AircraftClass,
        duration: Duration,
    },
    RunwayOperationsCompleted {
        id: usize,
        class: AircraftClass,
    },
    AircraftDeparted {
        id: usize,
        class: AircraftClass,
    },
    DirectionSwitchStarted {
        from: Direction,
        to: Direction,
    },
    DirectionSwitched {
        direction: Direction,
    },
    ControllerBreakStarted,
    ControllerBreakEnded,
    EmergencyTimeoutExceeded {
        id: usize,
        waited: Duration,
    },
    FuelReserveExhausted {
        id: usize,
        class: AircraftClass,
        fuel_reserve: Duration,
        waited: Duration,
    },
}

impl fmt::Display for RunwayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ControllerOnDuty => write!(
                f,
                "The air traffic controller arrived and is beginning operations"
            ),
            Self::ControllerOffDuty => write!(f, "The air traffic controller is going home"),
            Self::AircraftArrived {
                id,
                class,
                fuel_reserve,
                at,
            } => write!(
                f,
                "{class} aircraft {id} (fuel: {}s) arrived at {at:.0}",
                fuel_reserve.as_secs()
            ),
            Self::AircraftAdmitted {
                id,
                class,
                fuel_reserve,
                direction,
                ..
            } => write!(
                f,
                "{class} aircraft {id} (fuel: {}s) is now on the runway (direction: {direction})",
                fuel_reserve.as_secs()
            ),
            Self::RunwayOperationsStarted {
                id,
                class,
                duration,
            } => write!(
                f,
                "{class} aircraft {id} begins runway operations for {} seconds",
                duration.as_secs()
            ),
            Self::RunwayOperationsCompleted { id, class } => write!(
                f,
                "{class} aircraft {id} completes runway operations and prepares to depart"
            ),
            Self::AircraftDeparted { id, class } => {
                write!(f, "{class} aircraft {id} has cleared the runway")
            }
            Self::DirectionSwitchStarted { from, to } => {
                write!(f, "Switching runway direction from {from} to {to}")
            }
            Self::DirectionSwitched { direction } => {
                write!(f, "Runway direction switched to {direction}")
            }
            Self::ControllerBreakStarted => {
                write!(f, "The air traffic controller is taking a break now.")
            }
            Self::ControllerBreakEnded => {
                write!(f, "The air traffic controller is back from break")
            }
            Self::EmergencyTimeoutExceeded { id, waited } => write!(
                f,
                "EMERGENCY aircraft {id} waited {:.1}s for the runway, over the emergency timeout",
                waited.as_secs_f64()
            ),
            Self::FuelReserveExhausted {
                id,
                class,
                fuel_reserve,
                waited,
            } => write!(
                f,
                "{class} aircraft {id} waited {:.1}s with only {}s of fuel reserve",
                waited.as_secs_f64(),
                fuel_reserve.as_secs()
            ),
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: RunwayEvent);
}

/// Discards every event.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&self, _event: RunwayEvent) {}
}
