use std::{fmt, time::Duration};

use jiff::Timestamp;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AircraftClass {
    Commercial,
    Cargo,
    Emergency,
}

impl AircraftClass {
    pub const ALL: [AircraftClass; 3] = [Self::Commercial, Self::Cargo, Self::Emergency];

    /// Maps the numeric type code used in schedule files.
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Commercial),
            1 => Some(Self::Cargo),
            2 => Some(Self::Emergency),
            _ => None,
        }
    }

    /// The direction this class is bound to, `None` for emergencies.
    pub const fn required_direction(self) -> Option<Direction> {
        match self {
            Self::Commercial => Some(Direction::North),
            Self::Cargo => Some(Direction::South),
            Self::Emergency => None,
        }
    }
}

impl fmt::Display for AircraftClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Commercial => "Commercial",
            Self::Cargo => "Cargo",
            Self::Emergency => "EMERGENCY",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    North,
    South,
}

impl Direction {
    pub const fn reversed(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::North => "NORTH",
            Self::South => "SOUTH",
        })
    }
}

/// One parsed line of a schedule file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub class: AircraftClass,
    /// Delay after the previous aircraft was released.
    pub arrival_delay: Duration,
    pub runway_time: Duration,
    pub fuel_reserve: Duration,
}

/// An aircraft that has arrived and asks for the runway.
#[derive(Debug, Clone)]
pub struct AircraftRequest {
    pub id: usize,
    pub class: AircraftClass,
    pub arrival_delay: Duration,
    pub service_duration: Duration,
    pub fuel_reserve: Duration,
    pub arrival_timestamp: Timestamp,
    pub(crate) arrived_at: Instant,
}

impl AircraftRequest {
    pub fn arrive(id: usize, entry: &ScheduleEntry) -> Self {
        Self {
            id,
            class: entry.class,
            arrival_delay: entry.arrival_delay,
            service_duration: entry.runway_time,
            fuel_reserve: entry.fuel_reserve,
            arrival_timestamp: Timestamp::now(),
            arrived_at: Instant::now(),
        }
    }

    pub fn waited(&self) -> Duration {
        self.arrived_at.elapsed()
    }
}
