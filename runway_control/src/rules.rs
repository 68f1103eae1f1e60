use std::time::Duration;

/// Number of aircraft that can use the runway simultaneously.
pub const RUNWAY_CAPACITY: u32 = 2;
/// Admissions the controller handles before a mandatory break.
pub const CONTROLLER_LIMIT: u32 = 8;
/// Largest schedule the simulation accepts.
pub const MAX_AIRCRAFT: usize = 1000;
/// Fuel reserve bounds in seconds, inclusive.
pub const FUEL_MIN: u64 = 20;
pub const FUEL_MAX: u64 = 60;
/// Maximum expected wait for an emergency aircraft.
pub const EMERGENCY_TIMEOUT: Duration = Duration::from_secs(30);
pub const DIRECTION_SWITCH_TIME: Duration = Duration::from_secs(5);
/// Consecutive admissions in one direction before a switch is forced.
pub const DIRECTION_LIMIT: u32 = 3;
pub const CONTROLLER_BREAK_TIME: Duration = Duration::from_secs(5);
/// How often the controller re-evaluates when nothing wakes it.
pub const CONTROLLER_POLL_INTERVAL: Duration = Duration::from_millis(100);
