use crate::{
    aircraft::{AircraftClass, Direction},
    error::InvariantViolation,
    rules::{CONTROLLER_LIMIT, DIRECTION_LIMIT, RUNWAY_CAPACITY},
};

/// Everything the aircraft and the controller coordinate on.
///
/// Only ever touched through [`crate::runway::Runway`], which owns the lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunwayState {
    pub occupants_total: u32,
    pub occupants_commercial: u32,
    pub occupants_cargo: u32,
    pub occupants_emergency: u32,
    pub direction: Direction,
    /// Admissions in `direction` since the last switch.
    pub consecutive_same_direction: u32,
    pub waiting_commercial: u32,
    pub waiting_cargo: u32,
    pub since_last_break: u32,
    pub controller_on_break: bool,
    pub switch_in_progress: bool,
}

impl RunwayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants_total == 0
    }

    pub fn break_due(&self) -> bool {
        self.since_last_break >= CONTROLLER_LIMIT
    }

    pub fn direction_quota_spent(&self) -> bool {
        self.consecutive_same_direction >= DIRECTION_LIMIT
    }

    /// Someone is waiting for the direction the runway is not in.
    pub fn cross_direction_demand(&self) -> bool {
        match self.direction {
            Direction::North => self.waiting_cargo > 0,
            Direction::South => self.waiting_commercial > 0,
        }
    }

    /// Someone is waiting for the direction the runway is in.
    pub fn same_direction_demand(&self) -> bool {
        match self.direction {
            Direction::North => self.waiting_commercial > 0,
            Direction::South => self.waiting_cargo > 0,
        }
    }

    /// A fresh direction is held until it has served an aircraft or nobody
    /// is waiting for it, so two-way demand cannot flip the runway forever.
    pub fn switch_due(&self) -> bool {
        if self.direction_quota_spent() {
            return true;
        }
        let direction_served =
            self.consecutive_same_direction > 0 || !self.same_direction_demand();
        self.is_empty() && self.cross_direction_demand() && direction_served
    }

    /// Whether an aircraft of `class` has to keep waiting.
    pub fn blocks(&self, class: AircraftClass) -> bool {
        let gated = self.occupants_total >= RUNWAY_CAPACITY
            || self.switch_in_progress
            || self.controller_on_break
            || self.break_due();
        match class.required_direction() {
            Some(direction) => {
                gated || self.direction != direction || self.direction_quota_spent()
            }
            None => gated,
        }
    }

    pub(crate) fn register_waiting(&mut self, class: AircraftClass) {
        if let Some(waiting) = self.waiting_mut(class) {
            *waiting += 1;
        }
    }

    pub(crate) fn admit(&mut self, class: AircraftClass) {
        if let Some(waiting) = self.waiting_mut(class) {
            let Some(left) = waiting.checked_sub(1) else {
                unreachable!("{class} aircraft admitted without waiting first");
            };
            *waiting = left;
        }
        *self.occupants_mut(class) += 1;
        self.occupants_total += 1;
        self.consecutive_same_direction += 1;
        self.since_last_break += 1;
    }

    pub(crate) fn release(&mut self, class: AircraftClass) {
        let occupants = self.occupants_mut(class);
        let Some(left) = occupants.checked_sub(1) else {
            unreachable!("{class} aircraft left a runway it was not on");
        };
        *occupants = left;
        self.occupants_total -= 1;
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let sum = self.occupants_commercial + self.occupants_cargo + self.occupants_emergency;
        if sum != self.occupants_total {
            return Err(InvariantViolation::OccupantMismatch {
                total: self.occupants_total,
                commercial: self.occupants_commercial,
                cargo: self.occupants_cargo,
                emergency: self.occupants_emergency,
            });
        }
        if self.occupants_total > RUNWAY_CAPACITY {
            return Err(InvariantViolation::CapacityExceeded {
                total: self.occupants_total,
            });
        }
        if self.occupants_commercial > 0 && self.occupants_cargo > 0 {
            return Err(InvariantViolation::MixedTraffic {
                commercial: self.occupants_commercial,
                cargo: self.occupants_cargo,
            });
        }
        if self.since_last_break > CONTROLLER_LIMIT {
            return Err(InvariantViolation::ControllerOverworked {
                since_last_break: self.since_last_break,
            });
        }
        if self.switch_in_progress && !self.is_empty() {
            return Err(InvariantViolation::OccupiedDuringSwitch {
                total: self.occupants_total,
            });
        }
        Ok(())
    }

    fn occupants_mut(&mut self, class: AircraftClass) -> &mut u32 {
        match class {
            AircraftClass::Commercial => &mut self.occupants_commercial,
            AircraftClass::Cargo => &mut self.occupants_cargo,
            AircraftClass::Emergency => &mut self.occupants_emergency,
        }
    }

    fn waiting_mut(&mut self, class: AircraftClass) -> Option<&mut u32> {
        match class {
            AircraftClass::Commercial => Some(&mut self.waiting_commercial),
            AircraftClass::Cargo => Some(&mut self.waiting_cargo),
            AircraftClass::Emergency => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::aircraft::AircraftClass::{Cargo, Commercial, Emergency};

    fn admitted(classes: &[AircraftClass]) -> RunwayState {
        let mut state = RunwayState::new();
        for &class in classes {
            state.register_waiting(class);
            state.admit(class);
        }
        state
    }

    #[test]
    fn test_initial_state() {
        let state = RunwayState::new();
        assert_eq!(state.direction, Direction::North);
        assert!(state.is_empty());
        assert!(state.check_invariants().is_ok());
        assert!(!state.blocks(Commercial));
        assert!(state.blocks(Cargo));
        assert!(!state.blocks(Emergency));
    }

    #[test]
    fn test_capacity_blocks_every_class() {
        let state = admitted(&[Commercial, Emergency]);
        assert_eq!(state.occupants_total, 2);
        assert!(state.blocks(Commercial));
        assert!(state.blocks(Cargo));
        assert!(state.blocks(Emergency));
    }

    #[test]
    fn test_direction_binds_commercial_and_cargo_only() {
        let mut state = RunwayState::new();
        state.direction = Direction::South;
        assert!(state.blocks(Commercial));
        assert!(!state.blocks(Cargo));
        assert!(!state.blocks(Emergency));
    }

    #[test]
    fn test_controller_flags_block_every_class() {
        let mut state = RunwayState::new();
        state.switch_in_progress = true;
        assert!(AircraftClass::ALL.iter().all(|&c| state.blocks(c)));

        let mut state = RunwayState::new();
        state.controller_on_break = true;
        assert!(AircraftClass::ALL.iter().all(|&c| state.blocks(c)));
    }

    #[test]
    fn test_spent_direction_quota_only_lets_emergencies_through() {
        let mut state = admitted(&[Commercial, Commercial, Commercial]);
        state.release(Commercial);
        state.release(Commercial);
        assert!(state.direction_quota_spent());
        assert!(state.switch_due());
        assert!(state.blocks(Commercial));
        assert!(!state.blocks(Emergency));
    }

    #[test]
    fn test_due_break_blocks_every_class() {
        let mut state = RunwayState::new();
        state.since_last_break = CONTROLLER_LIMIT;
        assert!(state.break_due());
        assert!(AircraftClass::ALL.iter().all(|&c| state.blocks(c)));
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_admit_and_release_bookkeeping() {
        let mut state = RunwayState::new();
        state.register_waiting(Commercial);
        state.register_waiting(Commercial);
        assert_eq!(state.waiting_commercial, 2);

        state.admit(Commercial);
        assert_eq!(state.waiting_commercial, 1);
        assert_eq!(state.occupants_total, 1);
        assert_eq!(state.occupants_commercial, 1);
        assert_eq!(state.consecutive_same_direction, 1);
        assert_eq!(state.since_last_break, 1);

        state.release(Commercial);
        assert!(state.is_empty());
        assert_eq!(state.consecutive_same_direction, 1);
        assert_eq!(state.since_last_break, 1);
    }

    #[test]
    fn test_cross_direction_demand_needs_empty_runway_to_trigger_switch() {
        let mut state = admitted(&[Commercial]);
        state.register_waiting(Cargo);
        assert!(state.cross_direction_demand());
        assert!(!state.switch_due());
        state.release(Commercial);
        assert!(state.switch_due());
    }

    #[test]
    fn test_fresh_direction_is_held_while_its_traffic_waits() {
        let mut state = RunwayState {
            direction: Direction::South,
            waiting_commercial: 2,
            waiting_cargo: 1,
            ..RunwayState::new()
        };
        assert!(state.cross_direction_demand());
        assert!(state.same_direction_demand());
        assert!(!state.switch_due());

        state.admit(Cargo);
        state.release(Cargo);
        assert!(state.switch_due());
    }

    #[test]
    fn test_fresh_direction_nobody_wants_is_switched_back() {
        let state = RunwayState {
            direction: Direction::South,
            waiting_commercial: 1,
            ..RunwayState::new()
        };
        assert!(!state.same_direction_demand());
        assert!(state.switch_due());
    }

    #[test]
    fn test_invariant_violations_are_detected() {
        let mut state = admitted(&[Commercial]);
        state.occupants_cargo = 1;
        state.occupants_total = 2;
        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::MixedTraffic {
                commercial: 1,
                cargo: 1
            })
        );

        let mut state = admitted(&[Emergency, Emergency]);
        state.occupants_emergency = 3;
        state.occupants_total = 3;
        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::CapacityExceeded { total: 3 })
        );

        let mut state = admitted(&[Emergency]);
        state.occupants_total = 2;
        assert!(matches!(
            state.check_invariants(),
            Err(InvariantViolation::OccupantMismatch { .. })
        ));

        let mut state = admitted(&[Emergency]);
        state.switch_in_progress = true;
        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::OccupiedDuringSwitch { total: 1 })
        );
    }
}
