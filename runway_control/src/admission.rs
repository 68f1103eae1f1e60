use std::time::Duration;

use tracing::{debug, warn};

use crate::{
    aircraft::{AircraftClass, AircraftRequest, Direction},
    events::RunwayEvent,
    rules::EMERGENCY_TIMEOUT,
    runway::Runway,
};

/// Proof that an aircraft holds a slot on the runway. Consumed by
/// [`Runway::leave`].
#[derive(Debug)]
#[must_use = "an admitted aircraft has to leave the runway"]
pub struct Clearance {
    pub id: usize,
    pub class: AircraftClass,
    pub direction: Direction,
    pub waited: Duration,
}

impl Runway {
    /// Blocks until `request` may use the runway and occupies a slot for it.
    ///
    /// Commercial traffic needs the runway pointing north, cargo south;
    /// emergencies take either direction. Nobody gets in while the runway is
    /// full, a direction switch or controller break is running, or a break is
    /// due. Same-class waiters are not served in arrival order.
    #[tracing::instrument(skip(self, request), fields(id = request.id, class = %request.class))]
    pub async fn enter(&self, request: &AircraftRequest) -> Clearance {
        let class = request.class;
        self.with_lock(|state| state.register_waiting(class)).await;
        debug!("waiting for runway");

        let (direction, waited) = self
            .wait_until(|state| {
                if state.blocks(class) {
                    return None;
                }
                state.admit(class);
                let waited = request.waited();
                self.emit(RunwayEvent::AircraftAdmitted {
                    id: request.id,
                    class,
                    fuel_reserve: request.fuel_reserve,
                    direction: state.direction,
                    waited,
                });
                Some((state.direction, waited))
            })
            .await;

        debug!(%direction, ?waited, "admitted");
        self.check_waiting_limits(request, waited);

        Clearance {
            id: request.id,
            class,
            direction,
            waited,
        }
    }

    /// Frees the slot held by `clearance`. Never waits for anything but the lock.
    pub async fn leave(&self, clearance: Clearance) {
        self.with_lock(|state| {
            state.release(clearance.class);
            self.emit(RunwayEvent::AircraftDeparted {
                id: clearance.id,
                class: clearance.class,
            });
        })
        .await;
        debug!(id = clearance.id, class = %clearance.class, "cleared the runway");
    }

    fn check_waiting_limits(&self, request: &AircraftRequest, waited: Duration) {
        if request.class == AircraftClass::Emergency && waited > EMERGENCY_TIMEOUT {
            warn!(
                id = request.id,
                ?waited,
                "emergency aircraft waited longer than {}s",
                EMERGENCY_TIMEOUT.as_secs()
            );
            self.emit(RunwayEvent::EmergencyTimeoutExceeded {
                id: request.id,
                waited,
            });
        }
        if waited > request.fuel_reserve {
            warn!(
                id = request.id,
                class = %request.class,
                ?waited,
                fuel_reserve = ?request.fuel_reserve,
                "aircraft ran through its fuel reserve while waiting"
            );
            self.emit(RunwayEvent::FuelReserveExhausted {
                id: request.id,
                class: request.class,
                fuel_reserve: request.fuel_reserve,
                waited,
            });
        }
    }
}
