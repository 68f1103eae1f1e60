use std::{sync::Arc, time::Duration};

use futures::future::try_join_all;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::{
    aircraft::{AircraftClass, AircraftRequest, Direction, ScheduleEntry},
    controller::{Controller, ShiftSummary},
    error::{SimulationError, SimulationResult},
    events::{EventSink, RunwayEvent},
    runway::Runway,
    state::RunwayState,
};

/// One aircraft that made it through the runway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub id: usize,
    pub class: AircraftClass,
    pub fuel_reserve: Duration,
    pub direction: Direction,
    pub waited: Duration,
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Ordered by aircraft id.
    pub departures: Vec<Departure>,
    pub controller: ShiftSummary,
    pub final_state: RunwayState,
}

/// Releases a schedule onto a runway watched by one controller.
pub struct Simulation {
    runway: Arc<Runway>,
}

impl Simulation {
    pub fn new(events: Arc<dyn EventSink>) -> Self {
        Self {
            runway: Arc::new(Runway::new(events)),
        }
    }

    pub fn runway(&self) -> &Arc<Runway> {
        &self.runway
    }

    /// Runs every aircraft of `schedule` to completion, then sends the
    /// controller home.
    ///
    /// Each arrival delay is awaited before the aircraft is released, so the
    /// delays add up one after the other.
    pub async fn run(&self, schedule: &[ScheduleEntry]) -> SimulationResult<SimulationReport> {
        info!(aircraft = schedule.len(), "starting runway simulation");
        let shutdown = CancellationToken::new();
        let controller = tokio::spawn(Controller::new(self.runway.clone()).run(shutdown.clone()));

        let mut aircraft = Vec::with_capacity(schedule.len());
        for (id, entry) in schedule.iter().enumerate() {
            if !entry.arrival_delay.is_zero() {
                sleep(entry.arrival_delay).await;
            }
            let request = AircraftRequest::arrive(id, entry);
            aircraft.push(tokio::spawn(fly(self.runway.clone(), request)));
        }

        let departures = match try_join_all(aircraft).await {
            Ok(departures) => departures,
            Err(e) => {
                error!("aircraft task failed, stopping the controller: {e}");
                controller.abort();
                return Err(SimulationError::AircraftTask(e));
            }
        };

        shutdown.cancel();
        let controller = controller.await.map_err(SimulationError::ControllerTask)?;
        info!("runway simulation done");

        Ok(SimulationReport {
            departures,
            controller,
            final_state: self.runway.snapshot().await,
        })
    }
}

async fn fly(runway: Arc<Runway>, request: AircraftRequest) -> Departure {
    let (id, class) = (request.id, request.class);
    runway.emit(RunwayEvent::AircraftArrived {
        id,
        class,
        fuel_reserve: request.fuel_reserve,
        at: request.arrival_timestamp,
    });

    let clearance = runway.enter(&request).await;
    let departure = Departure {
        id,
        class,
        fuel_reserve: request.fuel_reserve,
        direction: clearance.direction,
        waited: clearance.waited,
    };

    runway.emit(RunwayEvent::RunwayOperationsStarted {
        id,
        class,
        duration: request.service_duration,
    });
    sleep(request.service_duration).await;
    runway.emit(RunwayEvent::RunwayOperationsCompleted { id, class });

    runway.leave(clearance).await;
    departure
}
