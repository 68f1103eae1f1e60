//! The air traffic controller.
//!
//! A single task that watches the runway and, when needed, closes it to
//! reverse direction or to take a break. It reacts to every committed change
//! and falls back to re-evaluating every [`CONTROLLER_POLL_INTERVAL`].

use std::{pin::pin, sync::Arc};

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    aircraft::Direction,
    events::RunwayEvent,
    rules::{CONTROLLER_BREAK_TIME, CONTROLLER_POLL_INTERVAL, DIRECTION_SWITCH_TIME},
    runway::Runway,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerPhase {
    #[default]
    Monitoring,
    Switching,
    OnBreak,
}

/// What the controller did before it was sent home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShiftSummary {
    pub direction_switches: u32,
    pub breaks_taken: u32,
    pub final_phase: ControllerPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControllerAction {
    TakeBreak,
    SwitchDirection { from: Direction, to: Direction },
}

pub struct Controller {
    runway: Arc<Runway>,
    phase: ControllerPhase,
    summary: ShiftSummary,
}

impl Controller {
    pub fn new(runway: Arc<Runway>) -> Self {
        Self {
            runway,
            phase: ControllerPhase::Monitoring,
            summary: ShiftSummary::default(),
        }
    }

    /// Runs until `shutdown` is cancelled.
    ///
    /// Cancellation is only observed while monitoring, so a break or switch in
    /// progress always completes and the runway is never left closed.
    pub async fn run(mut self, shutdown: CancellationToken) -> ShiftSummary {
        info!("controller on duty");
        self.runway.emit(RunwayEvent::ControllerOnDuty);
        let runway = self.runway.clone();

        while !shutdown.is_cancelled() {
            let mut changed = pin!(runway.changed());
            changed.as_mut().enable();

            match self.next_action().await {
                Some(ControllerAction::TakeBreak) => self.take_break().await,
                Some(ControllerAction::SwitchDirection { from, to }) => {
                    self.switch_direction(from, to).await
                }
                None => {
                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => break,
                        _ = changed => {}
                        _ = sleep(CONTROLLER_POLL_INTERVAL) => {}
                    }
                }
            }
        }

        info!(
            switches = self.summary.direction_switches,
            breaks = self.summary.breaks_taken,
            "controller off duty"
        );
        self.runway.emit(RunwayEvent::ControllerOffDuty);
        self.summary.final_phase = self.phase;
        self.summary
    }

    /// Decides on and closes the runway for the next action, if any.
    ///
    /// A due break wins over a switch. A switch only starts on an empty
    /// runway; until then the spent direction quota keeps new traffic out.
    async fn next_action(&self) -> Option<ControllerAction> {
        let runway = &self.runway;
        runway
            .try_with_lock(|state| {
                if state.break_due() {
                    state.controller_on_break = true;
                    return Some(ControllerAction::TakeBreak);
                }
                if state.switch_due() && state.is_empty() {
                    let from = state.direction;
                    let to = from.reversed();
                    state.switch_in_progress = true;
                    runway.emit(RunwayEvent::DirectionSwitchStarted { from, to });
                    return Some(ControllerAction::SwitchDirection { from, to });
                }
                None
            })
            .await
    }

    async fn take_break(&mut self) {
        self.transition(ControllerPhase::OnBreak);
        let runway = self.runway.clone();

        runway
            .wait_until(|state| {
                if !state.is_empty() {
                    return None;
                }
                runway.emit(RunwayEvent::ControllerBreakStarted);
                Some(())
            })
            .await;
        info!("controller taking a break");
        sleep(CONTROLLER_BREAK_TIME).await;

        runway
            .with_lock(|state| {
                assert!(
                    state.is_empty(),
                    "aircraft admitted during a controller break: {state:?}"
                );
                state.controller_on_break = false;
                state.since_last_break = 0;
                runway.emit(RunwayEvent::ControllerBreakEnded);
            })
            .await;
        info!("controller back from break");
        self.summary.breaks_taken += 1;
        self.transition(ControllerPhase::Monitoring);
    }

    async fn switch_direction(&mut self, from: Direction, to: Direction) {
        self.transition(ControllerPhase::Switching);
        info!(%from, %to, "switching runway direction");
        sleep(DIRECTION_SWITCH_TIME).await;

        let runway = self.runway.clone();
        runway
            .with_lock(|state| {
                state.direction = to;
                state.consecutive_same_direction = 0;
                state.switch_in_progress = false;
                runway.emit(RunwayEvent::DirectionSwitched { direction: to });
            })
            .await;
        info!(direction = %to, "runway direction switched");
        self.summary.direction_switches += 1;
        self.transition(ControllerPhase::Monitoring);
    }

    fn transition(&mut self, next: ControllerPhase) {
        debug!(from = ?self.phase, to = ?next, "controller phase change");
        self.phase = next;
    }
}
