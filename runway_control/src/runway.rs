use std::{pin::pin, sync::Arc};

use tokio::sync::{Mutex, MutexGuard, Notify};

use crate::{
    events::{EventSink, NullEventSink, RunwayEvent},
    state::RunwayState,
};

/// The shared runway: one lock around [`RunwayState`] plus a notify-all.
///
/// Every committed mutation is checked against the runway invariants and then
/// wakes every parked waiter, which re-checks its own condition. A violated
/// invariant is a logic error and panics the task that caused it.
pub struct Runway {
    state: Mutex<RunwayState>,
    changed: Notify,
    events: Arc<dyn EventSink>,
}

impl Runway {
    pub fn new(events: Arc<dyn EventSink>) -> Self {
        Self {
            state: Mutex::new(RunwayState::new()),
            changed: Notify::new(),
            events,
        }
    }

    pub fn without_events() -> Self {
        Self::new(Arc::new(NullEventSink))
    }

    pub(crate) fn emit(&self, event: RunwayEvent) {
        self.events.emit(event);
    }

    /// Copy of the current state. Does not wake anyone.
    pub async fn snapshot(&self) -> RunwayState {
        self.state.lock().await.clone()
    }

    /// Mutates the state under the lock and wakes all waiters.
    pub async fn with_lock<R>(&self, mutate: impl FnOnce(&mut RunwayState) -> R) -> R {
        let mut state = self.state.lock().await;
        let outcome = mutate(&mut state);
        self.commit(state);
        outcome
    }

    /// Runs `attempt` under the lock and commits only when it returns `Some`.
    ///
    /// Returning `None` must leave the state untouched; nobody is woken.
    pub(crate) async fn try_with_lock<R>(
        &self,
        attempt: impl FnOnce(&mut RunwayState) -> Option<R>,
    ) -> Option<R> {
        let mut state = self.state.lock().await;
        let outcome = attempt(&mut state)?;
        self.commit(state);
        Some(outcome)
    }

    /// Parks until `attempt` returns `Some`, re-running it after every change.
    ///
    /// The waiter is registered before the lock is taken, so a change
    /// committed between the check and the park is never missed.
    pub(crate) async fn wait_until<R>(
        &self,
        mut attempt: impl FnMut(&mut RunwayState) -> Option<R>,
    ) -> R {
        loop {
            let mut notified = pin!(self.changed.notified());
            notified.as_mut().enable();
            if let Some(outcome) = self.try_with_lock(&mut attempt).await {
                return outcome;
            }
            notified.await;
        }
    }

    /// Resolves on the next committed change.
    pub(crate) fn changed(&self) -> tokio::sync::futures::Notified<'_> {
        self.changed.notified()
    }

    fn commit(&self, state: MutexGuard<'_, RunwayState>) {
        if let Err(violation) = state.check_invariants() {
            panic!("runway invariant violated: {violation}; state: {:?}", *state);
        }
        drop(state);
        self.changed.notify_waiters();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_with_lock_is_visible_in_snapshot() {
        let runway = Runway::without_events();
        runway.with_lock(|state| state.waiting_cargo = 2).await;
        assert_eq!(runway.snapshot().await.waiting_cargo, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_wakes_on_change() {
        let runway = Arc::new(Runway::without_events());
        let waiter = {
            let runway = runway.clone();
            tokio::spawn(async move {
                runway
                    .wait_until(|state| {
                        (state.waiting_commercial > 0).then_some(state.waiting_commercial)
                    })
                    .await
            })
        };

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!waiter.is_finished());

        runway.with_lock(|state| state.waiting_commercial = 1).await;
        assert_eq!(waiter.await.unwrap(), 1);
    }

    #[tokio::test]
    #[should_panic(expected = "runway invariant violated")]
    async fn test_commit_rejects_broken_invariant() {
        let runway = Runway::without_events();
        runway
            .with_lock(|state| {
                state.occupants_total = 3;
                state.occupants_emergency = 3;
            })
            .await;
    }
}
