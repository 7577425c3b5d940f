use crate::api::ProfileClient;
use crate::reducer::{Action, Effect};
use crate::state::{BadgeState, TimerId};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::debug;

/// Executes the effect picked by the reducer. Owns the real timer task; the
/// reducer only ever sees the opaque `TimerId` mirror. Every dispatch goes
/// back through the action queue, so the reducer is never re-entered from
/// inside an effect.
pub struct EffectRunner {
    client: ProfileClient,
    tx: UnboundedSender<Action>,
    timer: Option<(TimerId, JoinHandle<()>)>,
    next_timer_id: u64,
}

impl EffectRunner {
    pub fn new(client: ProfileClient, tx: UnboundedSender<Action>) -> Self {
        Self {
            client,
            tx,
            timer: None,
            next_timer_id: 0,
        }
    }

    pub fn run(&mut self, effect: Effect, state: &BadgeState) {
        match effect {
            Effect::None => {}
            Effect::FetchProfile => self.fetch_profile(state),
            Effect::StartTimer => {
                if self.timer.is_none() {
                    let id = self.spawn_timer(state.duration);
                    self.dispatch(Action::TimerHandleUpdated(Some(id)));
                }
            }
            Effect::StopTimer => {
                if let Some((_, handle)) = self.timer.take() {
                    handle.abort();
                    self.dispatch(Action::TimerHandleUpdated(None));
                }
            }
            Effect::RestartTimer => {
                if let Some((_, handle)) = self.timer.take() {
                    handle.abort();
                }
                let id = self.spawn_timer(state.duration);
                self.dispatch(Action::TimerHandleUpdated(Some(id)));
            }
        }
    }

    /// Cancels the timer without dispatching; used when the widget is torn
    /// down and the queue is already gone.
    pub fn shutdown(&mut self) {
        if let Some((_, handle)) = self.timer.take() {
            handle.abort();
        }
    }

    fn fetch_profile(&self, state: &BadgeState) {
        let client = self.client.clone();
        let slug = state.slug.clone();
        let seq = state.fetch_seq;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match client.fetch_profile(&slug).await {
                Ok(data) => Action::FetchSucceeded { seq, data },
                Err(error) => Action::FetchFailed { seq, error },
            };
            let _ = tx.send(action);
        });
    }

    fn spawn_timer(&mut self, duration: Duration) -> TimerId {
        self.next_timer_id += 1;
        let id = TimerId(self.next_timer_id);
        let tx = self.tx.clone();
        debug!(id = id.0, ?duration, "starting rotation timer");
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(duration);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Action::NextStepWanted).is_err() {
                    break;
                }
            }
        });
        self.timer = Some((id, handle));
        id
    }

    fn dispatch(&self, action: Action) {
        let _ = self.tx.send(action);
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.shutdown();
    }
}
