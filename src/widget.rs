use crate::api::{DEFAULT_ORIGIN, ProfileClient};
use crate::effects::EffectRunner;
use crate::i18n::Lang;
use crate::reducer::{Action, reduce};
use crate::state::BadgeState;
use crate::ui;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// When to hand state changes to the render sink.
///
/// `Coalesced` drains every action already queued before rendering once, so a
/// burst of dispatches costs a single redraw. `Immediate` renders after every
/// action. State reflects all dispatched actions under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPolicy {
    #[default]
    Coalesced,
    Immediate,
}

#[derive(Debug, Clone)]
pub struct BadgeConfig {
    pub origin: String,
    pub slug: Option<String>,
    pub lang: Option<Lang>,
    pub duration: Option<Duration>,
    pub render_policy: RenderPolicy,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            slug: None,
            lang: None,
            duration: None,
            render_policy: RenderPolicy::default(),
        }
    }
}

impl BadgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn lang(mut self, lang: Lang) -> Self {
        self.lang = Some(lang);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn render_policy(mut self, policy: RenderPolicy) -> Self {
        self.render_policy = policy;
        self
    }
}

/// What the host should redraw. `Full` carries complete badge markup; `Step`
/// means only the visible frame changed and toggling `step--current` on the
/// pre-rendered frames is enough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderUpdate {
    Full(String),
    Step(usize),
}

pub trait RenderSink: Send + 'static {
    fn render(&mut self, update: RenderUpdate);
}

impl<F> RenderSink for F
where
    F: FnMut(RenderUpdate) + Send + 'static,
{
    fn render(&mut self, update: RenderUpdate) {
        self(update)
    }
}

/// A sink for hosts that do not care about renders.
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _update: RenderUpdate) {}
}

/// Handle to a mounted badge. Dropping the handle leaves the widget running;
/// call `close` to tear it down.
pub struct BadgeHandle {
    tx: UnboundedSender<Action>,
    state_rx: watch::Receiver<BadgeState>,
    task: JoinHandle<()>,
}

/// Mounts a badge: spawns the event loop that owns the state, and dispatches
/// `Init` so the first fetch starts right away. Every mounted badge is fully
/// independent of any other.
pub fn mount<S: RenderSink>(config: BadgeConfig, sink: S) -> BadgeHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let state = BadgeState::default();
    let (state_tx, state_rx) = watch::channel(state.clone());

    let init = Action::Init {
        slug: config.slug.clone(),
        lang: config.lang,
        duration: config.duration,
    };
    let _ = tx.send(init);

    let runner = EffectRunner::new(ProfileClient::new(config.origin.clone()), tx.clone());
    let task = tokio::spawn(run_loop(
        rx,
        state,
        state_tx,
        runner,
        config.render_policy,
        sink,
    ));

    BadgeHandle { tx, state_rx, task }
}

async fn run_loop<S: RenderSink>(
    mut rx: mpsc::UnboundedReceiver<Action>,
    mut state: BadgeState,
    state_tx: watch::Sender<BadgeState>,
    mut runner: EffectRunner,
    policy: RenderPolicy,
    mut sink: S,
) {
    while let Some(action) = rx.recv().await {
        let prev = state.clone();
        let mut batch = vec![action];
        if policy == RenderPolicy::Coalesced {
            while let Ok(next) = rx.try_recv() {
                batch.push(next);
            }
        }
        for action in batch {
            debug!(?action, "dispatching");
            let effect = reduce(&mut state, action);
            runner.run(effect, &state);
        }
        let _ = state_tx.send(state.clone());
        emit_render(&mut sink, &prev, &state);
    }
    runner.shutdown();
}

fn emit_render<S: RenderSink>(sink: &mut S, prev: &BadgeState, next: &BadgeState) {
    if prev.profile != next.profile || prev.lang != next.lang {
        sink.render(RenderUpdate::Full(ui::render_badge(next)));
    } else if next.profile.is_loaded() && prev.step != next.step {
        sink.render(RenderUpdate::Step(next.step));
    }
}

impl BadgeHandle {
    pub fn dispatch(&self, action: Action) {
        let _ = self.tx.send(action);
    }

    pub fn set_slug(&self, slug: impl Into<String>) {
        self.dispatch(Action::SlugUpdated(slug.into()));
    }

    pub fn set_lang(&self, lang: Lang) {
        self.dispatch(Action::LangUpdated(lang));
    }

    /// Attribute-style lang setter; unrecognized values fall back to English.
    pub fn set_lang_attr(&self, value: &str) {
        self.set_lang(Lang::parse(value));
    }

    pub fn set_duration(&self, duration: Duration) {
        self.dispatch(Action::DurationUpdated(duration));
    }

    /// Attribute-style duration setter, milliseconds as text. Non-numeric or
    /// zero values keep the prior duration.
    pub fn set_duration_attr(&self, value: &str) {
        match value.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => self.set_duration(Duration::from_millis(ms)),
            _ => {}
        }
    }

    pub fn connect(&self) {
        self.dispatch(Action::Connected);
    }

    pub fn disconnect(&self) {
        self.dispatch(Action::Disconnected);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> BadgeState {
        self.state_rx.borrow().clone()
    }

    /// Waits until the state satisfies the predicate and returns it. Resolves
    /// immediately if it already does.
    pub async fn wait_for<F>(&mut self, pred: F) -> BadgeState
    where
        F: Fn(&BadgeState) -> bool,
    {
        loop {
            let snapshot = self.state_rx.borrow_and_update().clone();
            if pred(&snapshot) {
                return snapshot;
            }
            if self.state_rx.changed().await.is_err() {
                return snapshot;
            }
        }
    }

    /// Tears the widget down: stops the event loop and any running timer. An
    /// in-flight fetch is left to resolve into a closed queue.
    pub fn close(self) {
        self.task.abort();
    }
}
