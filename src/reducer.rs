use crate::errors::FetchError;
use crate::i18n::Lang;
use crate::models::ProfileData;
use crate::state::{BadgeState, FetchSeq, Profile, STEP_COUNT, TimerId};
use std::time::Duration;

/// Everything that can happen to a badge. Fetch completions carry the seq
/// they were spawned with so stale responses can be discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Init {
        slug: Option<String>,
        lang: Option<Lang>,
        duration: Option<Duration>,
    },
    FetchSucceeded {
        seq: FetchSeq,
        data: ProfileData,
    },
    FetchFailed {
        seq: FetchSeq,
        error: FetchError,
    },
    TimerHandleUpdated(Option<TimerId>),
    NextStepWanted,
    LangUpdated(Lang),
    SlugUpdated(String),
    DurationUpdated(Duration),
    Connected,
    Disconnected,
}

/// The single side effect a transition may request. The reducer only picks
/// one; the `EffectRunner` performs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    FetchProfile,
    StartTimer,
    StopTimer,
    RestartTimer,
}

/// State transition function. Total and side-effect free; mutates the state
/// in place and returns the effect to run against the new state.
pub fn reduce(state: &mut BadgeState, action: Action) -> Effect {
    match action {
        Action::Init {
            slug,
            lang,
            duration,
        } => {
            if let Some(slug) = slug {
                state.slug = slug;
            }
            if let Some(lang) = lang {
                state.lang = lang;
            }
            if let Some(duration) = duration.filter(|d| !d.is_zero()) {
                state.duration = duration;
            }
            state.profile = Profile::Loading;
            state.fetch_seq.bump();
            Effect::FetchProfile
        }
        Action::FetchSucceeded { seq, data } => {
            if seq != state.fetch_seq {
                return Effect::None;
            }
            state.profile = Profile::Loaded(data);
            if state.connected {
                Effect::StartTimer
            } else {
                Effect::None
            }
        }
        Action::FetchFailed { seq, error } => {
            if seq != state.fetch_seq {
                return Effect::None;
            }
            state.profile = Profile::Failed(error);
            Effect::StopTimer
        }
        Action::TimerHandleUpdated(timer) => {
            state.timer = timer;
            Effect::None
        }
        Action::NextStepWanted => {
            state.step = (state.step + 1) % STEP_COUNT;
            Effect::None
        }
        Action::LangUpdated(lang) => {
            state.lang = lang;
            Effect::None
        }
        Action::SlugUpdated(slug) => {
            state.slug = slug;
            state.profile = Profile::Loading;
            state.fetch_seq.bump();
            Effect::FetchProfile
        }
        Action::DurationUpdated(duration) => {
            if duration.is_zero() {
                return Effect::None;
            }
            state.duration = duration;
            Effect::RestartTimer
        }
        Action::Connected => {
            state.connected = true;
            if state.profile.is_loaded() {
                Effect::StartTimer
            } else {
                Effect::None
            }
        }
        Action::Disconnected => {
            state.connected = false;
            Effect::StopTimer
        }
    }
}
