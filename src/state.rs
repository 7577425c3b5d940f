use crate::errors::FetchError;
use crate::i18n::Lang;
use crate::models::ProfileData;
use std::time::Duration;

pub const STEP_COUNT: usize = 4;

pub const DEFAULT_SLUG: &str = "universe";
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// Opaque id mirroring the scheduler's real timer task. Present iff rotation
/// is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId(pub u64);

/// Generation stamp for in-flight fetches; completions carrying an older seq
/// are discarded by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchSeq(pub u64);

impl FetchSeq {
    pub fn bump(&mut self) -> FetchSeq {
        self.0 += 1;
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Profile {
    #[default]
    NotAsked,
    Loading,
    Loaded(ProfileData),
    Failed(FetchError),
}

impl Profile {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Profile::Loaded(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeState {
    pub slug: String,
    pub lang: Lang,
    pub duration: Duration,
    pub step: usize,
    pub timer: Option<TimerId>,
    pub connected: bool,
    pub profile: Profile,
    pub fetch_seq: FetchSeq,
}

impl Default for BadgeState {
    fn default() -> Self {
        Self {
            slug: DEFAULT_SLUG.to_string(),
            lang: Lang::En,
            duration: DEFAULT_DURATION,
            step: 0,
            timer: None,
            connected: false,
            profile: Profile::NotAsked,
            fetch_seq: FetchSeq::default(),
        }
    }
}
