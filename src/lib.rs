pub mod api;
pub mod effects;
pub mod errors;
pub mod i18n;
pub mod models;
pub mod reducer;
pub mod registry;
pub mod state;
pub mod ui;
pub mod widget;

pub use api::ProfileClient;
pub use errors::{FetchError, FetchErrorKind, RegistryError};
pub use i18n::Lang;
pub use models::ProfileData;
pub use reducer::{Action, Effect, reduce};
pub use state::{BadgeState, Profile, STEP_COUNT};
pub use widget::{BadgeConfig, BadgeHandle, NullSink, RenderPolicy, RenderUpdate, mount};
