use crate::errors::RegistryError;
use crate::widget::{BadgeConfig, BadgeHandle, RenderSink, mount};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

static REGISTRY: Lazy<Mutex<HashMap<String, BadgeConfig>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Registers default badge configuration under a tag name. Meant to be called
/// once by the hosting application at startup; registering the same tag twice
/// is an error.
pub fn register(tag: impl Into<String>, config: BadgeConfig) -> Result<(), RegistryError> {
    let tag = tag.into();
    let mut registry = REGISTRY.lock().expect("badge registry poisoned");
    if registry.contains_key(&tag) {
        return Err(RegistryError::DuplicateTag(tag));
    }
    registry.insert(tag, config);
    Ok(())
}

pub fn is_registered(tag: &str) -> bool {
    REGISTRY
        .lock()
        .expect("badge registry poisoned")
        .contains_key(tag)
}

/// Mounts a badge with the defaults registered for `tag`, or `None` if the
/// tag is unknown. Must be called from within a tokio runtime.
pub fn create<S: RenderSink>(tag: &str, sink: S) -> Option<BadgeHandle> {
    let config = REGISTRY
        .lock()
        .expect("badge registry poisoned")
        .get(tag)
        .cloned()?;
    Some(mount(config, sink))
}
