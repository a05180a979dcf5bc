//! User preferences persisted across sessions.
//!
//! Only one preference exists: whether decorative animations play. It is
//! stored as the string `"true"`/`"false"` and defaults to enabled.

mod store;

pub use store::LocalStore;

use crate::config::PreferenceKeys;
use crate::Result;
use std::path::PathBuf;
use tracing::info;

/// Typed view over the preference store.
#[derive(Debug)]
pub struct Preferences {
    store: LocalStore,
}

impl Preferences {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            store: LocalStore::open(path),
        }
    }

    pub fn from_store(store: LocalStore) -> Self {
        Self { store }
    }

    /// Absent means enabled; any stored value other than `"true"` is disabled.
    pub fn animations_enabled(&self) -> bool {
        match self.store.get_item(PreferenceKeys::ANIMATIONS_ENABLED) {
            None => true,
            Some(value) => value == "true",
        }
    }

    pub fn set_animations_enabled(&self, enabled: bool) -> Result<()> {
        self.store
            .set_item(PreferenceKeys::ANIMATIONS_ENABLED, &enabled.to_string())?;
        info!("Animations {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    /// Flip the preference and return the new value.
    pub fn toggle_animations(&self) -> Result<bool> {
        let enabled = !self.animations_enabled();
        self.set_animations_enabled(enabled)?;
        Ok(enabled)
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }
}
