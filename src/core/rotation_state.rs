use crate::core::error::Result;
use crate::core::store::KeyValueStore;
use std::sync::Arc;

pub const STORAGE_KEY_ENABLED: &str = "practice_menubar_enabled";

/// Persisted on/off switch for automatic rotation. Absent means enabled.
#[derive(Clone)]
pub struct RotationState {
    store: Arc<dyn KeyValueStore>,
}

impl RotationState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn enabled(&self) -> Result<bool> {
        let stored = self.store.get(STORAGE_KEY_ENABLED).await?;
        Ok(stored.map_or(true, |value| value == "true"))
    }

    pub async fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.store
            .set(STORAGE_KEY_ENABLED, if enabled { "true" } else { "false" })
            .await
    }
}
