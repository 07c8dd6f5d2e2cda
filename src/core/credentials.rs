use crate::core::error::{KotobatenError, Result};
use crate::core::store::KeyValueStore;
use std::sync::Arc;

pub const STORAGE_KEY_TOKEN: &str = "auth_token";

/// Bearer token kept in the shared store next to the practice cache.
#[derive(Clone)]
pub struct Credentials {
    store: Arc<dyn KeyValueStore>,
}

impl Credentials {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored token, if any. Blank values count as logged out.
    pub async fn token(&self) -> Result<Option<String>> {
        let token = self.store.get(STORAGE_KEY_TOKEN).await?;
        Ok(token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty()))
    }

    pub async fn save_token(&self, token: &str) -> Result<()> {
        self.store.set(STORAGE_KEY_TOKEN, token).await
    }

    pub async fn clear(&self) -> Result<()> {
        log::debug!("Removing stored token");
        self.store.remove(STORAGE_KEY_TOKEN).await
    }

    /// The token or [`KotobatenError::AuthRequired`].
    pub async fn require_token(&self) -> Result<String> {
        self.token().await?.ok_or(KotobatenError::AuthRequired)
    }

    /// Drop the stored token when the server rejected it, then pass the result on.
    pub async fn forget_if_rejected<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_auth_required() {
                log::warn!("Server rejected the stored token");
                if let Err(clear_err) = self.clear().await {
                    log::warn!("Failed to remove rejected token: {clear_err}");
                }
            }
        }
        result
    }
}
