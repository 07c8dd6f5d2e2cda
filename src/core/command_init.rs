//! Centralized initialization shared by every command.
//!
//! This module provides [`CommandInit`] which loads the configuration, opens the
//! key-value store under the data directory and prepares the typed views on top
//! of it, so that commands only deal with their own logic.
//!
//! # Public API
//! - [`CommandInit`]: Main initializer with static methods
//! - [`CommandContext`]: Initialized context containing all required handles
//!
//! # Initialization Steps
//! 1. **Configuration**: Load `config.json`, creating it with defaults on first use
//! 2. **API override**: Apply the `--api-url` flag for this invocation only
//! 3. **Store**: Open the file store under `<data dir>/store`

use crate::core::{
    api::ApiClient,
    cache::PracticeCache,
    config::Config,
    credentials::Credentials,
    dirs::get_data_directory,
    error::Result,
    store::{FileStore, KeyValueStore},
};
use std::sync::Arc;

pub const STORE_DIRECTORY: &str = "store";

/// Everything a command needs to talk to the store and the API
pub struct CommandContext {
    pub config: Config,
    pub store: Arc<dyn KeyValueStore>,
}

impl CommandContext {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.store.clone())
    }

    pub fn cache(&self) -> PracticeCache {
        PracticeCache::new(self.store.clone())
    }

    /// Build an API client for the configured base URL
    pub fn api(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config.api_base_url)
    }
}

pub struct CommandInit;

impl CommandInit {
    /// Initialize everything needed for a command
    pub fn initialize(api_url: Option<String>) -> Result<CommandContext> {
        let config = Config::load_or_create()?.with_api_base_url(api_url);
        log::debug!("Using API at {}", config.api_base_url);

        let store_dir = get_data_directory()?.join(STORE_DIRECTORY);
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(store_dir)?);

        Ok(CommandContext { config, store })
    }
}
