use crate::core::dirs::get_config_directory;
use crate::core::error::KotobatenError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://kotobaten-api.fly.dev/";

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_cache_max_age_secs() -> u64 {
    3600
}

fn default_practice_fetch_count() -> u32 {
    60
}

fn default_rotation_interval_secs() -> u64 {
    60
}

fn default_poll_interval_ms() -> u64 {
    500
}

/// Timing and sizing knobs of the practice rotation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PracticeConfig {
    #[serde(default = "default_cache_max_age_secs")]
    pub cache_max_age_secs: u64,
    #[serde(default = "default_practice_fetch_count")]
    pub fetch_count: u32,
    #[serde(default = "default_rotation_interval_secs")]
    pub rotation_interval_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            cache_max_age_secs: default_cache_max_age_secs(),
            fetch_count: default_practice_fetch_count(),
            rotation_interval_secs: default_rotation_interval_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl PracticeConfig {
    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache_max_age_secs)
    }

    pub fn rotation_interval(&self) -> Duration {
        Duration::from_secs(self.rotation_interval_secs.max(1))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub practice: PracticeConfig,
    pub install_date: chrono::DateTime<chrono::Utc>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            practice: PracticeConfig::default(),
            install_date: chrono::Utc::now(),
        }
    }
}

impl Config {
    pub fn load_or_create() -> Result<Self, KotobatenError> {
        let config_dir = get_config_directory()?;
        Self::load_or_create_in(&config_dir)
    }

    pub fn load_or_create_in(config_dir: &Path) -> Result<Self, KotobatenError> {
        let config_file = config_dir.join("config.json");

        if config_file.exists() {
            log::debug!("Loading config from {}", config_file.display());
            let content = std::fs::read_to_string(&config_file)?;
            serde_json::from_str(&content)
                .map_err(|e| KotobatenError::config_parse_failed(&config_file, e))
        } else {
            log::debug!("Creating default config at {}", config_file.display());
            let config = Self::default();
            config.save_in(config_dir)?;
            Ok(config)
        }
    }

    pub fn save_in(&self, config_dir: &Path) -> Result<(), KotobatenError> {
        std::fs::create_dir_all(config_dir)?;

        let config_file = config_dir.join("config.json");
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_file, content)?;

        Ok(())
    }

    /// Apply a one-off base URL override from the command line.
    pub fn with_api_base_url(mut self, api_base_url: Option<String>) -> Self {
        if let Some(url) = api_base_url {
            self.api_base_url = url;
        }
        self
    }
}
