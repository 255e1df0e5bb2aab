//! Settings service
//!
//! Manages client settings persistence using JSON file storage.

use crate::config::{
    DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS, FALLBACK_MODEL_LABEL,
    MAX_REQUEST_TIMEOUT_SECS, MIN_REQUEST_TIMEOUT_SECS, SETTINGS_FILE_NAME,
};
use crate::error::{AppError, Result};
use crate::gateway::http::normalize_base_url;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

/// Client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// URL of the mood collection, ending in `/`
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Transport timeout for every API request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Model label used when the backend omits one
    #[serde(default = "default_fallback_model_label")]
    pub fallback_model_label: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_fallback_model_label() -> String {
    FALLBACK_MODEL_LABEL.to_string()
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            fallback_model_label: default_fallback_model_label(),
        }
    }
}

impl ClientSettings {
    /// Normalize the API URL and clamp the timeout into its allowed range
    pub fn validated(mut self) -> Result<Self> {
        self.api_url = normalize_base_url(&self.api_url)?;
        self.request_timeout_secs = self
            .request_timeout_secs
            .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS);
        if self.fallback_model_label.trim().is_empty() {
            self.fallback_model_label = default_fallback_model_label();
        }
        Ok(self)
    }
}

/// Service for managing client settings
#[derive(Clone)]
pub struct SettingsService {
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new(config_dir: PathBuf) -> Self {
        Self {
            settings_path: config_dir.join(SETTINGS_FILE_NAME),
        }
    }

    /// Load settings from disk or create default if not exists
    pub async fn load(&self) -> Result<ClientSettings> {
        if !self.settings_path.exists() {
            tracing::info!("Settings file not found, creating default settings");
            let default = ClientSettings::default();
            self.save(&default).await?;
            return Ok(default);
        }

        let content = fs::read_to_string(&self.settings_path).await?;
        let settings: ClientSettings = serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse settings: {}", e)))?;

        settings.validated()
    }

    /// Save settings to disk
    pub async fn save(&self, settings: &ClientSettings) -> Result<()> {
        let content = serde_json::to_string_pretty(settings)?;

        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.settings_path, content).await?;
        tracing::info!("Settings saved to {:?}", self.settings_path);

        Ok(())
    }

    /// Point the client at a different API
    pub async fn update_api_url(&self, api_url: &str) -> Result<ClientSettings> {
        let mut settings = self.load().await?;
        settings.api_url = normalize_base_url(api_url)?;
        self.save(&settings).await?;
        Ok(settings)
    }

    /// Change the request timeout, clamped to the allowed range
    pub async fn update_request_timeout(&self, secs: u64) -> Result<ClientSettings> {
        let mut settings = self.load().await?;
        settings.request_timeout_secs = secs;
        let settings = settings.validated()?;
        self.save(&settings).await?;
        Ok(settings)
    }
}
