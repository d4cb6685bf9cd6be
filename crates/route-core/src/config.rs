//! Application configuration

use crate::{date_formats, ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`AppConfig::file_url`]
pub const FILE_URL_ENV: &str = "ROUTE_FILE_URL";
/// Environment variable overriding [`AppConfig::default_date_format`]
pub const DATE_FORMAT_ENV: &str = "ROUTE_DATE_FORMAT";

/// Default base URL for uploaded files (avatars, attachments)
pub const DEFAULT_FILE_URL: &str = "https://files.example.com/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Base URL prepended to relative picture paths
    pub file_url: String,
    /// Date part used when the current user has no preferred format
    pub default_date_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            file_url: DEFAULT_FILE_URL.to_string(),
            default_date_format: date_formats::DATE.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `ROUTE_FILE_URL` / `ROUTE_DATE_FORMAT`
    pub fn from_env() -> ModelResult<Self> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(FILE_URL_ENV) {
            config.file_url = url;
        }
        if let Ok(format) = std::env::var(DATE_FORMAT_ENV) {
            config.default_date_format = format;
        }
        config.validate()?;
        tracing::debug!(file_url = %config.file_url, "loaded configuration from environment");
        Ok(config)
    }

    pub fn with_file_url(mut self, url: impl Into<String>) -> Self {
        self.file_url = url.into();
        self
    }

    fn validate(&self) -> ModelResult<()> {
        if self.file_url.is_empty() {
            return Err(ModelError::Config("file_url must not be empty".into()));
        }
        if self.default_date_format.is_empty() {
            return Err(ModelError::Config("default_date_format must not be empty".into()));
        }
        Ok(())
    }
}
