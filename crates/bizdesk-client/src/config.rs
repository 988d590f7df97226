//! # Client Configuration
//!
//! Configuration for the API client: backend location, where the durable
//! session lives, and display settings.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults            base_url = http://localhost:8000/api           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  2. Config file         --config PATH, or <config dir>/config.toml     │
//! │         │               (missing file is fine)                          │
//! │         ▼                                                               │
//! │  3. Environment         BIZDESK_API_BASE                               │
//! │                         BIZDESK_SESSION_FILE                           │
//! │                         BIZDESK_CURRENCY_PREFIX                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  4. validate()          base_url must be absolute http(s)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use bizdesk_core::{CURRENCY_PREFIX, DEFAULT_API_BASE};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Sections
// =============================================================================

/// Backend location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Prefix every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
        }
    }
}

/// Durable session location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Explicit session file. Defaults to `<data dir>/session.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

/// Presentation settings for view models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Prefix for formatted amounts.
    #[serde(default = "default_currency_prefix")]
    pub currency_prefix: String,
}

fn default_currency_prefix() -> String {
    CURRENCY_PREFIX.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_prefix: default_currency_prefix(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete client configuration.
///
/// ## Example Config File
/// ```toml
/// [api]
/// base_url = "https://shop.example.com/api"
///
/// [storage]
/// session_file = "/var/lib/bizdesk/session.json"
///
/// [display]
/// currency_prefix = "TK"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "API base URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ClientError::InvalidUrl(format!(
                "API base URL must not carry a query or fragment: {}",
                self.api.base_url
            )));
        }

        if let Some(ref path) = self.storage.session_file {
            if path.as_os_str().is_empty() {
                return Err(ClientError::InvalidConfig(
                    "storage.session_file must not be empty".into(),
                ));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("BIZDESK_API_BASE") {
            debug!(url = %url, "Overriding API base URL from environment");
            self.api.base_url = url;
        }

        if let Some(path) = var("BIZDESK_SESSION_FILE") {
            debug!(path = %path, "Overriding session file from environment");
            self.storage.session_file = Some(PathBuf::from(path));
        }

        if let Some(prefix) = var("BIZDESK_CURRENCY_PREFIX") {
            self.display.currency_prefix = prefix;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Where the session file goes when none is configured.
    pub fn default_session_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("session.json"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "bizdesk", "bizdesk")
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Base URL without a trailing slash, ready for `base + "/endpoint"`.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    /// Configured or default session file.
    pub fn session_path(&self) -> Option<PathBuf> {
        self.storage
            .session_file
            .clone()
            .or_else(Self::default_session_path)
    }

    pub fn currency_prefix(&self) -> &str {
        &self.display.currency_prefix
    }
}
