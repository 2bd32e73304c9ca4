//! Configuration for findings-mcp
//!
//! Config files are loaded in order (later overrides earlier):
//! 1. `~/.config/findings-mcp/config.toml` (user defaults)
//! 2. `.findings-mcp.toml` in the working directory (project overrides)
//!
//! The API key is never read from config files. It comes from
//! `SOLODIT_API_KEY` once at startup and is carried in [`ApiConfig`].

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Environment variable holding the findings API key
pub const API_KEY_ENV: &str = "SOLODIT_API_KEY";
/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "FINDINGS_API_URL";
/// Production API base URL
pub const DEFAULT_BASE_URL: &str = "https://solodit.cyfrin.io/api/v1/solodit";

/// Options loaded from config files
///
/// # Example
///
/// ```toml
/// # ~/.config/findings-mcp/config.toml or .findings-mcp.toml
/// base_url = "https://solodit.cyfrin.io/api/v1/solodit"
/// timeout_secs = 30      # Unset = no client-side timeout
/// default_page_size = 10 # Used by `findings-mcp search`
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub default_page_size: Option<u32>,
}

impl Config {
    /// Load configuration from user and project config files
    pub fn load(project_root: &Path) -> Self {
        let user_config = dirs::config_dir()
            .map(|d| d.join("findings-mcp/config.toml"))
            .and_then(|p| Self::load_file(&p))
            .unwrap_or_default();

        let project_config =
            Self::load_file(&project_root.join(".findings-mcp.toml")).unwrap_or_default();

        let merged = user_config.override_with(project_config);
        tracing::debug!(
            base_url = ?merged.base_url,
            timeout_secs = ?merged.timeout_secs,
            default_page_size = ?merged.default_page_size,
            "Effective config after merge"
        );
        merged
    }

    /// Load configuration from a specific file
    pub fn load_file(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read config {}: {}", path.display(), e);
                return None;
            }
        };

        match toml::from_str::<Self>(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Layer another config on top (other overrides self where present)
    fn override_with(self, other: Self) -> Self {
        Config {
            base_url: other.base_url.or(self.base_url),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            default_page_size: other.default_page_size.or(self.default_page_size),
        }
    }
}

/// Everything the findings client needs, resolved once at startup
#[derive(Clone)]
pub struct ApiConfig {
    api_key: Option<String>,
    pub base_url: String,
    /// `None` leaves requests without a client-side timeout
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve from the process environment layered over file config.
    ///
    /// `FINDINGS_API_URL` beats `base_url` from files, which beats the
    /// production default.
    pub fn from_env(config: &Config) -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok();
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|u| !u.trim().is_empty())
            .or_else(|| config.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let resolved = Self::new(api_key, base_url)
            .with_timeout(config.timeout_secs.map(Duration::from_secs));
        if resolved.api_key().is_none() {
            tracing::warn!(
                env = API_KEY_ENV,
                "No API key configured; findings queries will fail until it is set"
            );
        }
        resolved
    }

    /// The API key, if set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Full URL of the search endpoint
    pub fn findings_url(&self) -> String {
        format!("{}/findings", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
