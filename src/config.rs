//! Application configuration loaded from environment variables.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::RelayError;

/// Environment name that disables `.env` loading.
pub const PRODUCTION_ENV: &str = "production";

/// Application configuration loaded from environment variables.
#[derive(Clone, Deserialize)]
pub struct Config {
    // === Server ===
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment (development, production).
    #[serde(default = "default_app_env")]
    pub app_env: String,

    // === Render API ===
    /// Render API key, sent as a bearer token.
    #[serde(default)]
    pub api_key: String,

    /// Render REST API base URL.
    #[serde(default = "default_render_api_url")]
    pub render_api_url: String,

    /// Upstream request timeout. Unset keeps the HTTP client default.
    #[serde(default)]
    pub http_timeout_ms: Option<u64>,

    // === Observability ===
    /// Serve Prometheus metrics on /metrics.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    3001
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_render_api_url() -> String {
    "https://api.render.com/v1".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment.
    ///
    /// A `.env` file is read first unless `APP_ENV` is `production`.
    pub fn load() -> Result<Self, RelayError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_default();
        if app_env != PRODUCTION_ENV {
            dotenvy::dotenv().ok();
        }
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.api_key.trim().is_empty() {
            return Err(RelayError::InvalidConfig("API_KEY is required".to_string()));
        }

        if self.port == 0 {
            return Err(RelayError::InvalidConfig("PORT must be non-zero".to_string()));
        }

        if self.http_timeout_ms == Some(0) {
            return Err(RelayError::InvalidConfig(
                "HTTP_TIMEOUT_MS must be greater than 0".to_string(),
            ));
        }

        match Url::parse(&self.render_api_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() => {}
            _ => {
                return Err(RelayError::InvalidConfig(format!(
                    "RENDER_API_URL must be an absolute http(s) URL, got {:?}",
                    self.render_api_url
                )))
            }
        }

        Ok(())
    }

    /// Check if running in production.
    pub fn is_production(&self) -> bool {
        self.app_env == PRODUCTION_ENV
    }

    /// Upstream request timeout, if configured.
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            app_env: default_app_env(),
            api_key: String::new(),
            render_api_url: default_render_api_url(),
            http_timeout_ms: None,
            metrics_enabled: default_true(),
            rust_log: default_log_level(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("app_env", &self.app_env)
            .field("api_key", &"[redacted]")
            .field("render_api_url", &self.render_api_url)
            .field("http_timeout_ms", &self.http_timeout_ms)
            .field("metrics_enabled", &self.metrics_enabled)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}
