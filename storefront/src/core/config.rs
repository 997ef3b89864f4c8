//! Storefront configuration, read from the environment and `.env`

use crate::catalog::DEFAULT_PAGE_SIZE;
use shared::error::{AppError, AppResult};

/// Storefront configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | BACKEND_URL | http://localhost:54321 | Base URL of the hosted backend |
/// | BACKEND_ANON_KEY | (empty) | Public API key sent as `apikey` |
/// | REQUEST_TIMEOUT_MS | 30000 | Backend request timeout |
/// | PAGE_SIZE | 12 | Products per catalog page |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | Default log level |
/// | LOG_DIR | (unset) | Enables file logging when set |
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_anon_key: String,
    pub request_timeout_ms: u64,
    pub page_size: usize,
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            backend_url: std::env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:54321".into()),
            backend_anon_key: std::env::var("BACKEND_ANON_KEY").unwrap_or_default(),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            page_size: std::env::var("PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PAGE_SIZE),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Load a `.env` file if present, then read the environment
    pub fn load() -> Self {
        // a missing .env is fine
        let _ = dotenv::dotenv();
        Self::from_env()
    }

    /// Point at a specific backend; mostly for tests
    pub fn with_backend(mut self, url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self.backend_anon_key = anon_key.into();
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://")) {
            return Err(AppError::config(format!(
                "BACKEND_URL must be an http(s) URL, got '{}'",
                self.backend_url
            )));
        }
        if self.is_production() && self.backend_anon_key.is_empty() {
            return Err(AppError::config("BACKEND_ANON_KEY is required in production"));
        }
        if self.request_timeout_ms == 0 {
            return Err(AppError::config("REQUEST_TIMEOUT_MS must be positive"));
        }
        if self.page_size == 0 {
            return Err(AppError::config("PAGE_SIZE must be positive"));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
