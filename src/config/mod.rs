//! Environment-driven configuration.
//!
//! The transport only needs a base URL and a request timeout; both are
//! injected constants as far as the client logic is concerned. `from_env`
//! is the production path (reads `.env` then process env), the `with_*`
//! builders are for tests and embedders.

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const ENV_BASE_URL: &str = "FLOTILLA_API_URL";
const ENV_TIMEOUT_MS: &str = "FLOTILLA_TIMEOUT_MS";
const ENV_DEBUG: &str = "FLOTILLA_DEBUG";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    base_url: String,
    timeout: Duration,
    debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            debug: false,
        }
    }
}

impl Config {
    /// Load from environment variables (`FLOTILLA_API_URL`,
    /// `FLOTILLA_TIMEOUT_MS`, `FLOTILLA_DEBUG`), reading `.env` first if
    /// one is present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            config = config.with_base_url(url);
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_MS) {
            match raw.parse::<u64>() {
                Ok(ms) => config.timeout = Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %raw, "invalid FLOTILLA_TIMEOUT_MS, keeping default");
                }
            }
        }
        if let Ok(raw) = std::env::var(ENV_DEBUG) {
            config.debug = matches!(raw.as_str(), "1" | "true" | "yes");
        }

        config
    }

    /// Override the API base URL. A trailing `/` is appended if missing so
    /// relative endpoint paths join correctly.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    /// Override the per-request timeout (applies to every call, including
    /// token refresh and replays).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}
