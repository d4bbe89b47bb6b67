//! Client configuration.
//!
//! Built once with consuming `with_*` options and never mutated afterwards;
//! clients hold it by value and only read from it.

use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://dev.to/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_KEY_ENV: &str = "DEVTO_API_KEY";
pub const BASE_URL_ENV: &str = "DEVTO_API_URL";

/// Connection settings shared by every request a client issues.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
    user_agent: String,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: concat!("devto-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Defaults overridden by `DEVTO_API_URL` and `DEVTO_API_KEY` when set
    /// and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Some(url) = non_empty_var(BASE_URL_ENV) {
            config = config.with_base_url(&url);
        }
        if let Some(key) = non_empty_var(API_KEY_ENV) {
            config = config.with_api_key(key);
        }
        config
    }

    /// Trailing slashes are stripped so paths can be appended directly.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// `None` disables the timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
