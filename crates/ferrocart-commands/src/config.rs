//! Environment-driven platform configuration.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `FERROCART_DEFAULT_PROVIDER` | `demo` |
//! | `FERROCART_API_HOST` | `0.0.0.0` |
//! | `FERROCART_API_PORT` | `6900` |
//! | `FERROCART_REQUEST_TIMEOUT_MS` | `30000` |
//! | `FERROCART_DISABLED_PLUGINS` | empty (comma-separated plugin ids) |

use std::collections::BTreeSet;
use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PROVIDER: &str = "demo";
pub const DEFAULT_API_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_PORT: u16 = 6900;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub default_provider: String,
    pub api_host: String,
    pub api_port: u16,
    pub request_timeout: Duration,
    pub disabled_plugins: BTreeSet<String>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            default_provider: String::from(DEFAULT_PROVIDER),
            api_host: String::from(DEFAULT_API_HOST),
            api_port: DEFAULT_API_PORT,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            disabled_plugins: BTreeSet::new(),
        }
    }
}

impl PlatformConfig {
    /// Reads `FERROCART_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    /// Unset and blank variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(provider) = read("FERROCART_DEFAULT_PROVIDER") {
            config.default_provider = provider;
        }
        if let Some(host) = read("FERROCART_API_HOST") {
            config.api_host = host;
        }
        if let Some(port) = read("FERROCART_API_PORT") {
            config.api_port = port.parse().map_err(|_| ConfigError::Invalid {
                var: "FERROCART_API_PORT",
                expected: "a TCP port (0-65535)",
                value: port.clone(),
            })?;
        }
        if let Some(timeout) = read("FERROCART_REQUEST_TIMEOUT_MS") {
            let millis = timeout
                .parse::<u64>()
                .ok()
                .filter(|millis| *millis > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    var: "FERROCART_REQUEST_TIMEOUT_MS",
                    expected: "a positive number of milliseconds",
                    value: timeout.clone(),
                })?;
            config.request_timeout = Duration::from_millis(millis);
        }
        if let Some(disabled) = read("FERROCART_DISABLED_PLUGINS") {
            config.disabled_plugins = disabled
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_owned)
                .collect();
        }

        Ok(config)
    }

    pub fn with_default_provider(mut self, provider: impl Into<String>) -> Self {
        self.default_provider = provider.into();
        self
    }

    pub fn with_disabled_plugin(mut self, id: impl Into<String>) -> Self {
        self.disabled_plugins.insert(id.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
