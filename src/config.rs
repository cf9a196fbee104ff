//! Process-wide client configuration.
//!
//! Configuration is resolved once at startup (explicitly or from the
//! environment) and never re-read; the composition root passes the
//! resulting [`Config`] to the client builder and the backend selector.

use core::time::Duration;

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://api.waitless.app";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable naming the API base URL.
const ENV_BASE_URL: &str = "WAITLESS_API_URL";

/// Environment variable naming the request timeout in milliseconds.
const ENV_TIMEOUT_MS: &str = "WAITLESS_API_TIMEOUT_MS";

/// Environment variable selecting the environment (`production` or
/// anything else for development).
const ENV_ENVIRONMENT: &str = "WAITLESS_ENV";

/// Environment variable enabling the mock backend (`1` or `true`).
const ENV_USE_MOCK: &str = "WAITLESS_USE_MOCK";

/// Deployment environment the client runs in.
///
/// Gates diagnostics that should not fire in production, such as the
/// slow-request warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development and test environments.
    #[default]
    Development,
    /// Production builds.
    Production,
}

/// Client configuration resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// Fixed per-request timeout.
    pub timeout: Duration,
    /// Deployment environment.
    pub environment: Environment,
    /// When set, the backend selector serves shop operations from the
    /// in-memory mock store instead of the real API.
    pub use_mock_backend: bool,
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            environment: Environment::default(),
            use_mock_backend: false,
        }
    }
}

impl Config {
    /// Creates a configuration for the given base URL with defaults for
    /// everything else.
    #[inline]
    #[must_use]
    pub fn new<T: Into<String>>(base_url: T) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Resolves configuration from `WAITLESS_*` environment variables,
    /// falling back to defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let timeout = std::env::var(ENV_TIMEOUT_MS)
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map_or(DEFAULT_TIMEOUT, Duration::from_millis);
        let environment = match std::env::var(ENV_ENVIRONMENT).as_deref() {
            Ok("production") => Environment::Production,
            Ok(_) | Err(_) => Environment::Development,
        };
        let use_mock_backend = matches!(std::env::var(ENV_USE_MOCK).as_deref(), Ok("1" | "true"));
        Self {
            base_url,
            timeout,
            environment,
            use_mock_backend,
        }
    }

    /// Sets the request timeout.
    #[inline]
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the deployment environment.
    #[inline]
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Enables or disables the mock backend.
    #[inline]
    #[must_use]
    pub const fn use_mock_backend(mut self, enabled: bool) -> Self {
        self.use_mock_backend = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.use_mock_backend);
    }

    #[test]
    fn builder_style_overrides() {
        let config = Config::new("http://localhost:8080")
            .timeout(Duration::from_millis(500))
            .environment(Environment::Production)
            .use_mock_backend(true);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.environment, Environment::Production);
        assert!(config.use_mock_backend);
    }
}
