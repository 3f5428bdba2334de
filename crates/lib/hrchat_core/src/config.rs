//! Client configuration.

use std::env;
use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::api::ApiError;
use crate::host::Location;

/// Backend used when developing locally.
pub const LOCAL_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
/// Unit of the linear backoff: retry `n` waits `n × unit`.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(1000);

pub const API_URL_ENV: &str = "HRCHAT_API_URL";
pub const TIMEOUT_ENV: &str = "HRCHAT_TIMEOUT_SECS";
pub const RETRY_ATTEMPTS_ENV: &str = "HRCHAT_RETRY_ATTEMPTS";

/// Configuration for the API client, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Hard timeout for a single attempt.
    pub timeout: Duration,
    /// Retries after the first attempt for retryable failures.
    pub retry_attempts: u32,
    pub retry_backoff: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }

    /// Resolve from the host: page origin, local dev backend, or environment.
    pub fn resolve(location: Option<&Location>) -> Self {
        Self::new(resolve_base_url(location, env::var(API_URL_ENV).ok()))
    }

    /// Reads configuration for a client running outside a page.
    ///
    /// | Variable                | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HRCHAT_API_URL`        | `http://localhost:5000` |
    /// | `HRCHAT_TIMEOUT_SECS`   | `30`                    |
    /// | `HRCHAT_RETRY_ATTEMPTS` | `3`                     |
    pub fn from_env() -> Self {
        let mut config = Self::resolve(None);
        if let Some(secs) = parse_env::<u64>(TIMEOUT_ENV) {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = parse_env::<u32>(RETRY_ATTEMPTS_ENV) {
            config.retry_attempts = attempts;
        }
        config
    }

    /// `base_url` + `endpoint`, e.g. `http://localhost:5000` + `/api/chat`.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, ApiError> {
        let base = self.base_url.trim_end_matches('/');
        let joined = if endpoint.starts_with('/') {
            format!("{base}{endpoint}")
        } else {
            format!("{base}/{endpoint}")
        };
        Url::parse(&joined).map_err(|e| ApiError::InvalidUrl(format!("{joined}: {e}")))
    }

    /// Whether the backend is reached over https.
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(LOCAL_API_URL)
    }
}

/// Base URL for a host.
///
/// - page on a non-local host → the page origin (same-origin deployment);
/// - page on the local dev host → [`LOCAL_API_URL`];
/// - no page → `env_url`, else [`LOCAL_API_URL`].
pub fn resolve_base_url(location: Option<&Location>, env_url: Option<String>) -> String {
    match location {
        Some(loc) if loc.is_local_dev_host() => LOCAL_API_URL.to_string(),
        Some(loc) => loc.origin(),
        None => env_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| LOCAL_API_URL.to_string()),
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, LOCAL_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_backoff, Duration::from_secs(1));
    }

    #[test]
    fn production_page_uses_its_own_origin() {
        let loc = Location::parse("https://hr.example.com/chat").unwrap();
        assert_eq!(
            resolve_base_url(Some(&loc), Some("http://ignored:1".into())),
            "https://hr.example.com"
        );
    }

    #[test]
    fn local_page_uses_local_backend() {
        let loc = Location::parse("http://localhost:3000/").unwrap();
        assert_eq!(resolve_base_url(Some(&loc), None), LOCAL_API_URL);
    }

    #[test]
    fn no_page_uses_env_then_fallback() {
        assert_eq!(
            resolve_base_url(None, Some("https://api.internal".into())),
            "https://api.internal"
        );
        assert_eq!(resolve_base_url(None, None), LOCAL_API_URL);
        assert_eq!(resolve_base_url(None, Some("  ".into())), LOCAL_API_URL);
    }

    #[test]
    fn endpoint_url_joins_without_double_slash() {
        let config = ClientConfig::new("http://localhost:5000/");
        assert_eq!(
            config.endpoint_url("/api/chat").unwrap().as_str(),
            "http://localhost:5000/api/chat"
        );
        assert_eq!(
            config.endpoint_url("api/health").unwrap().as_str(),
            "http://localhost:5000/api/health"
        );
    }

    #[test]
    fn endpoint_url_rejects_bad_base() {
        let config = ClientConfig::new("not a url");
        assert!(matches!(
            config.endpoint_url("/api/chat"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn secure_detection() {
        assert!(ClientConfig::new("https://hr.example.com").is_secure());
        assert!(!ClientConfig::default().is_secure());
    }
}
