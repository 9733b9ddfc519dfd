//! Client configuration
//!
//! [`SearchConfig`] is validated once when it is built and is read-only
//! afterwards. Use [`SearchConfig::new`] for the defaults or
//! [`SearchConfig::builder`] to override individual settings.

use crate::auth::ApiKeyLocation;
use crate::error::{Error, Result};
use crate::http::BackoffType;
use std::time::Duration;
use url::Url;

/// Default service root
pub const DEFAULT_BASE_URL: &str = "https://search-api.dev";

/// Default per-attempt timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default lifetime of a cached result
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Default delay before the first retry
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Default ceiling for the retry delay
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Validated client settings
#[derive(Clone)]
pub struct SearchConfig {
    api_key: String,
    base_url: Url,
    timeout: Duration,
    max_retries: u32,
    cache_ttl: Duration,
    user_agent: String,
    api_key_location: ApiKeyLocation,
    backoff_type: BackoffType,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl SearchConfig {
    /// Create a config with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Create a new config builder
    pub fn builder(api_key: impl Into<String>) -> SearchConfigBuilder {
        SearchConfigBuilder::new(api_key)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn api_key_location(&self) -> &ApiKeyLocation {
        &self.api_key_location
    }

    pub fn backoff_type(&self) -> BackoffType {
        self.backoff_type
    }

    pub fn initial_backoff(&self) -> Duration {
        self.initial_backoff
    }

    pub fn max_backoff(&self) -> Duration {
        self.max_backoff
    }

    /// Full URL for a resource under the base URL
    pub fn endpoint(&self, resource: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let resource = resource.trim_start_matches('/');
        Url::parse(&format!("{base}/{resource}"))
            .map_err(|e| Error::config(format!("Invalid endpoint URL for '{resource}': {e}")))
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("cache_ttl", &self.cache_ttl)
            .field("user_agent", &self.user_agent)
            .field("api_key_location", &self.api_key_location)
            .field("backoff_type", &self.backoff_type)
            .field("initial_backoff", &self.initial_backoff)
            .field("max_backoff", &self.max_backoff)
            .finish()
    }
}

/// Builder for [`SearchConfig`]
pub struct SearchConfigBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
    cache_ttl: Duration,
    user_agent: String,
    api_key_location: ApiKeyLocation,
    backoff_type: BackoffType,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl SearchConfigBuilder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            cache_ttl: DEFAULT_CACHE_TTL,
            user_agent: format!("search-api-rs/{}", env!("CARGO_PKG_VERSION")),
            api_key_location: ApiKeyLocation::default(),
            backoff_type: BackoffType::Exponential,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-attempt timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set max retries
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the cache TTL (zero disables caching)
    #[must_use]
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set where the API key is sent
    #[must_use]
    pub fn api_key_location(mut self, location: ApiKeyLocation) -> Self {
        self.api_key_location = location;
        self
    }

    /// Set backoff configuration
    #[must_use]
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.backoff_type = backoff_type;
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<SearchConfig> {
        let api_key = self.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(Error::validation("API key must not be empty"));
        }

        let base_url = Url::parse(self.base_url.trim())
            .map_err(|e| Error::validation(format!("Invalid base URL '{}': {e}", self.base_url)))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.host_str().is_none() {
            return Err(Error::validation(format!(
                "Base URL must be an absolute http(s) URL, got '{}'",
                self.base_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(Error::validation("Timeout must be greater than zero"));
        }

        if self.initial_backoff > self.max_backoff {
            return Err(Error::validation(format!(
                "Initial backoff {:?} exceeds max backoff {:?}",
                self.initial_backoff, self.max_backoff
            )));
        }

        Ok(SearchConfig {
            api_key,
            base_url,
            timeout: self.timeout,
            max_retries: self.max_retries,
            cache_ttl: self.cache_ttl,
            user_agent: self.user_agent,
            api_key_location: self.api_key_location,
            backoff_type: self.backoff_type,
            initial_backoff: self.initial_backoff,
            max_backoff: self.max_backoff,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_config_defaults() {
        let config = SearchConfig::new("key-123").unwrap();
        assert_eq!(config.api_key(), "key-123");
        assert_eq!(config.base_url().as_str(), "https://search-api.dev/");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_retries(), 3);
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.backoff_type(), BackoffType::Exponential);
        assert!(config.user_agent().starts_with("search-api-rs/"));
        assert_eq!(config.api_key_location(), &ApiKeyLocation::default());
    }

    #[test]
    fn test_config_builder() {
        let config = SearchConfig::builder("key")
            .base_url("http://localhost:8080/v2")
            .timeout(Duration::from_secs(5))
            .max_retries(0)
            .cache_ttl(Duration::ZERO)
            .user_agent("test-agent/1.0")
            .api_key_location(ApiKeyLocation::bearer())
            .backoff(
                BackoffType::Linear,
                Duration::from_millis(10),
                Duration::from_millis(100),
            )
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_str(), "http://localhost:8080/v2");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.max_retries(), 0);
        assert_eq!(config.cache_ttl(), Duration::ZERO);
        assert_eq!(config.user_agent(), "test-agent/1.0");
        assert_eq!(config.backoff_type(), BackoffType::Linear);
        assert_eq!(config.initial_backoff(), Duration::from_millis(10));
        assert_eq!(config.max_backoff(), Duration::from_millis(100));
    }

    #[test]
    fn test_config_rejects_empty_api_key() {
        let err = SearchConfig::new("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_config_rejects_bad_base_url() {
        for url in ["not a url", "ftp://search-api.dev", "search-api.dev"] {
            let err = SearchConfig::builder("key").base_url(url).build().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "url: {url}");
        }
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        let err = SearchConfig::builder("key")
            .timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_config_rejects_inverted_backoff() {
        let err = SearchConfig::builder("key")
            .backoff(
                BackoffType::Exponential,
                Duration::from_secs(10),
                Duration::from_secs(1),
            )
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_endpoint_joins_resource() {
        let config = SearchConfig::builder("key")
            .base_url("https://api.example.com/v1/")
            .build()
            .unwrap();
        assert_eq!(
            config.endpoint("email").unwrap().as_str(),
            "https://api.example.com/v1/email"
        );

        let config = SearchConfig::new("key").unwrap();
        assert_eq!(
            config.endpoint("/domain").unwrap().as_str(),
            "https://search-api.dev/domain"
        );
    }

    #[test]
    fn test_config_debug_hides_api_key() {
        let config = SearchConfig::new("super-secret").unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("SearchConfig"));
        assert!(!debug.contains("super-secret"));
    }
}
