//! Search client
//!
//! [`SearchClient`] ties the pieces together for each lookup:
//!
//! ```text
//! validate ─► key_for ─► cache hit? ──yes──► return
//!                              │
//!                              no
//!                              ▼
//!            RetryPolicy(Transport::call + status check) ─► decode ─► cache.put ─► return
//! ```

use crate::cache::{key_for, normalize_domain, normalize_email, normalize_phone, ResponseCache};
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::http::{ReqwestTransport, RetryPolicy, Transport, TransportRequest};
use crate::models::{
    decode, DomainSearchResult, EmailSearchResult, PhoneNumber, PhoneSearchResult, SearchResult,
};
use std::sync::Arc;
use tracing::debug;

/// Free-mail providers that cannot be searched as a domain
const MAJOR_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "aol.com",
    "icloud.com",
    "live.com",
    "msn.com",
    "comcast.net",
    "me.com",
    "mac.com",
    "att.net",
    "verizon.net",
    "protonmail.com",
    "zoho.com",
    "yandex.com",
    "mail.com",
    "gmx.com",
    "rocketmail.com",
    "yahoo.co.uk",
    "btinternet.com",
    "bellsouth.net",
];

/// The kind of lookup being performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Email,
    Phone,
    Domain,
}

impl Operation {
    /// Name used for the endpoint path, the primary query parameter and the cache key
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Email => "email",
            Operation::Phone => "phone",
            Operation::Domain => "domain",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional enrichments for email and phone lookups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Include estimated property values for addresses
    pub include_house_value: bool,
    /// Include additional profile data
    pub include_extra_info: bool,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn house_value(mut self, include: bool) -> Self {
        self.include_house_value = include;
        self
    }

    #[must_use]
    pub fn extra_info(mut self, include: bool) -> Self {
        self.include_extra_info = include;
        self
    }

    fn flags(self) -> [(&'static str, bool); 2] {
        [
            ("include_house_value", self.include_house_value),
            ("include_extra_info", self.include_extra_info),
        ]
    }
}

/// Client for the search API
pub struct SearchClient {
    config: SearchConfig,
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
    cache: ResponseCache<SearchResult>,
}

impl SearchClient {
    /// Create a client with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(SearchConfig::new(api_key)?)
    }

    /// Create a client from a validated config
    pub fn with_config(config: SearchConfig) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client that sends requests through a custom transport
    pub fn with_transport(config: SearchConfig, transport: Arc<dyn Transport>) -> Self {
        let retry = RetryPolicy::from_config(&config);
        Self {
            config,
            transport,
            retry,
            cache: ResponseCache::new(),
        }
    }

    /// Replace the retry policy derived from the config
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResponseCache<SearchResult> {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Look up a person by email address
    pub async fn search_email(
        &self,
        email: &str,
        options: SearchOptions,
    ) -> Result<EmailSearchResult> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(Error::validation("Email must not be empty"));
        }
        if !email.contains('@') {
            return Err(Error::validation(format!("Invalid email format: '{email}'")));
        }

        self.lookup(Operation::Email, &email, options, |body| {
            decode::email_result(&email, body).map(SearchResult::from)
        })
        .await?
        .into_email()
        .ok_or_else(|| Error::decode("Cached result is not an email result"))
    }

    /// Look up a person by phone number
    pub async fn search_phone(
        &self,
        phone: &str,
        options: SearchOptions,
    ) -> Result<PhoneSearchResult> {
        let digits = normalize_phone(phone);
        if digits.is_empty() {
            return Err(Error::validation(format!(
                "Invalid phone number format: '{}'",
                phone.trim()
            )));
        }

        // Derived from the cache key input so a cache hit matches a fresh fetch
        let parsed = PhoneNumber::from_digits(&digits);
        self.lookup(Operation::Phone, &digits, options, move |body| {
            decode::phone_result(parsed, body).map(SearchResult::from)
        })
        .await?
        .into_phone()
        .ok_or_else(|| Error::decode("Cached result is not a phone result"))
    }

    /// List the people found on a domain
    pub async fn search_domain(&self, domain: &str) -> Result<DomainSearchResult> {
        let domain = normalize_domain(domain);
        if domain.is_empty() {
            return Err(Error::validation("Domain must not be empty"));
        }
        if !domain.contains('.') {
            return Err(Error::validation(format!("Invalid domain format: '{domain}'")));
        }
        if MAJOR_DOMAINS.contains(&domain.as_str()) {
            return Err(Error::validation(format!(
                "Searching major email provider domains is not allowed: '{domain}'"
            )));
        }

        self.lookup(Operation::Domain, &domain, SearchOptions::default(), |body| {
            decode::domain_result(&domain, body).map(SearchResult::from)
        })
        .await?
        .into_domain()
        .ok_or_else(|| Error::decode("Cached result is not a domain result"))
    }

    /// Serve from cache or fetch, decode and cache
    async fn lookup<D>(
        &self,
        operation: Operation,
        value: &str,
        options: SearchOptions,
        decode: D,
    ) -> Result<SearchResult>
    where
        D: FnOnce(&str) -> Result<SearchResult>,
    {
        let mut params = vec![(operation.as_str(), value)];
        if operation != Operation::Domain {
            params.extend(
                options
                    .flags()
                    .map(|(name, on)| (name, if on { "true" } else { "false" })),
            );
        }
        let key = key_for(operation.as_str(), &params);

        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        let body = self.fetch(operation, value, options).await?;
        let result = decode(&body)?;

        self.cache
            .put(key, result.clone(), self.config.cache_ttl());
        Ok(result)
    }

    /// Perform the HTTP call for a lookup, with retries
    async fn fetch(&self, operation: Operation, value: &str, options: SearchOptions) -> Result<String> {
        let url = self.config.endpoint(operation.as_str())?;

        let mut request = TransportRequest::get(url, self.config.timeout())
            .query(operation.as_str(), value)
            .header("Accept", "application/json")
            .header("User-Agent", self.config.user_agent());

        if operation != Operation::Domain {
            for (name, on) in options.flags() {
                if on {
                    request = request.query(name, "true");
                }
            }
        }

        let request = self
            .config
            .api_key_location()
            .apply(request, self.config.api_key());

        debug!("Searching {} for {}", operation, value);

        let transport = &self.transport;
        let response = self
            .retry
            .execute(operation.as_str(), || {
                let request = request.clone();
                async move { transport.call(request).await?.error_for_status() }
            })
            .await?;

        debug!("Search {} succeeded ({} bytes)", operation, response.body.len());
        Ok(response.body)
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("config", &self.config)
            .field("retry", &self.retry)
            .field("cached_entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}
