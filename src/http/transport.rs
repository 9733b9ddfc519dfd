//! Single-attempt HTTP transport
//!
//! A [`Transport`] performs exactly one request and reports any HTTP status
//! as a successful call. Connection failures and timeouts are the only
//! errors produced here; retries live in [`super::RetryPolicy`].

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// A fully built outbound request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: Url,
    /// Query parameters, in send order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: Vec<(String, String)>,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Deadline for this single attempt
    pub timeout: Duration,
}

impl TransportRequest {
    /// Create a request with no parameters
    pub fn new(method: Method, url: Url, timeout: Duration) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            timeout,
        }
    }

    /// Create a GET request
    pub fn get(url: Url, timeout: Duration) -> Self {
        Self::new(Method::GET, url, timeout)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Raw response from a single attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed `Retry-After` header, in seconds
    pub retry_after: Option<u64>,
    /// Response body
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-success status into the matching [`Error`]
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::from_status(self.status, self.body, self.retry_after))
        }
    }

    /// Parse the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Error::from)
    }
}

/// Performs one HTTP call
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request once
    async fn call(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// [`Transport`] backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh connection pool
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn call(&self, request: TransportRequest) -> Result<TransportResponse> {
        let timeout = request.timeout;
        let mut req = self.client.request(request.method.clone(), request.url.clone());

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        req = req.timeout(timeout);

        let response = req
            .send()
            .await
            .map_err(|e| classify_send_error(e, timeout))?;

        let status = response.status().as_u16();
        let retry_after = extract_retry_after(&response);
        let body = response
            .text()
            .await
            .map_err(|e| classify_send_error(e, timeout))?;

        debug!("{} {} -> {}", request.method, request.url.path(), status);

        Ok(TransportResponse {
            status,
            retry_after,
            body,
        })
    }
}

fn classify_send_error(err: reqwest::Error, timeout: Duration) -> Error {
    if err.is_timeout() {
        Error::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        Error::network(err.to_string())
    }
}

/// Extract retry-after header value
fn extract_retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}
