//! API key placement
//!
//! The service accepts the key either as a query parameter or in a header.

use crate::http::TransportRequest;

/// Where the API key is attached to outgoing requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeyLocation {
    /// Place in a query parameter
    Query {
        /// Parameter name
        param: String,
    },
    /// Place in an HTTP header
    Header {
        /// Header name
        name: String,
        /// Prefix to add before the value (e.g., "Bearer ")
        prefix: Option<String>,
    },
}

impl Default for ApiKeyLocation {
    fn default() -> Self {
        Self::query("api_key")
    }
}

impl ApiKeyLocation {
    /// Send the key as the given query parameter
    pub fn query(param: impl Into<String>) -> Self {
        Self::Query {
            param: param.into(),
        }
    }

    /// Send the key verbatim in the given header
    pub fn header(name: impl Into<String>) -> Self {
        Self::Header {
            name: name.into(),
            prefix: None,
        }
    }

    /// Send the key as `Authorization: Bearer <key>`
    pub fn bearer() -> Self {
        Self::Header {
            name: "Authorization".to_string(),
            prefix: Some("Bearer ".to_string()),
        }
    }

    /// Attach the key to a request
    pub fn apply(&self, request: TransportRequest, api_key: &str) -> TransportRequest {
        match self {
            ApiKeyLocation::Query { param } => request.query(param.as_str(), api_key),
            ApiKeyLocation::Header { name, prefix } => {
                let value = format!("{}{}", prefix.as_deref().unwrap_or(""), api_key);
                request.header(name.as_str(), value)
            }
        }
    }
}
