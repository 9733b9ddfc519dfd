// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::ref_option)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # search-api
//!
//! Async client for the search-api.dev lookup service: find people by email
//! address or phone number, and list the people found on a domain.
//!
//! ## Features
//!
//! - **Typed results**: addresses, E.164 phone numbers and dates of birth are
//!   normalized while decoding
//! - **Response caching**: equivalent lookups share one cache entry until its
//!   TTL runs out
//! - **Retries**: rate limiting, 5xx, network failures and timeouts are retried
//!   with capped exponential backoff
//! - **Pluggable transport**: swap the HTTP layer for tests or custom stacks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use search_api::{SearchClient, SearchOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = SearchClient::new("your-api-key")?;
//!
//!     let person = client
//!         .search_email("jane@example.com", SearchOptions::new().house_value(true))
//!         .await?;
//!     println!("{:?}", person.name);
//!
//!     let domain = client.search_domain("example.com").await?;
//!     println!("{} results", domain.total_results);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         SearchClient                          │
//! │   search_email()      search_phone()      search_domain()     │
//! └───────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────┬────────────────┼────────────────┬──────────────┐
//! │   Config    │     Cache      │      HTTP      │    Models    │
//! ├─────────────┼────────────────┼────────────────┼──────────────┤
//! │ Base URL    │ key_for        │ Transport      │ Decode       │
//! │ Timeout     │ TTL entries    │ RetryPolicy    │ Addresses    │
//! │ API key     │ Lazy eviction  │ Backoff        │ Phones, DOB  │
//! └─────────────┴────────────────┴────────────────┴──────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Client configuration
pub mod config;

/// API key placement
pub mod auth;

/// TTL response cache and cache keys
pub mod cache;

/// Transport and retry policy
pub mod http;

/// Typed search results
pub mod models;

/// The search client
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::ApiKeyLocation;
pub use client::{Operation, SearchClient, SearchOptions};
pub use config::{SearchConfig, SearchConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use http::{BackoffType, RetryPolicy};
pub use models::{
    Address, DomainSearchResult, EmailSearchResult, PhoneNumber, PhoneSearchResult, SearchResult,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
