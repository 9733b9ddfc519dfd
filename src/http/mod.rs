//! HTTP module
//!
//! Provides the single-attempt transport and the retry policy that wraps it.
//!
//! # Features
//!
//! - **Transport seam**: [`Transport`] trait with a reqwest-backed default
//! - **Automatic Retries**: bounded retries for transient failures only
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Retry-After**: rate-limit responses honour the server's delay

mod retry;
mod transport;

pub use retry::{BackoffType, RetryPolicy, Sleeper, TokioSleeper};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
