//! Retry with backoff
//!
//! [`RetryPolicy::execute`] re-runs an attempt while it fails with a
//! transient error (rate limiting, 5xx, network, timeout). Delays go through
//! a [`Sleeper`] so the scheduling model can be swapped without touching the
//! backoff algorithm.

use crate::config::{SearchConfig, DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_BACKOFF};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff strategy between retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

/// Suspends the current task between attempts
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] using the tokio timer; yields instead of blocking the thread
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Bounded retry with backoff
#[derive(Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff_type: BackoffType,
    initial_backoff: Duration,
    max_backoff: Duration,
    sleeper: Arc<dyn Sleeper>,
}

impl RetryPolicy {
    /// Exponential backoff with the default delays
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff_type: BackoffType::Exponential,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Build the policy described by a client config
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.max_retries()).with_backoff(
            config.backoff_type(),
            config.initial_backoff(),
            config.max_backoff(),
        )
    }

    /// Set backoff configuration
    #[must_use]
    pub fn with_backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.backoff_type = backoff_type;
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Replace the sleeper used between attempts
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Calculate backoff delay for a given attempt (zero-based)
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => Some(self.initial_backoff),
            BackoffType::Linear => self.initial_backoff.checked_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.initial_backoff.checked_mul(factor)
            }
        };

        delay.map_or(self.max_backoff, |d| d.min(self.max_backoff))
    }

    /// Delay before the next attempt, honouring a server-provided Retry-After
    fn delay_for(&self, attempt: u32, error: &Error) -> Duration {
        match error {
            Error::RateLimited {
                retry_after_seconds: Some(seconds),
            } => Duration::from_secs(*seconds).min(self.max_backoff),
            _ => self.calculate_backoff(attempt),
        }
    }

    /// Run `operation` until it succeeds, fails permanently, or retries run out
    pub async fn execute<F, Fut, T>(&self, operation_name: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;

        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            if !err.is_retryable() {
                debug!("{}: non-retryable error: {}", operation_name, err);
                return Err(err);
            }

            if attempt >= self.max_retries {
                warn!(
                    "{}: giving up after {} attempts: {}",
                    operation_name,
                    attempt.saturating_add(1),
                    err
                );
                return Err(err);
            }

            let delay = self.delay_for(attempt, &err);
            warn!(
                "{}: attempt {}/{} failed ({}), retrying in {:?}",
                operation_name,
                attempt + 1,
                self.max_retries.saturating_add(1),
                err,
                delay
            );
            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_RETRIES)
    }
}

impl std::fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_retries", &self.max_retries)
            .field("backoff_type", &self.backoff_type)
            .field("initial_backoff", &self.initial_backoff)
            .field("max_backoff", &self.max_backoff)
            .finish_non_exhaustive()
    }
}
