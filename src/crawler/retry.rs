//! Bounded retry with exponential backoff for page fetches
//!
//! Only transient failures (see [`FetchError::is_retriable`]) are retried.
//! Everything else is returned on the first attempt.

use crate::config::FetcherConfig;
use crate::FetchError;
use std::future::Future;
use std::time::Duration;

/// How many extra attempts a fetch gets, and how long to wait between them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure; 0 disables retries
    pub max_retries: u32,

    /// Delay before the first retry; doubled for each further one
    pub backoff_base: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_base: Duration::ZERO,
        }
    }

    pub fn from_config(config: &FetcherConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_base: config.backoff_base(),
        }
    }

    /// Delay before retry number `attempt` (0-based): `base * 2^attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(1u32 << attempt.min(16))
    }
}

/// Executes `operation`, retrying transient errors with exponential backoff
///
/// # Backoff schedule (example with a 500 ms base)
///
/// | Attempt | Sleep before next attempt |
/// |---------|--------------------------|
/// | 0 (initial) | - |
/// | 1 (first retry) | 500 ms |
/// | 2 (second retry) | 1 s |
/// | 3 (third retry) | 2 s |
///
/// With `max_retries = 2` the operation runs at most 3 times.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !err.is_retriable() || attempt >= policy.max_retries {
            return Err(err);
        }

        let delay = policy.delay_for(attempt);
        tracing::warn!(
            attempt = attempt + 1,
            max_retries = policy.max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Transient fetch error, retrying after backoff"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
