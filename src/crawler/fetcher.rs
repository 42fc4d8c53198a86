//! Page fetching
//!
//! This module defines the [`PageFetcher`] contract the orchestrator consumes
//! and its HTTP implementation, [`HttpSession`]:
//! - Building the HTTP client with the configured user agent
//! - Polling a page until its landmark element is present or the wait bound elapses
//! - A settle delay after readiness
//! - Retry with backoff for transient failures
//! - Error classification

use crate::config::FetcherConfig;
use crate::crawler::landmark::Landmark;
use crate::crawler::retry::{retry_with_backoff, RetryPolicy};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use url::Url;

/// Something that can deliver a page's rendered markup
///
/// Implementations block (asynchronously) until `landmark` is present in the
/// page or `wait` has elapsed. Any failure is reported as a [`FetchError`];
/// callers treat it as "page unavailable".
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, landmark: &Landmark, wait: Duration)
        -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// The run-wide fetching session
///
/// One session is opened per run and shared by reference with every fetch.
/// It is released exactly once, either through [`close`](Self::close) or when
/// it goes out of scope.
pub struct HttpSession {
    client: Client,
    settle: Duration,
    poll_interval: Duration,
    retry: RetryPolicy,
    requests: AtomicU64,
}

impl HttpSession {
    /// Acquires the session
    pub fn open(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        tracing::debug!("Fetch session opened (user agent: {})", config.user_agent);

        Ok(Self {
            client,
            settle: config.settle_delay(),
            poll_interval: config.poll_interval(),
            retry: RetryPolicy::from_config(config),
            requests: AtomicU64::new(0),
        })
    }

    /// Number of HTTP requests issued so far
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Releases the session
    pub fn close(self) {
        drop(self);
    }

    /// Issues one GET and returns the body of a 2xx response
    async fn get(&self, url: &Url) -> Result<String, FetchError> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        let started = Instant::now();

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::trace!("GET {} -> {} in {:?}", url, status, started.elapsed());

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })
    }

    /// Polls `url` until `landmark` appears or `wait` runs out
    async fn wait_for_landmark(
        &self,
        url: &Url,
        landmark: &Landmark,
        wait: Duration,
    ) -> Result<String, FetchError> {
        let started = Instant::now();

        loop {
            let markup = self.get(url).await?;
            if landmark.is_present(&markup) {
                return Ok(markup);
            }

            let waited = started.elapsed();
            if waited + self.poll_interval >= wait {
                return Err(FetchError::LandmarkMissing {
                    url: url.to_string(),
                    landmark: landmark.to_string(),
                    waited,
                });
            }

            tracing::trace!("Landmark {} not yet on {}, polling again", landmark, url);
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl PageFetcher for HttpSession {
    async fn fetch(
        &self,
        url: &Url,
        landmark: &Landmark,
        wait: Duration,
    ) -> Result<String, FetchError> {
        tracing::debug!("Fetching {}", url);

        let bounded = async {
            retry_with_backoff(self.retry, || self.wait_for_landmark(url, landmark, wait)).await
        };

        // Slow responses count against the wait bound too; retries get their
        // own wait bound each.
        let budget = wait
            .saturating_mul(self.retry.max_retries.saturating_add(1))
            .saturating_add(self.retry.delay_for(self.retry.max_retries));
        let markup = match tokio::time::timeout(budget, bounded).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(FetchError::LandmarkMissing {
                    url: url.to_string(),
                    landmark: landmark.to_string(),
                    waited: budget,
                })
            }
        };

        if !self.settle.is_zero() {
            tokio::time::sleep(self.settle).await;
        }

        Ok(markup)
    }
}

impl Drop for HttpSession {
    fn drop(&mut self) {
        tracing::debug!(
            "Fetch session released after {} requests",
            self.request_count()
        );
    }
}
