// src/linkedin/fetcher.rs
//! GET with bounded backoff on HTTP 429.
//!
//! Transport and sleeping are behind traits so the retry loop can be driven
//! without a network or real delays.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ScraperConfig;
use crate::error::{FetchError, TransportError};

const STATUS_OK: u16 = 200;
const STATUS_TOO_MANY_REQUESTS: u16 = 429;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        Self::new(&config.user_agent, config.request_timeout())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

/// Where a single fetch is in its retry cycle.
#[derive(Debug)]
enum RetryState {
    Idle,
    Attempting(u32),
    Backoff(u32),
    Success(HttpResponse),
    Failed(FetchError),
    Exhausted(u32),
}

pub struct RetryingFetcher<T, S> {
    transport: T,
    sleeper: S,
    wait_interval: Duration,
}

impl<T: HttpTransport, S: Sleeper> RetryingFetcher<T, S> {
    pub fn new(transport: T, sleeper: S, wait_interval: Duration) -> Self {
        Self {
            transport,
            sleeper,
            wait_interval,
        }
    }

    /// Fetch `url`, sleeping `wait_interval` after every 429, for at most `max_retries` requests.
    ///
    /// Anything other than 200 or 429 is returned as a failure straight away.
    pub async fn fetch(&self, url: &str, max_retries: u32) -> Result<HttpResponse, FetchError> {
        let mut state = RetryState::Idle;

        loop {
            state = match state {
                RetryState::Idle => RetryState::Attempting(1),
                RetryState::Attempting(attempt) if attempt > max_retries => {
                    RetryState::Exhausted(max_retries)
                }
                RetryState::Attempting(attempt) => {
                    debug!("GET {} (attempt {}/{})", url, attempt, max_retries);
                    match self.transport.get(url).await {
                        Ok(response) if response.status == STATUS_TOO_MANY_REQUESTS => {
                            RetryState::Backoff(attempt)
                        }
                        Ok(response) if response.status == STATUS_OK => {
                            RetryState::Success(response)
                        }
                        Ok(response) => RetryState::Failed(FetchError::Status {
                            url: url.to_string(),
                            status: response.status,
                        }),
                        Err(source) => RetryState::Failed(FetchError::Transport {
                            url: url.to_string(),
                            source,
                        }),
                    }
                }
                RetryState::Backoff(attempt) => {
                    debug!(
                        "Rate limited on {}, waiting {:?} before retrying",
                        url, self.wait_interval
                    );
                    self.sleeper.sleep(self.wait_interval).await;
                    RetryState::Attempting(attempt + 1)
                }
                RetryState::Success(response) => return Ok(response),
                RetryState::Failed(err) => return Err(err),
                RetryState::Exhausted(attempts) => {
                    warn!(
                        "Repeated 429 after {} attempts, skipping {}",
                        attempts, url
                    );
                    return Err(FetchError::RetriesExhausted {
                        url: url.to_string(),
                        attempts,
                    });
                }
            };
        }
    }
}
