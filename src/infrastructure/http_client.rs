//! HTTP client for fetching listing pages with rate limiting and error handling
//!
//! The pipeline only sees the [`PageFetcher`] trait; [`HttpClient`] is the
//! `reqwest` implementation. Non-2xx responses are errors carrying the status.

use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::{Quota, RateLimiter, clock::DefaultClock, state::InMemoryState, state::direct::NotKeyed};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::infrastructure::config::SiteConfig;

/// One GET request for a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl PageRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, query: &BTreeMap<String, String>) -> Self {
        self.query = query
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        self
    }

    /// Full URL including the encoded query, for logs and reports
    pub fn full_url(&self) -> String {
        match Url::parse(&self.url) {
            Ok(mut url) => {
                if !self.query.is_empty() {
                    url.query_pairs_mut().extend_pairs(&self.query);
                }
                url.to_string()
            }
            Err(_) => self.url.clone(),
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed with status {status}: {url}")]
    Status { status: u16, url: String },

    #[error("Failed to fetch URL {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// HTTP status of a non-2xx response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } | Self::Body { source, .. } => {
                source.status().map(|status| status.as_u16())
            }
        }
    }
}

/// Source of raw page markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, request: &PageRequest) -> Result<String, FetchError>;
}

/// HTTP client configuration for crawling
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
    pub headers: BTreeMap<String, String>,
}

impl HttpClientConfig {
    pub fn from_site(site: &SiteConfig) -> Self {
        Self {
            user_agent: site.user_agent.clone(),
            timeout_seconds: site.timeout_seconds,
            max_requests_per_second: site.max_requests_per_second,
            headers: site.headers.clone(),
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::from_site(&SiteConfig::default())
    }
}

/// Rate-limited HTTP client for respectful crawling
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );
        for (name, value) in &config.headers {
            headers.insert(
                HeaderName::from_bytes(name.as_bytes())
                    .with_context(|| format!("Invalid header name: {name}"))?,
                HeaderValue::from_str(value).with_context(|| format!("Invalid value for header {name}"))?,
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .cookie_store(true)
            .gzip(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("Failed to create HTTP client")?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second).context("Rate limit must be greater than 0")?,
        );

        Ok(Self {
            client,
            rate_limiter: RateLimiter::direct(quota),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch(&self, request: &PageRequest) -> Result<String, FetchError> {
        self.rate_limiter.until_ready().await;

        let full_url = request.full_url();
        info!("Fetching URL: {}", full_url);

        let response = self
            .client
            .get(&request.url)
            .query(&request.query)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: full_url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: full_url,
            });
        }

        let text = response.text().await.map_err(|source| FetchError::Body {
            url: full_url.clone(),
            source,
        })?;

        debug!("Successfully fetched: {} ({} chars)", full_url, text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_encodes_query() {
        let query = BTreeMap::from([
            ("ar".to_string(), "030".to_string()),
            ("bs".to_string(), "040".to_string()),
        ]);
        let request = PageRequest::new("https://suumo.jp/jj/chintai/ichiran/FR301FC001/").with_query(&query);
        assert_eq!(
            request.full_url(),
            "https://suumo.jp/jj/chintai/ichiran/FR301FC001/?ar=030&bs=040"
        );
    }

    #[test]
    fn test_client_rejects_zero_rate_limit() {
        let config = HttpClientConfig {
            max_requests_per_second: 0,
            ..HttpClientConfig::default()
        };
        assert!(HttpClient::new(config).is_err());
    }

    #[test]
    fn test_status_error_exposes_code() {
        let err = FetchError::Status {
            status: 503,
            url: "https://suumo.jp".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "HTTP request failed with status 503: https://suumo.jp");
    }
}
