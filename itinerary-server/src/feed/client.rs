//! Itinerary feed HTTP client.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderMap, HeaderValue};

use super::error::FeedError;

/// Token in the path template replaced by the line id.
pub const LINE_PLACEHOLDER: &str = "$$";

/// Default path template for itinerary downloads.
const DEFAULT_ITINERARY_PATH: &str = "/dadosAbertos/itinerario/$$.csv";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Provider host, optionally with a port
    pub host: String,
    /// Path template containing [`LINE_PLACEHOLDER`]
    pub itinerary_path: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a new config for the given host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            itinerary_path: DEFAULT_ITINERARY_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the itinerary path template.
    pub fn with_itinerary_path(mut self, path: impl Into<String>) -> Self {
        self.itinerary_path = path.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Download URL for a line.
    pub fn itinerary_url(&self, line: &str) -> String {
        format!(
            "http://{}{}",
            self.host,
            self.itinerary_path.replace(LINE_PLACEHOLDER, line)
        )
    }
}

/// A raw answer from the feed provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    pub status: u16,
    pub body: String,
}

/// Something that can download the raw feed for a line.
pub trait FeedTransport: Send + Sync {
    /// Request the feed for `line`.
    ///
    /// Only transport failures are errors; every HTTP status is returned
    /// as a [`FeedResponse`].
    fn get(&self, line: &str) -> impl Future<Output = Result<FeedResponse, FeedError>> + Send;
}

/// HTTP client for the itinerary feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    config: FeedConfig,
}

impl FeedClient {
    /// Create a new feed client.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        // Redirects are reported, not followed
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }
}

impl FeedTransport for FeedClient {
    async fn get(&self, line: &str) -> Result<FeedResponse, FeedError> {
        let url = self.config.itinerary_url(line);

        let response = self.http.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(FeedResponse { status, body })
    }
}
