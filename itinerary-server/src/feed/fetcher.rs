//! Feed retrieval with outcome classification.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::ConsortiumMap;

use super::client::FeedTransport;
use super::error::{FeedError, UpstreamStatus};
use super::parse::{ParsedFeed, parse};

/// Downloads and parses the feed for a line.
///
/// Every failure is logged here and reported to callers as `None`, so a
/// broken provider can never fail a lookup.
pub struct FeedFetcher<T> {
    transport: T,
    consortia: Arc<ConsortiumMap>,
}

impl<T: FeedTransport> FeedFetcher<T> {
    pub fn new(transport: T, consortia: Arc<ConsortiumMap>) -> Self {
        Self {
            transport,
            consortia,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch and parse the feed for `line`, or `None` on any failure.
    pub async fn fetch(&self, line: &str) -> Option<ParsedFeed> {
        info!(line, "downloading itinerary");

        match self.try_fetch(line).await {
            Ok(parsed) => Some(parsed),
            Err(FeedError::Upstream(status)) => {
                log_upstream(line, status);
                None
            }
            Err(e) => {
                error!(line, error = ?e, "itinerary download failed");
                None
            }
        }
    }

    /// Fetch and parse, surfacing the failure reason.
    pub async fn try_fetch(&self, line: &str) -> Result<ParsedFeed, FeedError> {
        let response = self.transport.get(line).await?;

        match UpstreamStatus::from_code(response.status) {
            None => Ok(parse(&response.body, &self.consortia)),
            Some(status) => Err(FeedError::Upstream(status)),
        }
    }
}

fn log_upstream(line: &str, status: UpstreamStatus) {
    match status {
        UpstreamStatus::Moved => warn!(line, "feed provider moved the itinerary resource"),
        UpstreamStatus::NotFound => warn!(line, "feed provider has no itinerary for line"),
        UpstreamStatus::Unavailable => warn!(line, "feed provider is unavailable"),
        UpstreamStatus::Other(code) => {
            warn!(line, code, "feed provider returned an unexpected status")
        }
    }
}
