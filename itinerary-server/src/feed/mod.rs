//! Itinerary feed provider access.
//!
//! The provider publishes one CSV document per line. [`FeedClient`] does the
//! HTTP work, [`parse`] turns a body into itinerary fields and
//! [`FeedFetcher`] ties the two together, absorbing every failure.

mod client;
mod error;
mod fetcher;
mod parse;

pub use client::{FeedClient, FeedConfig, FeedResponse, FeedTransport, LINE_PLACEHOLDER};
pub use error::{FeedError, UpstreamStatus};
pub use fetcher::FeedFetcher;
pub use parse::{FeedRow, ParsedFeed, build_keywords, parse};

#[cfg(test)]
pub(crate) use fetcher::testing;
