//! Itinerary cache server.
//!
//! Keeps a local store of transit itineraries (a line's path plus its
//! metadata). Lookups hit the store first and fall back to the feed
//! provider on a miss; a periodic task refreshes the collection.

pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod resolver;
pub mod schedule;
pub mod store;
pub mod web;

/// The resolver as wired by the server: file or memory store, HTTP feed.
pub type Resolver = resolver::ItineraryResolver<store::DocumentStore, feed::FeedClient>;
