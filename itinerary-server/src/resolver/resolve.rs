//! Cache-aside itinerary resolution.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::domain::Itinerary;
use crate::feed::{FeedFetcher, FeedTransport, ParsedFeed};
use crate::store::{ItineraryStore, StoreError};

/// How long an idle per-line fetch lock is kept. Must outlast any single
/// fetch-and-save, or a late caller could start a second download.
const IN_FLIGHT_IDLE: Duration = Duration::from_secs(10 * 60);

/// Upper bound on tracked per-line locks.
const IN_FLIGHT_CAPACITY: u64 = 10_000;

/// Outcome of [`ItineraryResolver::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Every stored itinerary (no line requested)
    All(Vec<Itinerary>),
    /// The itinerary for the requested line
    One(Itinerary),
}

/// Resolves itineraries from the store, falling back to the feed provider.
///
/// A stored record is always authoritative. On a miss the feed is fetched,
/// parsed and saved exactly once; concurrent misses on the same line wait
/// for the first download instead of starting their own. Feed failures
/// produce an unsaved placeholder, while store failures propagate.
pub struct ItineraryResolver<S, T> {
    store: S,
    fetcher: FeedFetcher<T>,
    in_flight: MokaCache<String, Arc<Mutex<()>>>,
}

impl<S: ItineraryStore, T: FeedTransport> ItineraryResolver<S, T> {
    pub fn new(store: S, fetcher: FeedFetcher<T>) -> Self {
        let in_flight = MokaCache::builder()
            .time_to_idle(IN_FLIGHT_IDLE)
            .max_capacity(IN_FLIGHT_CAPACITY)
            .build();

        Self {
            store,
            fetcher,
            in_flight,
        }
    }

    /// Every stored itinerary when `line` is `None`, otherwise the one for `line`.
    pub async fn resolve(&self, line: Option<&str>) -> Result<Resolution, StoreError> {
        match line {
            None => self.all().await.map(Resolution::All),
            Some(line) => self.line(line).await.map(Resolution::One),
        }
    }

    /// Every stored itinerary, unfiltered.
    pub async fn all(&self) -> Result<Vec<Itinerary>, StoreError> {
        info!("retrieving itineraries");
        self.store.find(None).await
    }

    /// The itinerary for `line`, downloading and storing it on a miss.
    pub async fn line(&self, line: &str) -> Result<Itinerary, StoreError> {
        info!(line, "searching itinerary");

        if let Some(found) = self.lookup(line).await? {
            return Ok(found);
        }

        let lock = self
            .in_flight
            .get_with(line.to_string(), async { Arc::new(Mutex::new(())) })
            .await;
        let _guard = lock.lock().await;

        // Another caller may have stored it while we waited
        if let Some(found) = self.lookup(line).await? {
            return Ok(found);
        }

        let Some(itinerary) = self
            .fetcher
            .fetch(line)
            .await
            .and_then(ParsedFeed::into_itinerary)
        else {
            return Ok(Itinerary::placeholder(line));
        };

        let saved = self.store.save(itinerary).await?;
        info!(line = saved.line(), id = ?saved.id(), "itinerary stored");
        Ok(saved)
    }

    /// Top-level refresh: list the stored itineraries.
    ///
    /// Failures are logged so a periodic caller keeps running.
    pub async fn refresh(&self) {
        match self.all().await {
            Ok(itineraries) => info!(count = itineraries.len(), "itineraries refreshed"),
            Err(e) => error!(error = %e, "itinerary refresh failed"),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn lookup(&self, line: &str) -> Result<Option<Itinerary>, StoreError> {
        Ok(self.store.find(Some(line)).await?.into_iter().next())
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
