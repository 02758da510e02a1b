//! Persistence for itinerary records.
//!
//! [`ItineraryStore`] is the document-store seam the resolver depends on;
//! [`DocumentStore`] is the in-process implementation, optionally backed by
//! a JSON file.

mod document;
mod error;

use std::future::Future;

use crate::domain::Itinerary;

pub use document::DocumentStore;
pub use error::StoreError;

/// An index the collection should maintain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexSpec {
    /// Single-field ascending index on `line`
    Line,
    /// Text index on `keywords`
    KeywordsText,
}

/// A collection of itinerary documents.
pub trait ItineraryStore: Send + Sync {
    /// Declare an index. Declaring the same index twice is a no-op.
    fn create_index(&self, index: IndexSpec) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// All records, or only those whose `line` equals `line`, in insertion order.
    fn find(
        &self,
        line: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Itinerary>, StoreError>> + Send;

    /// Persist a new record and return it with its assigned id.
    fn save(
        &self,
        itinerary: Itinerary,
    ) -> impl Future<Output = Result<Itinerary, StoreError>> + Send;
}

/// Declare the indexes the itinerary collection relies on.
pub async fn prepare<S: ItineraryStore>(store: &S) -> Result<(), StoreError> {
    store.create_index(IndexSpec::Line).await?;
    store.create_index(IndexSpec::KeywordsText).await
}
