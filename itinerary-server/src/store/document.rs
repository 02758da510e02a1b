//! In-process document store for itineraries.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use super::error::StoreError;
use super::{IndexSpec, ItineraryStore};
use crate::domain::Itinerary;

/// On-disk shape of the collection.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredCollection {
    /// Id the next saved record receives.
    next_id: u64,
    records: Vec<Itinerary>,
}

#[derive(Debug, Default)]
struct Collection {
    next_id: u64,
    records: Vec<Itinerary>,
    indexes: HashSet<IndexSpec>,
    /// Positions in `records` per line; maintained once `IndexSpec::Line` is declared.
    by_line: HashMap<String, Vec<usize>>,
}

impl Collection {
    fn from_stored(stored: StoredCollection) -> Self {
        let next_id = stored.records.iter().filter_map(Itinerary::id).max().unwrap_or(0) + 1;
        Self {
            next_id: stored.next_id.max(next_id),
            records: stored.records,
            ..Self::default()
        }
    }

    fn index_line(&mut self, position: usize) {
        let line = self.records[position].line().to_string();
        self.by_line.entry(line).or_default().push(position);
    }

    fn find(&self, line: Option<&str>) -> Vec<Itinerary> {
        let Some(line) = line else {
            return self.records.clone();
        };

        if self.indexes.contains(&IndexSpec::Line) {
            self.by_line
                .get(line)
                .map(|positions| positions.iter().map(|&i| self.records[i].clone()).collect())
                .unwrap_or_default()
        } else {
            self.records
                .iter()
                .filter(|it| it.line() == line)
                .cloned()
                .collect()
        }
    }
}

/// Thread-safe itinerary collection.
///
/// Records live in memory. When opened with a path, the collection is
/// loaded from that JSON file and the file is rewritten after every save.
#[derive(Clone)]
pub struct DocumentStore {
    inner: Arc<RwLock<Collection>>,
    path: Option<PathBuf>,
}

impl DocumentStore {
    /// Create an empty store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collection {
                next_id: 1,
                ..Collection::default()
            })),
            path: None,
        }
    }

    /// Open a file-backed store, loading existing records if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let stored = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoredCollection::default(),
            Err(e) => return Err(StoreError::io("failed to read store file", e)),
        };

        Ok(Self {
            inner: Arc::new(RwLock::new(Collection::from_stored(stored))),
            path: Some(path),
        })
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }

    /// Indexes declared so far.
    pub async fn indexes(&self) -> HashSet<IndexSpec> {
        self.inner.read().await.indexes.clone()
    }

    fn persist(&self, collection: &Collection) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::io("failed to create store directory", e))?;
        }

        let stored = StoredCollection {
            next_id: collection.next_id,
            records: collection.records.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)?;

        std::fs::write(path, json).map_err(|e| StoreError::io("failed to write store file", e))
    }
}

impl ItineraryStore for DocumentStore {
    async fn create_index(&self, index: IndexSpec) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        if !guard.indexes.insert(index) {
            return Ok(());
        }

        if index == IndexSpec::Line {
            guard.by_line.clear();
            for position in 0..guard.records.len() {
                guard.index_line(position);
            }
        }
        debug!(?index, "index created");
        Ok(())
    }

    async fn find(&self, line: Option<&str>) -> Result<Vec<Itinerary>, StoreError> {
        let guard = self.inner.read().await;
        Ok(guard.find(line))
    }

    async fn save(&self, itinerary: Itinerary) -> Result<Itinerary, StoreError> {
        let mut guard = self.inner.write().await;

        let saved = itinerary.with_id(guard.next_id);
        guard.records.push(saved.clone());
        guard.next_id += 1;

        if let Err(e) = self.persist(&guard) {
            guard.records.pop();
            guard.next_id -= 1;
            return Err(e);
        }

        if guard.indexes.contains(&IndexSpec::Line) {
            let position = guard.records.len() - 1;
            guard.index_line(position);
        }
        Ok(saved)
    }
}
