//! Entry store
//!
//! Client-side cache of the remote mood entries. The cache is only ever
//! replaced wholesale by [`EntryStore::refresh`]; nothing else writes to it.

use crate::error::Result;
use crate::gateway::{EntryGateway, EntryId, MoodEntry};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct EntryCache {
    entries: Vec<MoodEntry>,
    /// Sequence number of the fetch currently held
    applied: u64,
}

/// Cache of the most recently fetched entries
pub struct EntryStore {
    gateway: Arc<dyn EntryGateway>,
    cache: Mutex<EntryCache>,
    issued: AtomicU64,
}

impl EntryStore {
    pub fn new(gateway: Arc<dyn EntryGateway>) -> Self {
        Self {
            gateway,
            cache: Mutex::new(EntryCache::default()),
            issued: AtomicU64::new(0),
        }
    }

    /// Fetch the full entry list and replace the cache with it.
    ///
    /// On failure the cache keeps its previous contents. A fetch that
    /// completes after a newer one has already been applied is dropped.
    pub async fn refresh(&self) -> Result<()> {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let entries = match self.gateway.list_entries().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Error fetching moods: {}", e);
                return Err(e);
            }
        };

        let mut cache = self.cache.lock().await;
        if seq <= cache.applied {
            tracing::debug!(
                "Discarding stale entry list #{} (holding #{})",
                seq,
                cache.applied
            );
            return Ok(());
        }

        tracing::debug!("Entry cache replaced with {} entries (#{})", entries.len(), seq);
        cache.entries = entries;
        cache.applied = seq;

        Ok(())
    }

    /// Cached entries, in the order the remote returned them
    pub async fn list(&self) -> Vec<MoodEntry> {
        self.cache.lock().await.entries.clone()
    }

    pub async fn get(&self, id: EntryId) -> Option<MoodEntry> {
        self.cache
            .lock()
            .await
            .entries
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.lock().await.entries.is_empty()
    }
}
