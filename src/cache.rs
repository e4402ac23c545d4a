//! Time-bounded cache of street lists per (restaurant, ZIP).
//!
//! Entries are shared behind `parking_lot::RwLock` so lookups from concurrent
//! requests proceed in parallel; only inserts and evictions take the write lock.
//!
//! # Expiry
//!
//! An entry whose age is greater than or equal to the TTL is treated as absent
//! and removed on the read that discovers it. There is no background sweeper;
//! [`CandidateCache::purge_expired`] exists for callers that want one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::Serialize;

use crate::records::StreetRecord;

/// Default lifetime of a cached street list.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

#[derive(Debug)]
struct CacheEntry {
    streets: Arc<[StreetRecord]>,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}

/// Hit/miss counters, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Cache key for one restaurant/ZIP pair.
#[must_use]
pub fn cache_key(restaurant_id: &str, zip_code: &str) -> String {
    format!("{restaurant_id}#{zip_code}")
}

/// Thread-safe TTL cache of street lists.
///
/// Cloning is cheap and clones share the same entries.
#[derive(Debug, Clone)]
pub struct CandidateCache {
    inner: Arc<RwLock<AHashMap<String, CacheEntry>>>,
    ttl: Duration,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl Default for CandidateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateCache {
    /// Cache with the default ten-minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AHashMap::new())),
            ttl,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached streets for the pair, if present and still fresh.
    ///
    /// Acquires a shared read lock; an expired entry is then evicted under
    /// the write lock.
    pub fn get(&self, restaurant_id: &str, zip_code: &str) -> Option<Arc<[StreetRecord]>> {
        let key = cache_key(restaurant_id, zip_code);

        let expired = {
            let map = self.inner.read();
            match map.get(&key) {
                Some(entry) if !entry.is_expired(self.ttl) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(Arc::clone(&entry.streets));
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            let mut map = self.inner.write();
            // a concurrent put may have refreshed the entry in between
            if map.get(&key).is_some_and(|e| e.is_expired(self.ttl)) {
                map.remove(&key);
                tracing::debug!(key = %key, "evicted expired street list");
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store (or replace) the streets for the pair. Last writer wins.
    pub fn put(&self, restaurant_id: &str, zip_code: &str, streets: Vec<StreetRecord>) -> Arc<[StreetRecord]> {
        let streets: Arc<[StreetRecord]> = streets.into();
        let key = cache_key(restaurant_id, zip_code);
        tracing::debug!(key = %key, count = streets.len(), "cached street list");
        self.inner.write().insert(
            key,
            CacheEntry {
                streets: Arc::clone(&streets),
                inserted_at: Instant::now(),
            },
        );
        streets
    }

    /// Drop the entry for one pair. Returns whether anything was removed.
    pub fn invalidate(&self, restaurant_id: &str, zip_code: &str) -> bool {
        self.inner
            .write()
            .remove(&cache_key(restaurant_id, zip_code))
            .is_some()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Remove every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut map = self.inner.write();
        let before = map.len();
        map.retain(|_, entry| !entry.is_expired(self.ttl));
        before - map.len()
    }

    /// Number of stored entries, expired ones included until evicted.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
