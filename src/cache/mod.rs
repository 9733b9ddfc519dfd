//! In-memory result cache with per-entry TTL
//!
//! Entries are keyed by a request fingerprint (see [`key_for`]) and expire
//! lazily: a stale entry is dropped the next time it is looked up, or when
//! [`ResponseCache::purge_expired`] is called. There is no size bound; the
//! cache lives as long as the client that owns it.
//!
//! Storage is a sharded [`DashMap`], so lookups for different keys do not
//! contend on a single lock.

mod key;

pub use key::{key_for, normalize_domain, normalize_email, normalize_param, normalize_phone};

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Upper bound applied to TTLs so `now + ttl` cannot overflow
const MAX_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// Cached value with its expiry
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Create an entry expiring `ttl` from now
    fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl)
            .unwrap_or_else(|| now + MAX_TTL);
        Self { value, expires_at }
    }

    /// Whether the entry is stale at `now`
    fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Thread-safe TTL cache
#[derive(Debug)]
pub struct ResponseCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Get a live value, evicting it if it has expired
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();

        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                debug!("Cache hit for key: {}", key);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!("Cache expired for key: {}", key);
            // Re-check under the write lock; a concurrent put may have refreshed it
            self.entries
                .remove_if(key, |_, entry| entry.is_expired_at(now));
        } else {
            debug!("Cache miss for key: {}", key);
        }

        None
    }

    /// Store a value for `ttl`; a zero TTL stores nothing
    pub fn put(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        if ttl.is_zero() {
            debug!("Caching disabled (zero TTL), skipping key: {}", key);
            return;
        }

        debug!("Stored in cache with key: {} (ttl {:?})", key, ttl);
        self.entries.insert(key, CacheEntry::new(value, ttl));
    }

    /// Remove an entry, returning its value if it was still live
    pub fn remove(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        self.entries
            .remove(key)
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(_, entry)| entry.value)
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before.saturating_sub(self.entries.len());
        debug!("Evicted {} expired cache entries", removed);
        removed
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, including expired ones not yet evicted
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
