//! Content-addressed memoization for timeline computations.
//!
//! Keys are derived from the post set itself (see [`post_set_key`]), so the
//! same logical set of posts maps to the same entry regardless of traversal
//! order, and any add, edit, or delete yields a new key. Entries expire after
//! a TTL measured from insertion; reads never refresh an entry's age. When
//! full, the entry with the oldest `stored_at` is evicted.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::post::types::{Millis, Post, MINUTE_MS};

use super::clock::Clock;
use super::types::TimeRange;

pub const DEFAULT_CACHE_TTL: Millis = 5.0 * MINUTE_MS;
pub const DEFAULT_CACHE_MAX_SIZE: usize = 100;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Streaming FNV-1a (64-bit).
struct Fnv1a(u64);

impl Fnv1a {
    fn new() -> Self {
        Self(FNV_OFFSET_BASIS)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= u64::from(b);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Order-independent key for a post set, over `(id, created_at, updated_at)`.
pub fn post_set_key(posts: &[Post]) -> String {
    let mut triples: Vec<(&str, u64, u64)> = posts
        .iter()
        .map(|p| (p.id.as_str(), p.created_at.to_bits(), p.updated_at.to_bits()))
        .collect();
    triples.sort_unstable();

    let mut hasher = Fnv1a::new();
    for (id, created, updated) in triples {
        hasher.write(&(id.len() as u64).to_le_bytes());
        hasher.write(id.as_bytes());
        hasher.write(&created.to_le_bytes());
        hasher.write(&updated.to_le_bytes());
    }
    format!("{:016x}", hasher.finish())
}

/// Key for markers computed from a post set over a specific range.
pub fn marker_key(posts_key: &str, range: &TimeRange) -> String {
    format!(
        "{posts_key}:{:016x}:{:016x}",
        range.start.to_bits(),
        range.end.to_bits()
    )
}

/// Lifetime and bound for a [`ComputationCache`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheConfig {
    /// Maximum age in milliseconds before an entry reads as a miss.
    pub ttl: Millis,
    /// Maximum number of entries held at once.
    pub max_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
            max_size: DEFAULT_CACHE_MAX_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub key: String,
    pub value: T,
    pub stored_at: Millis,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    expirations: AtomicU64,
}

/// Snapshot of cache activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

/// Bounded TTL cache keyed by content hashes.
///
/// All methods take `&self`; the map sits behind one mutex so the cache can
/// be shared with a background sweeper.
pub struct ComputationCache<T> {
    name: &'static str,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    counters: Counters,
}

impl<T: Clone> ComputationCache<T> {
    pub fn new(name: &'static str, config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            name,
            config,
            clock,
            entries: Mutex::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        // A panic mid-update can at worst leave a stale entry, which TTL and
        // content keys already tolerate.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn is_fresh(&self, entry: &CacheEntry<T>, now: Millis) -> bool {
        now - entry.stored_at <= self.config.ttl
    }

    /// Cached value for `key`, if present and younger than the TTL. An
    /// expired entry is removed.
    pub fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let mut entries = self.lock();

        let fresh = match entries.get(key) {
            Some(entry) => self.is_fresh(entry, now),
            None => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(cache = self.name, key, "cache miss");
                return None;
            }
        };

        if !fresh {
            entries.remove(key);
            self.counters.expirations.fetch_add(1, Ordering::Relaxed);
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(cache = self.name, key, "cache entry expired");
            return None;
        }

        self.counters.hits.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(cache = self.name, key, "cache hit");
        entries.get(key).map(|e| e.value.clone())
    }

    /// Store `value` under `key`, evicting the oldest entry if a new key would
    /// exceed capacity. Overwriting an existing key resets its age.
    pub fn set(&self, key: impl Into<String>, value: T) {
        if self.config.max_size == 0 {
            return;
        }
        let key = key.into();
        let now = self.clock.now();
        let mut entries = self.lock();

        if !entries.contains_key(&key) && entries.len() >= self.config.max_size {
            let oldest = entries
                .values()
                .min_by(|a, b| a.stored_at.total_cmp(&b.stored_at))
                .map(|e| e.key.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                self.counters.evictions.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(cache = self.name, key = %oldest, "evicted oldest entry");
            }
        }

        entries.insert(
            key.clone(),
            CacheEntry {
                key,
                value,
                stored_at: now,
            },
        );
    }

    /// Return the cached value or compute, store, and return it.
    pub fn get_or_insert_with(&self, key: &str, compute: impl FnOnce() -> T) -> T {
        if let Some(hit) = self.get(key) {
            return hit;
        }
        let value = compute();
        self.set(key, value.clone());
        value
    }

    /// Drop every entry.
    pub fn invalidate_all(&self) {
        let mut entries = self.lock();
        let dropped = entries.len();
        entries.clear();
        tracing::debug!(cache = self.name, dropped, "cache invalidated");
    }

    /// Remove all expired entries. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, e| now - e.stored_at <= self.config.ttl);
        let removed = before - entries.len();
        if removed > 0 {
            self.counters
                .expirations
                .fetch_add(removed as u64, Ordering::Relaxed);
            tracing::debug!(cache = self.name, removed, "swept expired entries");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
            expirations: self.counters.expirations.load(Ordering::Relaxed),
        }
    }
}
