//! Memoization of engine results.
//!
//! The cache is keyed by a SHA-256 fingerprint of the operation, its
//! options, and the trimmed input. It holds at most `capacity` entries and
//! evicts the least recently used one when full. Each computed (missed)
//! value records its latency in a bounded log.
//!
//! Values are computed outside the lock, so two threads missing on the same
//! key may both compute it. The results are identical and the second insert
//! simply overwrites the first.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::EngineError;
use crate::model::{Flashcard, Operation};

/// Default maximum number of cached results.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Default number of latency samples kept.
pub const DEFAULT_LATENCY_LOG_CAPACITY: usize = 1024;

/// Stable identifier for one `(operation, input, options)` combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn compute(operation: Operation, input: &str, options: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(operation.id().as_bytes());
        hasher.update([0u8]);
        hasher.update(options.as_bytes());
        hasher.update([0u8]);
        hasher.update(input.trim().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stored engine output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    Text(String),
    Flashcards(Vec<Flashcard>),
}

/// Types the cache can store and hand back.
pub trait CacheValue: Clone {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: &CachedValue) -> Option<Self>;
}

impl CacheValue for String {
    fn into_cached(self) -> CachedValue {
        CachedValue::Text(self)
    }

    fn from_cached(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::Text(s) => Some(s.clone()),
            CachedValue::Flashcards(_) => None,
        }
    }
}

impl CacheValue for Vec<Flashcard> {
    fn into_cached(self) -> CachedValue {
        CachedValue::Flashcards(self)
    }

    fn from_cached(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::Flashcards(cards) => Some(cards.clone()),
            CachedValue::Text(_) => None,
        }
    }
}

/// One latency measurement for a computed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySample {
    pub operation: Operation,
    pub micros: u64,
    pub recorded_at: DateTime<Utc>,
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Mean latency of all computed results, in microseconds.
    pub average_latency_us: u64,
}

#[derive(Debug)]
struct CacheEntry {
    value: CachedValue,
    created_at: DateTime<Utc>,
    last_access: u64,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<Fingerprint, CacheEntry>,
    latencies: VecDeque<LatencySample>,
    clock: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
    computed: u64,
    total_latency_us: u64,
}

impl CacheInner {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_lru(&mut self) {
        if let Some(key) = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| key.clone())
        {
            if let Some(entry) = self.entries.remove(&key) {
                self.evictions += 1;
                let age_ms = (Utc::now() - entry.created_at).num_milliseconds();
                tracing::debug!(key = key.as_str(), age_ms, "evicted cache entry");
            }
        }
    }
}

/// Bounded, thread-safe memo table for engine results.
pub struct ResponseCache {
    capacity: usize,
    latency_log_capacity: usize,
    inner: Mutex<CacheInner>,
}

impl ResponseCache {
    /// A capacity of 0 disables storage; latency is still recorded.
    pub fn new(capacity: usize, latency_log_capacity: usize) -> Self {
        Self {
            capacity,
            latency_log_capacity,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, DEFAULT_LATENCY_LOG_CAPACITY)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return the cached value for `(operation, input, options)`, computing
    /// and storing it on a miss.
    pub fn memoize<T, F>(
        &self,
        operation: Operation,
        input: &str,
        options: &str,
        compute: F,
    ) -> Result<T, EngineError>
    where
        T: CacheValue,
        F: FnOnce() -> Result<T, EngineError>,
    {
        let key = Fingerprint::compute(operation, input, options);
        if let Some(hit) = self.lookup::<T>(&key) {
            tracing::trace!(%operation, key = key.as_str(), "cache hit");
            return Ok(hit);
        }

        let start = Instant::now();
        let value = compute()?;
        let elapsed = start.elapsed();
        tracing::debug!(
            %operation,
            micros = elapsed.as_micros() as u64,
            "computed uncached result"
        );
        self.store(key, operation, value.clone().into_cached(), elapsed);
        Ok(value)
    }

    fn lookup<T: CacheValue>(&self, key: &Fingerprint) -> Option<T> {
        let mut inner = self.inner.lock();
        let now = inner.tick();
        let found = inner.entries.get_mut(key).and_then(|entry| {
            entry.last_access = now;
            T::from_cached(&entry.value)
        });
        match found {
            Some(_) => inner.hits += 1,
            None => inner.misses += 1,
        }
        found
    }

    fn store(&self, key: Fingerprint, operation: Operation, value: CachedValue, elapsed: Duration) {
        let micros = elapsed.as_micros().min(u64::MAX as u128) as u64;
        let mut inner = self.inner.lock();

        inner.computed += 1;
        inner.total_latency_us = inner.total_latency_us.saturating_add(micros);
        if self.latency_log_capacity > 0 {
            if inner.latencies.len() >= self.latency_log_capacity {
                inner.latencies.pop_front();
            }
            inner.latencies.push_back(LatencySample {
                operation,
                micros,
                recorded_at: Utc::now(),
            });
        }

        if self.capacity == 0 {
            return;
        }
        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.capacity {
            inner.evict_lru();
        }
        let now = inner.tick();
        inner.entries.insert(
            key,
            CacheEntry {
                value,
                created_at: Utc::now(),
                last_access: now,
            },
        );
    }

    /// Whether a result for this combination is currently stored.
    pub fn contains(&self, operation: Operation, input: &str, options: &str) -> bool {
        let key = Fingerprint::compute(operation, input, options);
        self.inner.lock().entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries. Counters and the latency log are kept.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            entries: inner.entries.len(),
            capacity: self.capacity,
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
            average_latency_us: if inner.computed > 0 {
                inner.total_latency_us / inner.computed
            } else {
                0
            },
        }
    }

    /// Most recent latency samples, oldest first.
    pub fn recent_latencies(&self) -> Vec<LatencySample> {
        self.inner.lock().latencies.iter().cloned().collect()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY, DEFAULT_LATENCY_LOG_CAPACITY)
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("capacity", &self.capacity)
            .field("latency_log_capacity", &self.latency_log_capacity)
            .field("entries", &self.len())
            .finish()
    }
}
