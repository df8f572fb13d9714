// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Short-TTL key/value, hash, and sorted-set cache (spec §4.6).
//!
//! The in-memory implementation is the only backend this core ships: a
//! distributed backend is out of scope, so `InMemoryCache` also serves as
//! the fallback a distributed deployment would need when unreachable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

#[async_trait]
pub trait Cache: Send + Sync + 'static {
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()>;
    async fn delete(&self, key: &str) -> CacheResult<()>;

    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<String>>;
    async fn hset(&self, key: &str, field: &str, value: String) -> CacheResult<()>;
    /// Increment `field` by `delta`, creating it at 0 first if absent, and
    /// return the new value.
    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> CacheResult<i64>;
    /// Apply a TTL to a hash key as a whole (the hash equivalent of `set`'s
    /// `ttl` parameter, since individual hash fields don't carry their own).
    async fn expire(&self, key: &str, ttl: Duration) -> CacheResult<()>;

    /// Insert `member` into the sorted set at `key` with `score`.
    async fn zadd(&self, key: &str, member: String, score: f64) -> CacheResult<()>;
    /// Members in `key` ordered by ascending score.
    async fn zrange(&self, key: &str) -> CacheResult<Vec<String>>;
}

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    expires_at: Option<DateTime<Utc>>,
}

impl<T> Entry<T> {
    fn expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }
}

#[derive(Default)]
struct Tables {
    strings: std::collections::HashMap<String, Entry<String>>,
    hashes: std::collections::HashMap<String, std::collections::HashMap<String, String>>,
    hash_expirations: std::collections::HashMap<String, DateTime<Utc>>,
    sorted_sets: std::collections::HashMap<String, BTreeMap<(ordered_score::OrderedF64, String), ()>>,
}

impl Tables {
    fn sweep_hash(&mut self, key: &str, now: DateTime<Utc>) {
        if matches!(self.hash_expirations.get(key), Some(at) if *at <= now) {
            self.hashes.remove(key);
            self.hash_expirations.remove(key);
        }
    }
}

/// Wraps `f64` so sorted-set members can be ordered in a `BTreeMap`; NaN
/// scores are never produced by this cache's callers (ms timestamps and
/// counters only).
mod ordered_score {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct OrderedF64(pub f64);

    impl Eq for OrderedF64 {}
    impl PartialOrd for OrderedF64 {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for OrderedF64 {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.0.partial_cmp(&other.0).unwrap_or(std::cmp::Ordering::Equal)
        }
    }
}
use ordered_score::OrderedF64;

/// `parking_lot::Mutex`-guarded in-process cache. Expired entries are swept
/// lazily on read rather than by a background task, matching the
/// request-scoped read patterns every caller in this core exercises.
#[derive(Default)]
pub struct InMemoryCache {
    tables: parking_lot::Mutex<Tables>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = self.now();
        let mut tables = self.tables.lock();
        match tables.strings.get(key) {
            Some(entry) if entry.expired(now) => {
                tables.strings.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()> {
        let expires_at = ttl.and_then(|d| chrono::Duration::from_std(d).ok()).map(|d| self.now() + d);
        self.tables.lock().strings.insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let mut tables = self.tables.lock();
        tables.strings.remove(key);
        tables.hashes.remove(key);
        tables.hash_expirations.remove(key);
        tables.sorted_sets.remove(key);
        Ok(())
    }

    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<String>> {
        let now = self.now();
        let mut tables = self.tables.lock();
        tables.sweep_hash(key, now);
        Ok(tables.hashes.get(key).and_then(|h| h.get(field)).cloned())
    }

    async fn hset(&self, key: &str, field: &str, value: String) -> CacheResult<()> {
        let now = self.now();
        let mut tables = self.tables.lock();
        tables.sweep_hash(key, now);
        tables.hashes.entry(key.to_string()).or_default().insert(field.to_string(), value);
        Ok(())
    }

    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> CacheResult<i64> {
        let now = self.now();
        let mut tables = self.tables.lock();
        tables.sweep_hash(key, now);
        let hash = tables.hashes.entry(key.to_string()).or_default();
        let current: i64 = hash.get(field).and_then(|v| v.parse().ok()).unwrap_or(0);
        let next = current + delta;
        hash.insert(field.to_string(), next.to_string());
        Ok(next)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> CacheResult<()> {
        let expires_at = chrono::Duration::from_std(ttl).ok().map(|d| self.now() + d);
        let mut tables = self.tables.lock();
        match expires_at {
            Some(at) => {
                tables.hash_expirations.insert(key.to_string(), at);
            }
            None => {
                tables.hash_expirations.remove(key);
            }
        }
        Ok(())
    }

    async fn zadd(&self, key: &str, member: String, score: f64) -> CacheResult<()> {
        self.tables
            .lock()
            .sorted_sets
            .entry(key.to_string())
            .or_default()
            .insert((OrderedF64(score), member), ());
        Ok(())
    }

    async fn zrange(&self, key: &str) -> CacheResult<Vec<String>> {
        Ok(self
            .tables
            .lock()
            .sorted_sets
            .get(key)
            .map(|set| set.keys().map(|(_, member)| member.clone()).collect())
            .unwrap_or_default())
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::{Cache, CacheResult};
    use async_trait::async_trait;

    /// No-op cache for tests that don't care about cache behavior at all.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct NullCache;

    #[async_trait]
    impl Cache for NullCache {
        async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
            Ok(None)
        }
        async fn set(&self, _key: &str, _value: String, _ttl: Option<std::time::Duration>) -> CacheResult<()> {
            Ok(())
        }
        async fn delete(&self, _key: &str) -> CacheResult<()> {
            Ok(())
        }
        async fn hget(&self, _key: &str, _field: &str) -> CacheResult<Option<String>> {
            Ok(None)
        }
        async fn hset(&self, _key: &str, _field: &str, _value: String) -> CacheResult<()> {
            Ok(())
        }
        async fn hincrby(&self, _key: &str, _field: &str, delta: i64) -> CacheResult<i64> {
            Ok(delta)
        }
        async fn expire(&self, _key: &str, _ttl: std::time::Duration) -> CacheResult<()> {
            Ok(())
        }
        async fn zadd(&self, _key: &str, _member: String, _score: f64) -> CacheResult<()> {
            Ok(())
        }
        async fn zrange(&self, _key: &str) -> CacheResult<Vec<String>> {
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
