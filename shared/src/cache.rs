//! Time-windowed cache used to throttle upstream calls.
//!
//! A value stored under a key is served until its age reaches the TTL given at
//! lookup time; the next lookup after that recomputes and overwrites it.
//! There is no background sweep and no eviction.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Produces a fresh value when the cache needs one
#[async_trait]
pub trait Supplier<V>: Send + Sync {
    async fn supply(&self) -> anyhow::Result<V>;
}

/// Stored value and the instant it was computed
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub stored_at: Instant,
}

/// Keyed cache with per-lookup TTL
pub struct TtlCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone + Send> TtlCache<V> {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
        }
    }

    /// Return the value under `key` if it is younger than `ttl`, otherwise ask
    /// `supplier` for a new one and store it.
    ///
    /// Supplier errors are returned as-is and leave any previous entry untouched.
    pub async fn get_or_compute<S>(&mut self, key: &str, ttl: Duration, supplier: &S) -> anyhow::Result<V>
    where
        S: Supplier<V> + ?Sized,
    {
        let now = self.clock.now();
        if let Some(entry) = self.entries.get(key) {
            if now.saturating_duration_since(entry.stored_at) < ttl {
                tracing::debug!("cache hit: {}", key);
                return Ok(entry.value.clone());
            }
        }

        tracing::debug!("cache miss: {}", key);
        let value = supplier.supply().await?;
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                stored_at: now,
            },
        );
        Ok(value)
    }

    /// Stored entry regardless of age
    pub fn peek(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone + Send> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
