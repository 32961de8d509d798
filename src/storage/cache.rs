use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Key/value store whose entries expire `ttl` after insertion.
///
/// The whole map sits behind one mutex, so each operation is atomic but a
/// `get` followed by a `set` is not. Expired entries are only evicted when
/// they are read; there is no capacity bound and no background sweeper.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
}

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.lock();

        let age = entries.get(key)?.inserted_at.elapsed();
        if age < self.ttl {
            return entries.get(key).map(|entry| entry.value.clone());
        }

        entries.remove(key);
        tracing::debug!("Evicted expired cache entry {} (age {:?})", key, age);
        None
    }

    pub fn set(&self, key: impl Into<String>, value: V) {
        self.lock().insert(
            key.into(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn delete(&self, key: &str) {
        self.lock().remove(key);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    // A panic while holding the lock cannot leave a half-written entry, so
    // the map is still usable after poisoning.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
