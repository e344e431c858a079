use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

/// In-memory cache with a fixed time-to-live per entry.
///
/// Expiry is lazy: a stale entry is deleted by the lookup that discovers it.
/// There is no size bound; the key space is expected to stay small (match ids
/// plus one sentinel). The internal mutex only guards map integrity —
/// concurrent misses on the same key may each recompute and overwrite the
/// entry, last writer wins.
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, V)>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key` if it is younger than the TTL.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn set(&self, key: &str, value: V) {
        self.set_at(key, value, Instant::now());
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let (stored_at, value) = entries.get(key)?;
        if now.saturating_duration_since(*stored_at) >= self.ttl {
            debug!(key, "evicting stale cache entry");
            entries.remove(key);
            return None;
        }
        Some(value.clone())
    }

    fn set_at(&self, key: &str, value: V, stored_at: Instant) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), (stored_at, value));
    }
}
