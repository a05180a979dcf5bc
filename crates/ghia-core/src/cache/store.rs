//! Keyed store of fetched values with their fetch time.

use super::clock::{Clock, SystemClock};
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

/// A cached value and the moment it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub value: T,
    pub fetched_at_ms: i64,
}

impl<T> CacheEntry<T> {
    /// Age of the entry at `now`, in milliseconds.
    pub fn age_millis(&self, now: i64) -> i64 {
        now - self.fetched_at_ms
    }
}

struct StoredEntry {
    value: Arc<dyn Any + Send + Sync>,
    fetched_at_ms: i64,
}

/// Shared memoization table keyed by an opaque string.
///
/// Values of any `'static` type can be stored; reading a key back as a
/// different type than it was written with behaves like a miss.
pub struct DataCache {
    entries: RwLock<HashMap<String, StoredEntry>>,
    clock: Arc<dyn Clock>,
}

impl DataCache {
    /// Create a cache on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a cache on a custom clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Current time according to this cache's clock.
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Look up an entry regardless of its age.
    pub fn get<T>(&self, key: &str) -> Option<CacheEntry<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entries = match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let stored = entries.get(key)?;
        match stored.value.downcast_ref::<T>() {
            Some(value) => Some(CacheEntry {
                value: value.clone(),
                fetched_at_ms: stored.fetched_at_ms,
            }),
            None => {
                warn!("Cache entry {} holds a different type than requested", key);
                None
            }
        }
    }

    /// Store `value` under `key` stamped with the current time, replacing any
    /// previous entry.
    pub fn set<T>(&self, key: &str, value: T)
    where
        T: Send + Sync + 'static,
    {
        let fetched_at_ms = self.clock.now_millis();
        let mut entries = match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.insert(
            key.to_string(),
            StoredEntry {
                value: Arc::new(value),
                fetched_at_ms,
            },
        );
        debug!("Cached {} at {}", key, fetched_at_ms);
    }

    /// Whether `entry` is younger than `ttl` at `now`.
    pub fn is_fresh<T>(entry: &CacheEntry<T>, ttl: Duration, now: i64) -> bool {
        entry.age_millis(now) < duration_millis(ttl)
    }

    /// Look up an entry and return it only if it is still fresh.
    pub fn get_fresh<T>(&self, key: &str, ttl: Duration) -> Option<CacheEntry<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entry = self.get::<T>(key)?;
        Self::is_fresh(&entry, ttl, self.now_millis()).then_some(entry)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        match self.entries.read() {
            Ok(guard) => guard.contains_key(key),
            Err(poisoned) => poisoned.into_inner().contains_key(key),
        }
    }

    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        match self.entries.write() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

/// Whole milliseconds in `duration`, saturating at `i64::MAX`.
pub(crate) fn duration_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

impl Default for DataCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataCache")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    const TTL: Duration = Duration::from_millis(300_000);

    fn cache_at(start: i64) -> (Arc<ManualClock>, DataCache) {
        let clock = Arc::new(ManualClock::new(start));
        let cache = DataCache::with_clock(clock.clone());
        (clock, cache)
    }

    #[test]
    fn test_get_missing_key() {
        let (_, cache) = cache_at(0);
        assert!(cache.get::<String>("nope").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_stamps_current_time() {
        let (_, cache) = cache_at(42);
        cache.set("x", vec![1u32, 2, 3]);

        let entry = cache.get::<Vec<u32>>("x").unwrap();
        assert_eq!(entry.value, vec![1, 2, 3]);
        assert_eq!(entry.fetched_at_ms, 42);
    }

    #[test]
    fn test_set_overwrites() {
        let (clock, cache) = cache_at(0);
        cache.set("x", 1u64);
        clock.advance(Duration::from_millis(10));
        cache.set("x", 2u64);

        let entry = cache.get::<u64>("x").unwrap();
        assert_eq!(entry.value, 2);
        assert_eq!(entry.fetched_at_ms, 10);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_freshness_boundary() {
        let t = 1_700_000_000_000;
        let (clock, cache) = cache_at(t);
        cache.set("x", "value".to_string());

        clock.set(t + 299_999);
        assert!(cache.get_fresh::<String>("x", TTL).is_some());

        clock.set(t + 300_000);
        assert!(cache.get_fresh::<String>("x", TTL).is_none());

        clock.set(t + 300_001);
        assert!(cache.get_fresh::<String>("x", TTL).is_none());
        // Stale entries are ignored, not purged.
        assert!(cache.get::<String>("x").is_some());
    }

    #[test]
    fn test_is_fresh() {
        let entry = CacheEntry {
            value: (),
            fetched_at_ms: 1_000,
        };
        assert!(DataCache::is_fresh(&entry, Duration::from_millis(500), 1_499));
        assert!(!DataCache::is_fresh(&entry, Duration::from_millis(500), 1_500));
    }

    #[test]
    fn test_ttl_beyond_i64_millis_stays_fresh() {
        let entry = CacheEntry {
            value: (),
            fetched_at_ms: 1_000,
        };
        let forever = Duration::from_millis(u64::MAX);
        assert!(DataCache::is_fresh(&entry, forever, 1_001));
        assert!(DataCache::is_fresh(&entry, Duration::MAX, i64::MAX));
    }

    #[test]
    fn test_type_mismatch_is_a_miss() {
        let (_, cache) = cache_at(0);
        cache.set("x", 5u32);
        assert!(cache.get::<String>("x").is_none());
        assert!(cache.get::<u32>("x").is_some());
    }

    #[test]
    fn test_clear() {
        let (_, cache) = cache_at(0);
        cache.set("a", 1u8);
        cache.set("b", 2u8);
        assert!(cache.contains_key("a"));

        cache.clear();
        assert!(cache.is_empty());
    }
}
