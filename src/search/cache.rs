//! Bounded TTL cache for quick-search responses
//!
//! Process-scoped service with an explicit lifecycle: construct on boot,
//! `start()` spawns the background sweep, `stop()` (or drop) aborts it.
//! Eviction at capacity is FIFO by insertion order, independent of access
//! recency, and `get` treats stale entries as absent even before the sweep
//! has run.

use crate::config::CacheConfig;
use crate::search::types::{EntityKind, TypeFilter};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Cache key: requester + raw query + limit + sorted type filter
///
/// The type list is sorted before joining so two orderings of the same
/// filter share one entry. A restriction with no recognized kinds keys as
/// "none", distinct from the unrestricted "all".
pub fn cache_key(user: Uuid, query: &str, limit: usize, types: &TypeFilter) -> String {
    let types_part = if !types.is_restricted() {
        "all".to_string()
    } else if types.kinds().is_empty() {
        "none".to_string()
    } else {
        let mut tags: Vec<&str> = types.kinds().iter().map(EntityKind::tag).collect();
        tags.sort_unstable();
        tags.join(",")
    };
    format!("{user}:{query}:{limit}:{types_part}")
}

struct CacheEntry {
    payload: serde_json::Value,
    cached_at: Instant,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    /// Insertion order for FIFO eviction
    order: VecDeque<String>,
}

impl CacheInner {
    fn evict_oldest(&mut self) {
        while let Some(oldest) = self.order.pop_front() {
            if self.entries.remove(&oldest).is_some() {
                break;
            }
        }
    }

    fn sweep(&mut self, ttl: Duration) {
        self.entries.retain(|_, entry| entry.cached_at.elapsed() < ttl);
        let entries = &self.entries;
        self.order.retain(|key| entries.contains_key(key));
    }
}

/// TTL + FIFO-bounded result cache
pub struct SearchCache {
    inner: Arc<Mutex<CacheInner>>,
    ttl: Duration,
    max_entries: usize,
    sweep_interval: Duration,
    sweep_task: Mutex<Option<JoinHandle<()>>>,
}

impl SearchCache {
    pub fn new(ttl: Duration, max_entries: usize, sweep_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner::default())),
            ttl,
            max_entries,
            sweep_interval,
            sweep_task: Mutex::new(None),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(
            Duration::from_secs(config.ttl_secs),
            config.max_entries,
            Duration::from_secs(config.sweep_interval_secs),
        )
    }

    /// Spawn the recurring background sweep; idempotent
    pub fn start(&self) {
        let mut task = self.sweep_task.lock();
        if task.is_some() {
            return;
        }

        let inner = Arc::clone(&self.inner);
        let ttl = self.ttl;
        let sweep_interval = self.sweep_interval;
        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sweep_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick fires immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = {
                    let mut inner = inner.lock();
                    let before = inner.entries.len();
                    inner.sweep(ttl);
                    before - inner.entries.len()
                };
                if removed > 0 {
                    tracing::debug!(removed, "Search cache sweep");
                }
            }
        }));
    }

    /// Abort the background sweep
    pub fn stop(&self) {
        if let Some(task) = self.sweep_task.lock().take() {
            task.abort();
        }
    }

    /// Fetch a cached payload; stale entries count as absent
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut inner = self.inner.lock();
        let hit = match inner.entries.get(key) {
            Some(entry) if entry.cached_at.elapsed() < self.ttl => Some(entry.payload.clone()),
            Some(_) => None,
            None => return None,
        };
        if hit.is_none() {
            // Stale before the sweep caught it
            inner.entries.remove(key);
        }
        hit
    }

    /// Store a payload, evicting the oldest-inserted entry at capacity
    ///
    /// Overwriting an existing key keeps its original insertion position.
    pub fn set(&self, key: String, payload: serde_json::Value) {
        let mut inner = self.inner.lock();
        if inner.entries.contains_key(&key) {
            inner.entries.insert(
                key,
                CacheEntry {
                    payload,
                    cached_at: Instant::now(),
                },
            );
            return;
        }

        if inner.entries.len() >= self.max_entries {
            inner.evict_oldest();
        }
        inner.order.push_back(key.clone());
        inner.entries.insert(
            key,
            CacheEntry {
                payload,
                cached_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }
}

impl Drop for SearchCache {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cache(ttl_ms: u64, max_entries: usize) -> SearchCache {
        SearchCache::new(
            Duration::from_millis(ttl_ms),
            max_entries,
            Duration::from_millis(ttl_ms),
        )
    }

    fn filter_of(tags: &[&str]) -> TypeFilter {
        let mut filter = TypeFilter::default();
        for tag in tags {
            filter.add_tag(tag);
        }
        filter
    }

    #[test]
    fn test_key_sorts_type_filter() {
        let user = Uuid::new_v4();
        let forward = cache_key(user, "john", 5, &filter_of(&["lead", "order"]));
        let reverse = cache_key(user, "john", 5, &filter_of(&["order", "lead"]));
        assert_eq!(forward, reverse);
        assert!(forward.ends_with(":lead,order"));

        let unfiltered = cache_key(user, "john", 5, &TypeFilter::default());
        assert!(unfiltered.ends_with(":all"));

        // Unknown-only restrictions must not share the unrestricted entry
        let unknown = cache_key(user, "john", 5, &filter_of(&["bogus"]));
        assert!(unknown.ends_with(":none"));
    }

    #[test]
    fn test_get_returns_stored_payload() {
        let cache = cache(60_000, 10);
        cache.set("k".to_string(), json!({"totalResults": 3}));
        assert_eq!(cache.get("k"), Some(json!({"totalResults": 3})));
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_fifo_eviction_bound() {
        let cache = cache(60_000, 3);
        for i in 0..5 {
            cache.set(format!("k{i}"), json!(i));
        }

        assert_eq!(cache.len(), 3);
        // The two oldest-inserted entries were evicted
        assert_eq!(cache.get("k0"), None);
        assert_eq!(cache.get("k1"), None);
        assert_eq!(cache.get("k4"), Some(json!(4)));
    }

    #[test]
    fn test_eviction_ignores_access_recency() {
        let cache = cache(60_000, 2);
        cache.set("first".to_string(), json!(1));
        cache.set("second".to_string(), json!(2));
        // Reading "first" does not protect it; eviction is FIFO, not LRU
        assert!(cache.get("first").is_some());
        cache.set("third".to_string(), json!(3));

        assert_eq!(cache.get("first"), None);
        assert!(cache.get("second").is_some());
        assert!(cache.get("third").is_some());
    }

    #[tokio::test]
    async fn test_stale_entry_absent_before_sweep() {
        let cache = cache(30, 10);
        cache.set("k".to_string(), json!(1));
        assert!(cache.get("k").is_some());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.get("k"), None);
    }

    #[tokio::test]
    async fn test_background_sweep_removes_stale_entries() {
        let cache = cache(30, 10);
        cache.set("k".to_string(), json!(1));
        cache.start();

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(cache.is_empty());
        cache.stop();
    }
}
