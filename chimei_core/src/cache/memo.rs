//! Memoization store shared by every cache level.

use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoPolicy {
    /// Entries live for the rest of the process.
    Unbounded,
    /// At most `capacity` entries, least recently used evicted first;
    /// entries older than `ttl` are treated as absent.
    Bounded { capacity: NonZeroUsize, ttl: Duration },
}

#[derive(Debug)]
struct Slot<V> {
    value: Arc<V>,
    stored_at: Instant,
    last_used: u64,
}

#[derive(Debug)]
pub struct MemoStore<K, V> {
    policy: MemoPolicy,
    slots: HashMap<K, Slot<V>>,
    tick: u64,
}

impl<K, V> MemoStore<K, V>
where
    K: Eq + Hash + Clone,
{
    #[must_use]
    pub fn new(policy: MemoPolicy) -> Self {
        Self {
            policy,
            slots: HashMap::new(),
            tick: 0,
        }
    }

    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(MemoPolicy::Unbounded)
    }

    #[must_use]
    pub fn bounded(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self::new(MemoPolicy::Bounded { capacity, ttl })
    }

    /// Look up `key`, refreshing its recency. Expired entries are dropped.
    pub fn get(&mut self, key: &K) -> Option<Arc<V>> {
        let now = Instant::now();
        if self
            .slots
            .get(key)
            .is_some_and(|slot| self.is_expired(slot, now))
        {
            self.slots.remove(key);
            return None;
        }

        self.tick += 1;
        let tick = self.tick;
        self.slots.get_mut(key).map(|slot| {
            slot.last_used = tick;
            Arc::clone(&slot.value)
        })
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: K, value: V) -> Arc<V> {
        self.tick += 1;
        let value = Arc::new(value);
        self.slots.insert(
            key,
            Slot {
                value: Arc::clone(&value),
                stored_at: Instant::now(),
                last_used: self.tick,
            },
        );

        if let MemoPolicy::Bounded { capacity, .. } = self.policy {
            if self.slots.len() > capacity.get() {
                self.purge_expired();
            }
            while self.slots.len() > capacity.get() {
                self.evict_least_recent();
            }
        }
        value
    }

    pub fn purge_expired(&mut self) {
        let now = Instant::now();
        let expired: Vec<K> = self
            .slots
            .iter()
            .filter(|(_, slot)| self.is_expired(slot, now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in expired {
            self.slots.remove(&key);
        }
    }

    // Linear scan over `last_used`. Capacities are small and eviction only
    // runs on an insert that overflows one.
    fn evict_least_recent(&mut self) {
        let oldest = self
            .slots
            .iter()
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.slots.remove(&key);
        }
    }

    fn is_expired(&self, slot: &Slot<V>, now: Instant) -> bool {
        match self.policy {
            MemoPolicy::Unbounded => false,
            MemoPolicy::Bounded { ttl, .. } => now.duration_since(slot.stored_at) >= ttl,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(60 * 60 * 24);

    fn capacity(n: usize) -> NonZeroUsize {
        let Some(n) = NonZeroUsize::new(n) else {
            panic!("capacity must be non-zero");
        };
        n
    }

    #[tokio::test]
    async fn unbounded_keeps_everything() {
        let mut store = MemoStore::unbounded();
        for i in 0..100 {
            store.insert(i, i * 2);
        }
        assert_eq!(store.len(), 100);
        assert_eq!(store.get(&42).as_deref(), Some(&84));
    }

    #[tokio::test]
    async fn insert_replaces_previous_value() {
        let mut store = MemoStore::unbounded();
        store.insert("k", 1);
        store.insert("k", 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&"k").as_deref(), Some(&2));
    }

    #[tokio::test]
    async fn bounded_evicts_least_recently_used() {
        let mut store = MemoStore::bounded(capacity(2), DAY);
        store.insert("a", 1);
        store.insert("b", 2);
        assert!(store.get(&"a").is_some());
        store.insert("c", 3);

        assert_eq!(store.len(), 2);
        assert!(store.get(&"b").is_none());
        assert!(store.get(&"a").is_some());
        assert!(store.get(&"c").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_entries_expire() {
        let mut store = MemoStore::bounded(capacity(10), 7 * DAY);
        store.insert("a", 1);

        tokio::time::advance(6 * DAY).await;
        assert!(store.get(&"a").is_some());

        tokio::time::advance(DAY).await;
        assert!(store.get(&"a").is_none());
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_counts_from_insertion_not_last_use() {
        let mut store = MemoStore::bounded(capacity(10), 2 * DAY);
        store.insert("a", 1);
        tokio::time::advance(DAY).await;
        assert!(store.get(&"a").is_some());
        tokio::time::advance(DAY).await;
        assert!(store.get(&"a").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entries_go_before_recent_ones() {
        let mut store = MemoStore::bounded(capacity(2), DAY);
        store.insert("old", 1);
        tokio::time::advance(DAY / 2).await;
        store.insert("b", 2);
        assert!(store.get(&"old").is_some());
        tokio::time::advance(DAY / 2).await;
        store.insert("c", 3);

        assert_eq!(store.len(), 2);
        assert!(store.get(&"b").is_some());
        assert!(store.get(&"c").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_never_expires() {
        let mut store = MemoStore::unbounded();
        store.insert((), "list");
        tokio::time::advance(365 * DAY).await;
        assert!(store.get(&()).is_some());
    }
}
