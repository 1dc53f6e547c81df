//! Memoized raw records and compiled pattern sets.
//!
//! | level       | key          | policy                          |
//! |-------------|--------------|---------------------------------|
//! | prefecture  | `()`         | unbounded                       |
//! | city        | prefecture   | unbounded                       |
//! | town        | [`TownKey`]  | `town_cache_size` LRU + 7 days  |
//!
//! Raw gateway responses are memoized separately, unbounded.
//!
//! Locks are only taken around store access and never across an `.await`.
//! Two callers missing the same key at once both fetch and compile; the
//! results are identical and the last insert wins.

mod memo;

use std::future::Future;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info};

use crate::compile::{compile_city_patterns, compile_prefecture_patterns, compile_town_patterns};
use crate::error::{Error, Result};
use crate::model::{PatternSet, PrefectureList, TownKey, TownRecord};
use crate::AddressDataGateway;

pub use memo::{MemoPolicy, MemoStore};

/// How long a compiled town pattern set stays valid.
pub const TOWN_PATTERN_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7);

/// Entry counts per store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub prefecture_lists: usize,
    pub town_lists: usize,
    pub prefecture_patterns: usize,
    pub city_patterns: usize,
    pub town_patterns: usize,
}

pub struct PatternCache<G> {
    gateway: G,
    prefectures: Mutex<MemoStore<(), PrefectureList>>,
    towns: Mutex<MemoStore<TownKey, Vec<TownRecord>>>,
    prefecture_patterns: Mutex<MemoStore<(), PatternSet<String>>>,
    city_patterns: Mutex<MemoStore<String, PatternSet<String>>>,
    town_patterns: Mutex<MemoStore<TownKey, PatternSet<TownRecord>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Stores only hold rebuildable data.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Return the stored value for `key`, or produce, store and return it.
async fn memoize<K, V, F, Fut>(
    cache_level: &'static str,
    store: &Mutex<MemoStore<K, V>>,
    key: K,
    produce: F,
) -> Result<Arc<V>>
where
    K: Eq + Hash + Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V>>,
{
    let cached = lock(store).get(&key);
    if let Some(value) = cached {
        debug!(cache_level, "cache hit");
        return Ok(value);
    }

    debug!(cache_level, "cache miss");
    let value = produce().await?;
    Ok(lock(store).insert(key, value))
}

impl<G: AddressDataGateway> PatternCache<G> {
    pub fn new(gateway: G, town_cache_size: NonZeroUsize) -> Self {
        Self {
            gateway,
            prefectures: Mutex::new(MemoStore::unbounded()),
            towns: Mutex::new(MemoStore::unbounded()),
            prefecture_patterns: Mutex::new(MemoStore::unbounded()),
            city_patterns: Mutex::new(MemoStore::unbounded()),
            town_patterns: Mutex::new(MemoStore::bounded(town_cache_size, TOWN_PATTERN_TTL)),
        }
    }

    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Prefecture to city mapping, fetched once per process.
    pub async fn prefectures(&self) -> Result<Arc<PrefectureList>> {
        memoize("prefecture_list", &self.prefectures, (), || async move {
            info!("Fetching prefecture list");
            self.gateway.prefectures().await.map_err(Error::Gateway)
        })
        .await
    }

    /// Town records of one city, fetched once per process.
    pub async fn towns(&self, prefecture: &str, city: &str) -> Result<Arc<Vec<TownRecord>>> {
        let key = TownKey::new(prefecture, city);
        memoize("town_list", &self.towns, key, || async move {
            info!("Fetching towns of {prefecture} {city}");
            self.gateway
                .towns(prefecture, city)
                .await
                .map_err(Error::Gateway)
        })
        .await
    }

    pub async fn prefecture_patterns(&self) -> Result<Arc<PatternSet<String>>> {
        memoize("prefecture", &self.prefecture_patterns, (), || async move {
            let prefectures = self.prefectures().await?;
            Ok(compile_prefecture_patterns(&prefectures.names()))
        })
        .await
    }

    pub async fn city_patterns(&self, prefecture: &str) -> Result<Arc<PatternSet<String>>> {
        let key = prefecture.to_string();
        memoize("city", &self.city_patterns, key, || async move {
            let prefectures = self.prefectures().await?;
            let cities = prefectures
                .cities(prefecture)
                .ok_or_else(|| Error::UnknownPrefecture(prefecture.to_string()))?;
            Ok(compile_city_patterns(cities))
        })
        .await
    }

    pub async fn town_patterns(
        &self,
        prefecture: &str,
        city: &str,
    ) -> Result<Arc<PatternSet<TownRecord>>> {
        let key = TownKey::new(prefecture, city);
        memoize("town", &self.town_patterns, key, || async move {
            let towns = self.towns(prefecture, city).await?;
            Ok(compile_town_patterns(city, &towns))
        })
        .await
    }

    pub fn stats(&self) -> CacheStats {
        let mut town_patterns = lock(&self.town_patterns);
        town_patterns.purge_expired();
        CacheStats {
            prefecture_lists: lock(&self.prefectures).len(),
            town_lists: lock(&self.towns).len(),
            prefecture_patterns: lock(&self.prefecture_patterns).len(),
            city_patterns: lock(&self.city_patterns).len(),
            town_patterns: town_patterns.len(),
        }
    }
}
