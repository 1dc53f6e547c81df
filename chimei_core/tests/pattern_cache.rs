//! Integration tests for `PatternCache` against an in-memory gateway.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chimei_core::{
    AddressDataGateway, Error, PatternCache, Prefecture, PrefectureList, TOWN_PATTERN_TTL,
    TownRecord,
};

#[derive(Default)]
struct CountingGateway {
    prefecture_fetches: AtomicUsize,
    town_fetches: AtomicUsize,
    fail_towns: bool,
}

#[async_trait]
impl AddressDataGateway for CountingGateway {
    async fn prefectures(&self) -> anyhow::Result<PrefectureList> {
        self.prefecture_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(PrefectureList::new(vec![
            Prefecture {
                name: "東京都".to_string(),
                cities: vec![
                    "港区".to_string(),
                    "千代田区".to_string(),
                    "西多摩郡瑞穂町".to_string(),
                ],
            },
            Prefecture {
                name: "京都府".to_string(),
                cities: vec!["京都市中京区".to_string()],
            },
            Prefecture {
                name: "北海道".to_string(),
                cities: vec!["札幌市中央区".to_string()],
            },
        ]))
    }

    async fn towns(&self, _prefecture: &str, city: &str) -> anyhow::Result<Vec<TownRecord>> {
        self.town_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_towns {
            anyhow::bail!("503 Service Unavailable");
        }
        Ok(match city {
            "千代田区" => vec![
                TownRecord::new("丸の内"),
                TownRecord::new("霞が関一丁目"),
                TownRecord::new("大手町"),
            ],
            "京都市中京区" => vec![TownRecord::new("一之船入町")],
            _ => vec![TownRecord::new("本町")],
        })
    }
}

fn size(n: usize) -> NonZeroUsize {
    let Some(n) = NonZeroUsize::new(n) else {
        panic!("size must be non-zero");
    };
    n
}

fn cache(town_cache_size: usize) -> PatternCache<CountingGateway> {
    PatternCache::new(CountingGateway::default(), size(town_cache_size))
}

#[tokio::test]
async fn prefecture_patterns_match_with_and_without_suffix() {
    let cache = cache(10);
    let Ok(patterns) = cache.prefecture_patterns().await else {
        panic!("prefecture patterns failed");
    };

    let sources: Vec<_> = patterns.iter().map(|p| p.source.as_str()).collect();
    assert_eq!(sources, vec!["東京都", "京都府", "北海道"]);

    let Ok(tokyo) = patterns[0].to_regex() else {
        panic!("invalid pattern");
    };
    assert!(tokyo.is_match("東京都"));
    assert!(tokyo.is_match("東京"));
}

#[tokio::test]
async fn prefecture_list_is_fetched_once_for_all_levels() {
    let cache = cache(10);
    assert!(cache.prefecture_patterns().await.is_ok());
    assert!(cache.city_patterns("東京都").await.is_ok());
    assert!(cache.city_patterns("京都府").await.is_ok());
    assert!(cache.prefectures().await.is_ok());

    assert_eq!(cache.gateway().prefecture_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn city_patterns_are_longest_first() {
    let cache = cache(10);
    let Ok(patterns) = cache.city_patterns("東京都").await else {
        panic!("city patterns failed");
    };
    let sources: Vec<_> = patterns.iter().map(|p| p.source.as_str()).collect();
    assert_eq!(sources, vec!["西多摩郡瑞穂町", "千代田区", "港区"]);

    let Ok(mizuho) = patterns[0].to_regex() else {
        panic!("invalid pattern");
    };
    assert!(mizuho.is_match("瑞穂町"));
}

#[tokio::test]
async fn unknown_prefecture_is_an_error() {
    let cache = cache(10);
    let result = cache.city_patterns("大阪府").await;
    assert!(matches!(result, Err(Error::UnknownPrefecture(name)) if name == "大阪府"));
}

#[tokio::test]
async fn town_patterns_are_cached() {
    let cache = cache(10);
    let Ok(first) = cache.town_patterns("東京都", "千代田区").await else {
        panic!("town patterns failed");
    };
    let Ok(second) = cache.town_patterns("東京都", "千代田区").await else {
        panic!("town patterns failed");
    };

    assert_eq!(first, second);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.gateway().town_fetches.load(Ordering::SeqCst), 1);

    let towns: Vec<_> = first.iter().map(|p| p.source.town.as_str()).collect();
    assert_eq!(towns, vec!["霞が関一丁目", "丸の内", "大手町"]);
}

#[tokio::test]
async fn kyoto_town_patterns_are_unanchored() {
    let cache = cache(10);
    let Ok(patterns) = cache.town_patterns("京都府", "京都市中京区").await else {
        panic!("town patterns failed");
    };
    let Ok(re) = patterns[0].to_regex() else {
        panic!("invalid pattern");
    };
    assert!(re.is_match("河原町通二条下る一之船入町"));

    let Some(found) = re.find("河原町通二条下る一之船入町1") else {
        panic!("no match");
    };
    assert_eq!(found.start(), 0);
}

#[tokio::test]
async fn evicted_town_patterns_recompile_without_refetch() {
    let cache = cache(1);
    assert!(cache.town_patterns("東京都", "千代田区").await.is_ok());
    assert!(cache.town_patterns("東京都", "港区").await.is_ok());
    assert_eq!(cache.stats().town_patterns, 1);

    assert!(cache.town_patterns("東京都", "千代田区").await.is_ok());
    // Raw town lists are kept for the process lifetime.
    assert_eq!(cache.gateway().town_fetches.load(Ordering::SeqCst), 2);
    assert_eq!(cache.stats().town_lists, 2);
}

#[tokio::test(start_paused = true)]
async fn town_patterns_expire_after_a_week() {
    let cache = cache(10);
    let Ok(first) = cache.town_patterns("東京都", "千代田区").await else {
        panic!("town patterns failed");
    };

    tokio::time::advance(TOWN_PATTERN_TTL - Duration::from_secs(1)).await;
    let Ok(cached) = cache.town_patterns("東京都", "千代田区").await else {
        panic!("town patterns failed");
    };
    assert!(Arc::ptr_eq(&first, &cached));

    tokio::time::advance(Duration::from_secs(1)).await;
    let Ok(rebuilt) = cache.town_patterns("東京都", "千代田区").await else {
        panic!("town patterns failed");
    };
    assert!(!Arc::ptr_eq(&first, &rebuilt));
    assert_eq!(first, rebuilt);
    assert_eq!(cache.gateway().town_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn gateway_failures_propagate_and_are_not_cached() {
    let cache = PatternCache::new(
        CountingGateway {
            fail_towns: true,
            ..CountingGateway::default()
        },
        size(10),
    );

    let first = cache.town_patterns("東京都", "千代田区").await;
    assert!(matches!(first, Err(Error::Gateway(_))));
    let second = cache.town_patterns("東京都", "千代田区").await;
    assert!(second.is_err());

    assert_eq!(cache.gateway().town_fetches.load(Ordering::SeqCst), 2);
    assert_eq!(cache.stats().town_patterns, 0);
}

#[tokio::test]
async fn stats_count_entries_per_store() {
    let cache = cache(10);
    assert_eq!(cache.stats(), chimei_core::CacheStats::default());

    assert!(cache.city_patterns("東京都").await.is_ok());
    assert!(cache.town_patterns("東京都", "港区").await.is_ok());

    let stats = cache.stats();
    assert_eq!(stats.prefecture_lists, 1);
    assert_eq!(stats.city_patterns, 1);
    assert_eq!(stats.town_lists, 1);
    assert_eq!(stats.town_patterns, 1);
    assert_eq!(stats.prefecture_patterns, 0);
}
