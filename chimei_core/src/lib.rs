#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Pattern compilation for Japanese prefecture, city and town names.
//!
//! Names from the reference address dataset are turned into regular
//! expressions that tolerate old/new kanji forms, kana lookalikes, omitted
//! county names and the usual spellings of chōme-style numbering. Matching
//! an address against the patterns is left to the caller.

use async_trait::async_trait;

pub mod cache;
pub mod compile;
mod error;
pub mod model;
pub mod normalize;

pub use cache::{CacheStats, MemoPolicy, MemoStore, PatternCache, TOWN_PATTERN_TTL};
pub use compile::{compile_city_patterns, compile_prefecture_patterns, compile_town_patterns};
pub use error::{Error, Result};
pub use model::{PatternEntry, PatternSet, Prefecture, PrefectureList, TownKey, TownRecord};

/// Source of raw prefecture/city/town records.
///
/// Implementations perform I/O and may fail; failures are handed to the
/// caller untouched; nothing in this crate retries.
#[async_trait]
pub trait AddressDataGateway: Send + Sync {
    async fn prefectures(&self) -> anyhow::Result<PrefectureList>;

    async fn towns(&self, prefecture: &str, city: &str) -> anyhow::Result<Vec<TownRecord>>;
}
