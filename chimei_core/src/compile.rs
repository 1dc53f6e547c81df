//! Per-level pattern compilation.

use tracing::debug;

use crate::model::{PatternEntry, PatternSet, TownRecord};
use crate::normalize::{NAME_PIPELINE, run_pipeline, to_town_pattern};

/// Suffixes a prefecture name may carry (`都`, `道`, `府`, `県`).
pub const PREFECTURE_SUFFIXES: [char; 4] = ['都', '道', '府', '県'];

const PREFECTURE_SUFFIX_PATTERN: &str = "(都|道|府|県)?";

/// City names ending in one of these are towns/villages inside a county.
const TOWN_VILLAGE_SUFFIXES: [char; 2] = ['町', '村'];

const COUNTY_MARKER: char = '郡';

/// Town patterns for cities under this prefix start with `.*` instead of `^`:
/// Kyoto addresses put directional names (`上ル`, `西入` ...) before the town,
/// and the match has to cover that prefix too.
pub const UNANCHORED_CITY_PREFIX: &str = "京都市";

/// `東京都` -> `^東京(都|道|府|県)?`
#[must_use]
pub fn compile_prefecture_patterns<S: AsRef<str>>(names: &[S]) -> PatternSet<String> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let stem = name
                .strip_suffix(PREFECTURE_SUFFIXES.as_slice())
                .unwrap_or(name);
            let pattern = format!("^{}{PREFECTURE_SUFFIX_PATTERN}", regex::escape(stem));
            PatternEntry::new(name.to_string(), pattern)
        })
        .collect()
}

/// Longest name first. A county prefix is optional for towns and villages.
#[must_use]
pub fn compile_city_patterns<S: AsRef<str>>(names: &[S]) -> PatternSet<String> {
    let mut names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    sort_longest_first(&mut names, |name| *name);

    let patterns: PatternSet<String> = names
        .into_iter()
        .map(|name| {
            let mut fragment = run_pipeline(name, NAME_PIPELINE);
            if name.ends_with(TOWN_VILLAGE_SUFFIXES.as_slice()) {
                fragment.make_optional_through(COUNTY_MARKER);
            }
            PatternEntry::new(name.to_string(), format!("^{}", fragment.render()))
        })
        .collect();

    debug!("Compiled {} city patterns", patterns.len());
    patterns
}

/// Longest town name first. Anchored at the start, or led by `.*` when
/// `city` is under [`UNANCHORED_CITY_PREFIX`].
#[must_use]
pub fn compile_town_patterns(city: &str, towns: &[TownRecord]) -> PatternSet<TownRecord> {
    let mut towns: Vec<&TownRecord> = towns.iter().collect();
    sort_longest_first(&mut towns, |town| town.town.as_str());

    let anchor = if city.starts_with(UNANCHORED_CITY_PREFIX) {
        ".*"
    } else {
        "^"
    };

    let patterns: PatternSet<TownRecord> = towns
        .into_iter()
        .map(|town| {
            let pattern = format!("{anchor}{}", to_town_pattern(&town.town));
            PatternEntry::new(town.clone(), pattern)
        })
        .collect();

    debug!("Compiled {} town patterns for {city}", patterns.len());
    patterns
}

/// Stable: names of equal length keep their dataset order.
fn sort_longest_first<T>(items: &mut [T], name: impl Fn(&T) -> &str) {
    items.sort_by_key(|item| std::cmp::Reverse(name(item).chars().count()));
}
