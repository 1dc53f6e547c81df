//! Records read from the address dataset and the pattern entries built
//! from them.

use std::fmt;

use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// One town row of the dataset. Only `town` feeds pattern compilation;
/// the remaining fields ride along with the compiled entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TownRecord {
    pub town: String,
    #[serde(default)]
    pub koaza: String,
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lng: String,
}

impl TownRecord {
    #[must_use]
    pub fn new(town: impl Into<String>) -> Self {
        Self {
            town: town.into(),
            koaza: String::new(),
            lat: String::new(),
            lng: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefecture {
    pub name: String,
    pub cities: Vec<String>,
}

/// Prefectures in dataset order.
///
/// Deserialized from `{ "<prefecture>": ["<city>", ...], ... }` keeping the
/// key order of the JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefectureList(Vec<Prefecture>);

impl PrefectureList {
    #[must_use]
    pub const fn new(prefectures: Vec<Prefecture>) -> Self {
        Self(prefectures)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|p| p.name.as_str()).collect()
    }

    #[must_use]
    pub fn cities(&self, prefecture: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|p| p.name == prefecture)
            .map(|p| p.cities.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prefecture> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for PrefectureList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = PrefectureList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of prefecture name to city names")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut prefectures = Vec::with_capacity(map.size_hint().unwrap_or(47));
                while let Some((name, cities)) = map.next_entry::<String, Vec<String>>()? {
                    prefectures.push(Prefecture { name, cities });
                }
                Ok(PrefectureList(prefectures))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Cache key for the town level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TownKey {
    pub prefecture: String,
    pub city: String,
}

impl TownKey {
    #[must_use]
    pub fn new(prefecture: &str, city: &str) -> Self {
        Self {
            prefecture: prefecture.to_string(),
            city: city.to_string(),
        }
    }
}

impl fmt::Display for TownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefecture, self.city)
    }
}

/// A source record paired with the regex compiled from its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternEntry<S> {
    pub source: S,
    pub pattern: String,
}

impl<S> PatternEntry<S> {
    pub const fn new(source: S, pattern: String) -> Self {
        Self { source, pattern }
    }

    /// Compile the pattern for matching.
    pub fn to_regex(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.pattern)
    }
}

/// Entries ordered longest source name first.
pub type PatternSet<S> = Vec<PatternEntry<S>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefecture_list_keeps_dataset_order() {
        let json = r#"{"北海道":["札幌市中央区"],"青森県":["青森市","弘前市"],"岩手県":[]}"#;
        let Ok(list) = serde_json::from_str::<PrefectureList>(json) else {
            panic!("failed to parse prefecture list");
        };
        assert_eq!(list.names(), vec!["北海道", "青森県", "岩手県"]);
        assert_eq!(
            list.cities("青森県"),
            Some(&["青森市".to_string(), "弘前市".to_string()][..])
        );
        assert!(list.cities("沖縄県").is_none());
    }

    #[test]
    fn town_record_ignores_unknown_fields() {
        let json = r#"{"town":"一丁目","koaza":"","lat":"35.1","lng":"139.2","extra":1}"#;
        let Ok(town) = serde_json::from_str::<TownRecord>(json) else {
            panic!("failed to parse town record");
        };
        assert_eq!(town.town, "一丁目");
        assert_eq!(town.lat, "35.1");
    }
}
