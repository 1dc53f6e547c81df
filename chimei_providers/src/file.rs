use anyhow::{Context, Result};
use async_trait::async_trait;
use chimei_core::{AddressDataGateway, PrefectureList, TownRecord};
use serde::de::DeserializeOwned;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads a local mirror of the dataset.
///
/// `base` is the dataset root without extension, e.g. `mirror/api/ja`
/// for `mirror/api/ja.json` and `mirror/api/ja/東京都/千代田区.json`.
#[derive(Debug, Clone)]
pub struct FileGateway {
    base: PathBuf,
}

impl FileGateway {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn prefectures_path(&self) -> PathBuf {
        let mut path = OsString::from(self.base.as_os_str());
        path.push(".json");
        PathBuf::from(path)
    }

    fn towns_path(&self, prefecture: &str, city: &str) -> PathBuf {
        self.base.join(prefecture).join(format!("{city}.json"))
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        info!("Reading {}", path.display());
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("Invalid JSON in {}", path.display()))
    }
}

#[async_trait]
impl AddressDataGateway for FileGateway {
    async fn prefectures(&self) -> Result<PrefectureList> {
        Self::read_json(&self.prefectures_path()).await
    }

    async fn towns(&self, prefecture: &str, city: &str) -> Result<Vec<TownRecord>> {
        Self::read_json(&self.towns_path(prefecture, city)).await
    }
}
