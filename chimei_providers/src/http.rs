use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chimei_core::{AddressDataGateway, PrefectureList, TownRecord};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::info;
use url::Url;

/// HTTP gateway configuration
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Dataset base URL, without the `.json` suffix
    pub base_url: String,

    /// Request timeout (seconds)
    pub timeout: u64,

    /// User-Agent header
    pub user_agent: String,
}

impl Default for HttpGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://geolonia.github.io/japanese-addresses/api/ja".to_string(),
            timeout: 30,
            user_agent: format!("chimei/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Fetches the dataset over HTTP. Non-success responses and undecodable
/// bodies are returned as errors; nothing is retried.
pub struct HttpGateway {
    client: Client,
    base: Url,
}

impl HttpGateway {
    pub fn new(config: &HttpGatewayConfig) -> Result<Self> {
        let base = Url::parse(config.base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid dataset base URL: {}", config.base_url))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("Dataset base URL cannot have path segments: {base}");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(&config.user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base })
    }

    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn prefectures_url(&self) -> Url {
        let mut url = self.base.clone();
        let path = format!("{}.json", url.path());
        url.set_path(&path);
        url
    }

    fn towns_url(&self, prefecture: &str, city: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("Dataset base URL cannot have path segments: {}", self.base))?
            .pop_if_empty()
            .push(prefecture)
            .push(&format!("{city}.json"));
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        info!("GET {url}");
        let body = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("HTTP request failed: {url}"))?
            .error_for_status()?
            .json::<T>()
            .await
            .with_context(|| format!("Invalid JSON from {url}"))?;
        Ok(body)
    }
}

#[async_trait]
impl AddressDataGateway for HttpGateway {
    async fn prefectures(&self) -> Result<PrefectureList> {
        self.get_json(self.prefectures_url()).await
    }

    async fn towns(&self, prefecture: &str, city: &str) -> Result<Vec<TownRecord>> {
        let url = self.towns_url(prefecture, city)?;
        self.get_json(url).await
    }
}
