//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input type, so
//! dispatch is resolved at compile time.

use anyhow::Result;
use async_trait::async_trait;
use chimei_config::Config;
use chimei_core::{AddressDataGateway, PatternCache, PatternEntry, PrefectureList, TownRecord};
use chimei_providers::{FileGateway, HttpGateway, HttpGatewayConfig};
use serde::Serialize;
use tracing::info;

mod cities;
mod info;
mod init;
mod prefectures;
mod towns;
mod version;

pub use cities::{CitiesInput, CitiesStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use prefectures::PrefecturesStrategy;
pub use towns::{TownsInput, TownsStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// The gateway selected by configuration.
pub enum Gateway {
    Http(HttpGateway),
    File(FileGateway),
}

impl Gateway {
    fn from_config(config: &Config) -> Result<Self> {
        if let Some(dir) = &config.dataset_dir {
            info!("Reading dataset from {}", dir.display());
            return Ok(Self::File(FileGateway::new(dir.clone())));
        }

        info!("Reading dataset from {}", config.api.base_url);
        let http_config = HttpGatewayConfig {
            base_url: config.api.base_url.clone(),
            timeout: config.api.timeout,
            user_agent: config.api.user_agent.clone(),
        };
        Ok(Self::Http(HttpGateway::new(&http_config)?))
    }
}

#[async_trait]
impl AddressDataGateway for Gateway {
    async fn prefectures(&self) -> Result<PrefectureList> {
        match self {
            Self::Http(gateway) => gateway.prefectures().await,
            Self::File(gateway) => gateway.prefectures().await,
        }
    }

    async fn towns(&self, prefecture: &str, city: &str) -> Result<Vec<TownRecord>> {
        match self {
            Self::Http(gateway) => gateway.towns(prefecture, city).await,
            Self::File(gateway) => gateway.towns(prefecture, city).await,
        }
    }
}

fn pattern_cache() -> Result<PatternCache<Gateway>> {
    let config = Config::load()?;
    let gateway = Gateway::from_config(&config)?;
    Ok(PatternCache::new(gateway, config.cache.town_cache_size()?))
}

fn print_patterns<S: Serialize>(
    patterns: &[PatternEntry<S>],
    json: bool,
    label: impl Fn(&S) -> String,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(patterns)?);
    } else {
        for entry in patterns {
            println!("{}\t{}", label(&entry.source), entry.pattern);
        }
    }
    Ok(())
}
