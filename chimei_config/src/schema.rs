use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    /// Local mirror of the dataset; when set it is read instead of `api`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_base_url")]
    pub base_url: String,
    /// Request timeout (seconds)
    #[serde(default = "ApiConfig::default_timeout")]
    pub timeout: u64,
    #[serde(default = "ApiConfig::default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout: Self::default_timeout(),
            user_agent: Self::default_user_agent(),
        }
    }
}

impl ApiConfig {
    fn default_base_url() -> String {
        "https://geolonia.github.io/japanese-addresses/api/ja".to_string()
    }

    const fn default_timeout() -> u64 {
        30
    }

    fn default_user_agent() -> String {
        format!("chimei/{}", env!("CARGO_PKG_VERSION"))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of cities whose town patterns stay cached.
    #[serde(default = "CacheConfig::default_town_cache_size")]
    pub town_cache_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            town_cache_size: Self::default_town_cache_size(),
        }
    }
}

impl CacheConfig {
    const fn default_town_cache_size() -> usize {
        1_000
    }

    pub fn town_cache_size(&self) -> anyhow::Result<NonZeroUsize> {
        NonZeroUsize::new(self.town_cache_size)
            .ok_or_else(|| anyhow::anyhow!("cache.town_cache_size must be at least 1"))
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("chimei"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/chimei/config.json`, falling back to defaults when the file
    /// does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.cache.town_cache_size()?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");
        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("🔧 Configuration options:");
        println!("   - api.base_url: japanese-addresses dataset root (without .json)");
        println!("   - api.timeout: HTTP request timeout in seconds");
        println!("   - cache.town_cache_size: cities whose town patterns stay cached");
        println!("   - dataset_dir: read a local mirror instead of the API");
        println!();
        Ok(())
    }

    fn write_template(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let content = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(config_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.cache.town_cache_size, 1_000);
        assert_eq!(config.api.timeout, 30);
        assert!(config.api.base_url.starts_with("https://"));
        assert!(config.dataset_dir.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let Ok(config) = serde_json::from_str::<Config>(r#"{"cache":{"town_cache_size":5}}"#)
        else {
            panic!("Failed to parse config");
        };
        assert_eq!(config.cache.town_cache_size, 5);
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_zero_town_cache_size_is_rejected() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("Failed to create temp dir");
        };
        let path = dir.path().join("config.json");
        let Ok(()) = std::fs::write(&path, r#"{"cache":{"town_cache_size":0}}"#) else {
            panic!("Failed to write config");
        };
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_template_round_trips_and_is_not_overwritten() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("Failed to create temp dir");
        };
        let path = dir.path().join("config.json");

        assert!(Config::write_template(&path).is_ok());
        let Ok(loaded) = Config::load_from(&path) else {
            panic!("Failed to load template");
        };
        assert_eq!(loaded, Config::default());

        assert!(Config::write_template(&path).is_err());
    }
}
