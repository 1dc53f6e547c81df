use chimei_config::Config;
use chimei_core::TOWN_PATTERN_TTL;

/// Strategy for displaying the effective configuration.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== chimei Configuration ===\n");

        println!("Config file: {}", Config::config_path()?.display());
        println!();

        println!("Dataset:");
        match &config.dataset_dir {
            Some(dir) => println!("  Local mirror: {}", dir.display()),
            None => {
                println!("  API: {}", config.api.base_url);
                println!("  Timeout: {}s", config.api.timeout);
                println!("  User-Agent: {}", config.api.user_agent);
            }
        }
        println!();

        println!("Cache:");
        println!("  Town cache size: {}", config.cache.town_cache_size()?);
        println!("  Town pattern TTL: {} days", TOWN_PATTERN_TTL.as_secs() / 86_400);

        Ok(())
    }
}
