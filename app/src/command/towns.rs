use chimei_core::TownRecord;
use tracing::info;

/// Input parameters for the Towns command strategy.
#[derive(Debug, Clone)]
pub struct TownsInput {
    pub prefecture: String,
    pub city: String,
    pub json: bool,
}

/// Strategy for printing the town patterns of one city.
#[derive(Debug, Clone, Copy)]
pub struct TownsStrategy;

impl super::CommandStrategy for TownsStrategy {
    type Input = TownsInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let cache = super::pattern_cache()?;
        let patterns = cache.town_patterns(&input.prefecture, &input.city).await?;
        info!("{} towns in {}{}", patterns.len(), input.prefecture, input.city);
        super::print_patterns(&patterns, input.json, town_label)
    }
}

fn town_label(town: &TownRecord) -> String {
    if town.koaza.is_empty() {
        town.town.clone()
    } else {
        format!("{}{}", town.town, town.koaza)
    }
}
