/// Input parameters for the Cities command strategy.
#[derive(Debug, Clone)]
pub struct CitiesInput {
    pub prefecture: String,
    pub json: bool,
}

/// Strategy for printing the city patterns of one prefecture.
#[derive(Debug, Clone, Copy)]
pub struct CitiesStrategy;

impl super::CommandStrategy for CitiesStrategy {
    type Input = CitiesInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let cache = super::pattern_cache()?;
        let patterns = cache.city_patterns(&input.prefecture).await?;
        super::print_patterns(&patterns, input.json, String::clone)
    }
}
