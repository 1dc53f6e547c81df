/// Strategy for printing prefecture patterns.
#[derive(Debug, Clone, Copy)]
pub struct PrefecturesStrategy;

impl super::CommandStrategy for PrefecturesStrategy {
    /// Whether to print JSON.
    type Input = bool;

    async fn execute(&self, json: Self::Input) -> anyhow::Result<()> {
        let cache = super::pattern_cache()?;
        let patterns = cache.prefecture_patterns().await?;
        super::print_patterns(&patterns, json, String::clone)
    }
}
