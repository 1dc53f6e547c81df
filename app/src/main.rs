#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    CitiesInput, CitiesStrategy, CommandStrategy, InfoStrategy, InitStrategy, PrefecturesStrategy,
    TownsInput, TownsStrategy, VersionStrategy,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chimei")]
#[command(about = "Matching patterns for Japanese place names", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print prefecture patterns
    Prefectures {
        /// Print the pattern set as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print city patterns of a prefecture
    Cities {
        /// Prefecture name, e.g. 東京都
        prefecture: String,

        /// Print the pattern set as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print town patterns of a city
    Towns {
        /// Prefecture name, e.g. 東京都
        prefecture: String,

        /// City name, e.g. 千代田区
        city: String,

        /// Print the pattern set as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show effective configuration
    Info,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Prefectures { json } => PrefecturesStrategy.execute(json).await,
        Commands::Cities { prefecture, json } => {
            CitiesStrategy
                .execute(CitiesInput { prefecture, json })
                .await
        }
        Commands::Towns {
            prefecture,
            city,
            json,
        } => {
            TownsStrategy
                .execute(TownsInput {
                    prefecture,
                    city,
                    json,
                })
                .await
        }
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
