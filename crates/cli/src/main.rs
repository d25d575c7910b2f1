use clap::{Parser, Subcommand};

mod commands;

use commands::{AnalyzeArgs, SentimentArgs};

#[derive(Parser)]
#[command(name = "stock-ai")]
#[command(about = "Sentiment-driven stock trading assistant", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(
        short,
        long,
        global = true,
        default_value = stock_ai_core::config_loader::DEFAULT_CONFIG_PATH
    )]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect and aggregate sentiment for one symbol
    Sentiment(SentimentArgs),
    /// Run the trading bot over a market snapshot file
    Analyze(AnalyzeArgs),
    /// Show the risk profile presets
    Profiles,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = stock_ai_core::ConfigLoader::load_from(&cli.config)?;
    tracing::debug!(path = %cli.config, "Loaded configuration");

    match cli.command {
        Commands::Sentiment(args) => {
            commands::run_sentiment(args, &config).await?;
        }
        Commands::Analyze(args) => {
            commands::run_analyze(args, &config).await?;
        }
        Commands::Profiles => {
            commands::run_profiles()?;
        }
    }

    Ok(())
}
