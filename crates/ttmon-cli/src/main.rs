use clap::{Parser, Subcommand};

mod analyze;
mod run;

#[derive(Debug, Parser)]
#[command(name = "ttmon")]
#[command(about = "TikTok monitoring pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape all active targets, filter, analyze, and persist.
    Run,
    /// Re-run AI analysis over stored content without one.
    Analyze,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ttmon_core::load_app_config_from_env()
        .map_err(|e| anyhow::anyhow!("configuration error: {e}"))?;

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze) => analyze::run_analyze(&config).await,
        Some(Commands::Run) | None => run::run_pipeline(&config).await,
    }
}
