use clap::{Parser, Subcommand};

mod commands;

use commands::{AnalyzeArgs, ExportArgs, HistoryArgs, RegionsArgs};

#[derive(Parser)]
#[command(name = "fx-bias")]
#[command(about = "Macro indicator bias analyzer for major currencies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one region's indicators and print the bias report
    Analyze(AnalyzeArgs),
    /// Show stored snapshot rows for a region, newest first
    History(HistoryArgs),
    /// Export stored snapshot rows to a CSV file
    Export(ExportArgs),
    /// List supported regions and the indicator catalog
    Regions(RegionsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Analyze(args) => commands::run_analyze(args).await?,
        Commands::History(args) => commands::run_history(args).await?,
        Commands::Export(args) => commands::run_export(args).await?,
        Commands::Regions(args) => commands::run_regions(args).await?,
    }

    Ok(())
}
