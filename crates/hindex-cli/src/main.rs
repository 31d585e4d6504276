mod artifacts;
mod run;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hindex")]
#[command(about = "Humanity Index pipeline: fetch headlines, score them, write the daily index")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch headlines, run the scoring pipeline, and write the JSON artifacts
    Run {
        /// Directory to write artifacts to (defaults to HINDEX_DATA_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Trailing fetch window in days
        #[arg(long, default_value_t = 1)]
        days: u32,

        /// Maximum number of records to request from the source
        #[arg(long, default_value_t = 250)]
        max_records: u32,

        /// Skip the network fetch and score the built-in sample batch
        #[arg(long)]
        offline: bool,
    },
    /// Print the latest index point from the written artifacts
    Status {
        /// Directory to read artifacts from (defaults to HINDEX_DATA_DIR)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = hindex_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            output_dir,
            days,
            max_records,
            offline,
        } => run::run(&config, output_dir, days, max_records, offline).await,
        Commands::Status { data_dir } => status::run(&config, data_dir),
    }
}
