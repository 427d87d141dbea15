//! bom-dashboard: terminal dashboard over software bill-of-materials scans.

use anyhow::Result;
use bom_dashboard::cli;
use bom_dashboard::loader::LoaderConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bom-dashboard")]
#[command(version)]
#[command(about = "Terminal dashboard over software bill-of-materials scans", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by the commands that fetch BOM data.
#[derive(Parser)]
struct FetchArgs {
    /// Base URL the snapshot index and snapshots are served from
    #[arg(long, env = "BOM_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "15")]
    timeout: u64,
}

impl FetchArgs {
    fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            ..LoaderConfig::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard
    View(FetchArgs),

    /// Print the generated rows as JSON (for scripting)
    Rows {
        #[command(flatten)]
        fetch: FetchArgs,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Rebuild the snapshot index file for a directory of snapshots
    Index {
        /// Directory holding the snapshot JSON documents
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::View(fetch) => cli::run_view(fetch.loader_config()),
        Commands::Rows { fetch, pretty } => cli::run_rows(fetch.loader_config(), pretty),
        Commands::Index { dir } => cli::run_index(&dir),
    }
}
