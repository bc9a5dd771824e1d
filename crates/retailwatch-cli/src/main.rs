//! `retailwatch` binary: scrape catalogued retail product pages and append
//! the results to a Google Sheet, either once or on a cron schedule.

mod run;
mod scheduler;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use retailwatch_core::{load_app_config, load_catalog};

#[derive(Debug, Parser)]
#[command(name = "retailwatch")]
#[command(about = "Tracks retail product listings into a Google Sheet")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape the catalog once and append the batch to the sheet.
    Run,
    /// Stay resident and run on the configured cron schedule.
    Schedule,
    /// Load and validate the catalog file, then print its contents.
    Catalog,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_app_config()?;

    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::debug!(?config, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Schedule) => scheduler::run_scheduled(config).await,
        Some(Commands::Catalog) => print_catalog(&config),
        Some(Commands::Run) | None => run::run_and_write(&config).await,
    }
}

fn print_catalog(config: &retailwatch_core::AppConfig) -> anyhow::Result<()> {
    let catalog = load_catalog(&config.catalog_path)?;
    println!(
        "{} ({} retailers, {} URLs)",
        config.catalog_path.display(),
        catalog.retailers.len(),
        catalog.url_count()
    );
    for entry in &catalog.retailers {
        println!("{}:", entry.retailer);
        for url in &entry.urls {
            println!("  {url}");
        }
    }
    Ok(())
}
