//! Datahound main entry point
//!
//! This is the command-line interface for the dataset catalog harvester.

use clap::Parser;
use datahound::config::CrawlConfig;
use datahound::crawler::run_crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Datahound: harvest open-data catalog records by tag
///
/// Walks the portal's paginated dataset listing for a tag, visits every
/// dataset detail page, and writes one JSON record per dataset to a JSONL
/// file. Requests are paced one second apart, and no URL is fetched twice.
#[derive(Parser, Debug)]
#[command(name = "datahound")]
#[command(version = "1.0.0")]
#[command(about = "Harvest open-data catalog records by tag", long_about = None)]
struct Cli {
    /// Tag to search for (e.g. cassini)
    #[arg(long)]
    tag: String,

    /// Output JSONL file
    #[arg(long, default_value = "datasets.jsonl")]
    out: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging();

    println!("=== Datahound ===");
    println!("Tag:    {}", cli.tag);
    println!("Output: {}", cli.out.display());
    println!();

    let config = CrawlConfig::default();
    let report = run_crawl(config, &cli.tag, &cli.out).await?;

    println!();
    println!("=== Complete! ===");
    println!("Datasets discovered: {}", report.discovered);
    println!("Records written:     {}", report.written);
    println!("Pages failed:        {}", report.failed);
    println!("Output file: {}", cli.out.display());

    Ok(())
}

/// Sets up the logging/tracing subscriber
///
/// `RUST_LOG` overrides the default filter when set.
fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("datahound=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
