//! Novel-Harvest main entry point
//!
//! This is the command-line interface for the Novel-Harvest downloader.

use anyhow::Context;
use clap::{ArgGroup, Parser};
use novel_harvest::config::{load_config_with_hash, Config};
use novel_harvest::crawler::{read_url_file, BatchOptions, DownloadScheduler, Harvester};
use novel_harvest::output::{load_statistics, print_statistics, print_summary, BatchSummary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Novel-Harvest: discovers, fetches and stores serialized novels
///
/// Novel-Harvest walks the category pages of a novel site, downloads each
/// novel's chapters and stores the result as a JSON file plus a database
/// row. Novels already in the database are skipped, so re-running a batch
/// only fetches what is missing.
#[derive(Parser, Debug)]
#[command(name = "novel-harvest")]
#[command(version)]
#[command(about = "Discovers, fetches and stores serialized novels", long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["url", "file", "search", "discover", "known", "stats"]),
))]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Download a single novel by its detail page URL
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Download every URL listed in a file (one per line)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Search the source site by exact title and download the match
    #[arg(short, long, value_name = "TITLE")]
    search: Option<String>,

    /// Enumerate all categories, then download every listed novel
    #[arg(short = 'D', long)]
    discover: bool,

    /// Download every novel from the last stored discovery snapshot
    #[arg(long)]
    known: bool,

    /// Show statistics from the database and exit
    #[arg(long)]
    stats: bool,

    /// Download novels in parallel (up to scheduler.max-workers at once)
    #[arg(short, long)]
    concurrent: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let harvester = Harvester::from_config(&config).context("Failed to build HTTP client")?;

    // Handle different modes
    if cli.stats {
        handle_stats(&harvester, &config)
    } else if let Some(url) = cli.url {
        handle_single(&harvester, url).await;
        Ok(())
    } else if let Some(path) = cli.file {
        let urls = read_url_file(&path)
            .await
            .with_context(|| format!("Failed to read URL file {}", path.display()))?;
        handle_batch(&harvester, &config, urls, cli.concurrent).await;
        Ok(())
    } else if let Some(title) = cli.search {
        handle_search(&harvester, &config, &title).await
    } else if cli.discover {
        handle_discover(&harvester, &config, cli.concurrent).await
    } else {
        let urls = harvester
            .known_urls()
            .context("Failed to load the category snapshot")?;
        handle_batch(&harvester, &config, urls, cli.concurrent).await;
        Ok(())
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("novel_harvest=info,warn"),
            1 => EnvFilter::new("novel_harvest=debug,info"),
            2 => EnvFilter::new("novel_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(harvester: &Harvester, config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let store = harvester.open_store().context("Failed to open the database")?;
    let stats = load_statistics(store.as_ref())?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --search mode: resolves a title, then downloads it
async fn handle_search(harvester: &Harvester, config: &Config, title: &str) -> anyhow::Result<()> {
    let found = harvester
        .search(&config.source.search_url, title)
        .await
        .with_context(|| format!("Search for \"{}\" failed", title))?;

    match found {
        Some(url) => {
            tracing::info!("Found {} at {}", title, url);
            handle_single(harvester, url).await;
        }
        None => println!("No novel titled \"{}\" was found.", title),
    }

    Ok(())
}

/// Handles the --discover mode: enumerates categories, then downloads every candidate
async fn handle_discover(
    harvester: &Harvester,
    config: &Config,
    concurrent: bool,
) -> anyhow::Result<()> {
    let report = harvester.discover(&config.categories).await?;

    for failure in &report.failures {
        println!("Category {} skipped: {}", failure.title, failure.reason);
    }
    println!(
        "Discovered {} novels in {} categories.\n",
        report.candidates.len(),
        report.categories.len()
    );

    handle_batch(harvester, config, report.candidates, concurrent).await;
    Ok(())
}

/// Downloads one novel without batch pacing
async fn handle_single(harvester: &Harvester, url: String) {
    let outcome = harvester.download_novel(&url).await;

    println!();
    print_summary(&BatchSummary::from_results(&[(url, outcome)]));
}

/// Downloads a batch and prints the per-URL summary
///
/// Per-URL failures are reported, never turned into a failing exit status.
async fn handle_batch(harvester: &Harvester, config: &Config, urls: Vec<String>, concurrent: bool) {
    let scheduler = DownloadScheduler::new(BatchOptions::from_config(config, concurrent));
    let results = harvester.download_batch(&scheduler, urls).await;

    println!();
    print_summary(&BatchSummary::from_results(&results));
}
