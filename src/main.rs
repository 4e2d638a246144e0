//! Crawlit main entry point
//!
//! This is the command-line interface for the Crawlit same-site crawler.

use anyhow::Context;
use clap::Parser;
use crawlit::config::{load_config_or_default, validate, validate_seed, Config};
use crawlit::output::print_report;
use crawlit::Crawler;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Crawlit: a bounded-concurrency same-site web crawler
///
/// Crawlit visits every page reachable from URL whose address starts with
/// URL, fetching each distinct page once and counting how often it is
/// linked to.
#[derive(Parser, Debug)]
#[command(name = "crawlit")]
#[command(version)]
#[command(about = "A bounded-concurrency same-site web crawler", long_about = None)]
struct Cli {
    /// Absolute URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum number of distinct pages to record
    #[arg(value_name = "MAX_PAGES")]
    max_pages: usize,

    /// Maximum number of concurrently running visits (0 crawls sequentially)
    #[arg(value_name = "MAX_CONCURRENCY")]
    max_concurrency: usize,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Never record more than MAX_PAGES pages
    #[arg(long)]
    strict_budget: bool,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Reject a bad seed before touching the config file or the network
    validate_seed(&cli.url)?;

    let config = build_config(&cli)?;

    println!("Starting web crawl at: {}", cli.url);

    let crawler = Crawler::new(&cli.url, &config).context("Failed to set up crawler")?;
    let report = crawler.crawl().await;

    print_report(&report);

    Ok(())
}

/// Loads the config file (if any) and layers the command-line values on top
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }

    let mut config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    config.crawler.max_pages = cli.max_pages;
    config.crawler.max_concurrency = cli.max_concurrency;
    if cli.strict_budget {
        config.crawler.strict_budget = true;
    }
    if cli.timeout.is_some() {
        config.http.request_timeout_secs = cli.timeout;
    }

    validate(&config).context("Invalid configuration")?;

    tracing::debug!("Effective configuration: {:?}", config);

    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawlit=info,warn"),
            1 => EnvFilter::new("crawlit=debug,info"),
            2 => EnvFilter::new("crawlit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
