//! Robots-Census main entry point
//!
//! This is the command-line interface for the Robots-Census pipeline.

use anyhow::Context;
use clap::Parser;
use robots_census::config::{load_config_with_hash, Config};
use robots_census::pipeline::{run, RunOptions};
use robots_census::report::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Robots-Census: crawl-policy statistics from a robots.txt WARC capture
///
/// Downloads the configured archive, counts Disallow/Allow rules per user
/// agent for every robots.txt fetch, and writes a flat dataset plus daily
/// statistics as CSV.
#[derive(Parser, Debug)]
#[command(name = "robots-census")]
#[command(version = "1.0.0")]
#[command(about = "Crawl-policy statistics from a robots.txt WARC capture", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Reuse the archive already in the raw directory instead of downloading it
    #[arg(long)]
    skip_fetch: bool,

    /// Show the effective configuration and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path).map_err(|e| {
                tracing::error!("Failed to load configuration: {}", e);
                e
            })?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let options = RunOptions {
        skip_fetch: cli.skip_fetch,
    };

    let summary = run(&config, options)
        .await
        .map_err(|e| {
            tracing::error!("Census failed: {}", e);
            e
        })
        .with_context(|| format!("census run over {} did not complete", config.source.url))?;

    tracing::info!("Census completed successfully");
    if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("robots_census=info,warn"),
            1 => EnvFilter::new("robots_census=debug,info"),
            2 => EnvFilter::new("robots_census=trace,debug"),
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

/// Handles the --dry-run mode: shows what a run would do
fn handle_dry_run(config: &Config) {
    println!("=== Robots-Census Dry Run ===\n");

    println!("Source:");
    println!("  URL: {}", config.source.url);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\nExtraction:");
    println!(
        "  On malformed URI: {:?}",
        config.extract.on_malformed_uri
    );

    println!("\nFiles:");
    println!("  Archive: {}", config.archive_path().display());
    println!("  Dataset: {}", config.output_path().display());
    println!("  Statistics: {}", config.stats_path().display());

    println!("\n✓ Configuration is valid");
}
