//! Pipeline orchestration
//!
//! Runs the census stages in order:
//! 1. Fetch the archive and store it decompressed
//! 2. Extract response records and rule counts
//! 3. Flatten records into the dataset and write it
//! 4. Aggregate per-day statistics and write them
//!
//! Any stage failure stops the run; later stages never see partial input.

use crate::config::Config;
use crate::extract::extract_file;
use crate::fetch::{build_http_client, fetch_archive};
use crate::report::{aggregate_daily, flatten, write_flat_csv, write_stats_csv, RunSummary};
use crate::{CensusError, Result};
use std::path::Path;

/// Switches for a single run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Reuse the archive already on disk instead of downloading it
    pub skip_fetch: bool,
}

/// Runs the whole pipeline
///
/// # Arguments
///
/// * `config` - The census configuration
/// * `options` - Per-run switches
///
/// # Returns
///
/// * `Ok(RunSummary)` - Both output files were written
/// * `Err(CensusError)` - A stage failed; see the variant for which one
pub async fn run(config: &Config, options: RunOptions) -> Result<RunSummary> {
    let archive_path = config.archive_path();

    if options.skip_fetch {
        tracing::info!("Skipping download, reusing {}", archive_path.display());
        if !archive_path.exists() {
            return Err(CensusError::MissingArchive { path: archive_path });
        }
    } else {
        let client = build_http_client(&config.http).map_err(|e| CensusError::Http {
            url: config.source.url.clone(),
            source: e,
        })?;
        let download = fetch_archive(&client, &config.source.url, &archive_path).await?;
        tracing::debug!(
            "Stored {} ({} compressed bytes, {} decompressed)",
            download.path.display(),
            download.compressed_bytes,
            download.decompressed_bytes
        );
    }

    process_archive(config)
}

/// Runs every stage after the download against the archive on disk
pub fn process_archive(config: &Config) -> Result<RunSummary> {
    let archive_path = config.archive_path();

    tracing::info!("Extracting records from {}", archive_path.display());
    let extraction = extract_file(&archive_path, config.extract.on_malformed_uri)?;
    tracing::info!(
        "Extracted {} response records ({} ok, {} errors, {} skipped)",
        extraction.records.len(),
        extraction.ok_count,
        extraction.non_ok_count,
        extraction.skipped
    );

    let rows = flatten(&extraction.records);
    let output_path = config.output_path();
    ensure_parent(&output_path)?;
    write_flat_csv(&rows, &output_path)?;
    tracing::info!("Wrote {} rows to {}", rows.len(), output_path.display());

    let daily = aggregate_daily(&rows, extraction.ok_count, extraction.non_ok_count)?;
    let stats_path = config.stats_path();
    ensure_parent(&stats_path)?;
    write_stats_csv(&daily, &stats_path)?;
    tracing::info!("Wrote {} daily rows to {}", daily.len(), stats_path.display());

    Ok(RunSummary {
        records: extraction.records.len(),
        ok_count: extraction.ok_count,
        non_ok_count: extraction.non_ok_count,
        skipped: extraction.skipped,
        rows: rows.len(),
        daily,
        output_path,
        stats_path,
    })
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
