//! Reporting module
//!
//! This module handles:
//! - Flattening response records into one row per user-agent block
//! - Aggregating rows into per-day statistics
//! - Writing both datasets as CSV
//! - Printing an end-of-run summary

mod daily;
mod flatten;
mod summary;
mod writer;

pub use daily::{aggregate_daily, parse_fetch_date, DailyStat};
pub use flatten::{flatten, FlatRow};
pub use summary::{print_summary, RunSummary};
pub use writer::{
    write_daily_stats, write_flat_csv, write_flat_rows, write_stats_csv, FLAT_HEADER,
    STATS_HEADER,
};
