//! CSV output for the flat dataset and the daily statistics
//!
//! Both files start with an unnamed row-index column counting from zero.
//! Missing values are written as empty fields.

use crate::report::{DailyStat, FlatRow};
use crate::Result;
use std::io::Write;
use std::path::Path;

/// Header of the flat dataset, after the index column
pub const FLAT_HEADER: [&str; 6] = [
    "fetched_date",
    "domain",
    "http_code",
    "user_agent",
    "disallow_count",
    "allow_count",
];

/// Header of the statistics file, after the index column
pub const STATS_HEADER: [&str; 6] = [
    "date",
    "total_errors",
    "total_ok",
    "total_distinct_ua",
    "total_allows",
    "total_disallows",
];

fn optional<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Writes the flat dataset to any writer
pub fn write_flat_rows<W: Write>(rows: &[FlatRow], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec![""];
    header.extend(FLAT_HEADER);
    csv.write_record(&header)?;

    for (index, row) in rows.iter().enumerate() {
        csv.write_record([
            index.to_string(),
            row.fetched_date.clone(),
            row.domain.clone(),
            row.http_code.to_string(),
            optional(&row.user_agent),
            optional(&row.disallow_count),
            optional(&row.allow_count),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Writes the daily statistics to any writer
pub fn write_daily_stats<W: Write>(stats: &[DailyStat], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec![""];
    header.extend(STATS_HEADER);
    csv.write_record(&header)?;

    for (index, stat) in stats.iter().enumerate() {
        csv.write_record([
            index.to_string(),
            stat.date.format("%Y-%m-%d").to_string(),
            stat.total_errors.to_string(),
            stat.total_ok.to_string(),
            stat.total_distinct_ua.to_string(),
            stat.total_allows.to_string(),
            stat.total_disallows.to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Writes the flat dataset to a file, replacing any previous content
pub fn write_flat_csv(rows: &[FlatRow], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_flat_rows(rows, file)
}

/// Writes the daily statistics to a file, replacing any previous content
pub fn write_stats_csv(stats: &[DailyStat], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_daily_stats(stats, file)
}
