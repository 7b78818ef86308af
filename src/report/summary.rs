//! End-of-run summary printed to stdout

use crate::report::DailyStat;
use std::path::PathBuf;

/// What a completed run produced
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub records: usize,
    pub ok_count: u64,
    pub non_ok_count: u64,
    pub skipped: u64,
    pub rows: usize,
    pub daily: Vec<DailyStat>,
    pub output_path: PathBuf,
    pub stats_path: PathBuf,
}

impl RunSummary {
    /// Share of responses with status 200, as a percentage
    pub fn ok_rate(&self) -> f64 {
        let total = self.ok_count + self.non_ok_count;
        if total == 0 {
            return 0.0;
        }
        (self.ok_count as f64 / total as f64) * 100.0
    }
}

/// Prints the summary in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Robots Census ===\n");

    println!("Extraction:");
    println!("  Response records: {}", summary.records);
    println!(
        "  OK (200): {} ({:.1}%)",
        summary.ok_count,
        summary.ok_rate()
    );
    println!("  Errors (non-200): {}", summary.non_ok_count);
    if summary.skipped > 0 {
        println!("  Skipped (malformed URI): {}", summary.skipped);
    }
    println!("  Dataset rows: {}", summary.rows);
    println!();

    if !summary.daily.is_empty() {
        println!("Daily Statistics:");
        for day in &summary.daily {
            println!(
                "  {}: {} distinct agents, {} disallows, {} allows",
                day.date, day.total_distinct_ua, day.total_disallows, day.total_allows
            );
        }
        println!();
    }

    println!("Output:");
    println!("  Dataset: {}", summary.output_path.display());
    println!("  Statistics: {}", summary.stats_path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_rate() {
        let summary = RunSummary {
            ok_count: 3,
            non_ok_count: 1,
            ..Default::default()
        };
        assert!((summary.ok_rate() - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_ok_rate_no_responses() {
        assert_eq!(RunSummary::default().ok_rate(), 0.0);
    }
}
