//! Per-day statistics over the flat dataset

use crate::report::FlatRow;
use crate::{CensusError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashSet};

/// Summary of one calendar day of captures
///
/// `total_errors` and `total_ok` are the archive-wide response counts,
/// repeated on every day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub total_errors: u64,
    pub total_ok: u64,
    /// Distinct user agents among the day's rows; a missing agent counts once
    pub total_distinct_ua: usize,
    pub total_allows: u64,
    pub total_disallows: u64,
}

#[derive(Default)]
struct DayGroup<'a> {
    agents: HashSet<Option<&'a str>>,
    allows: u64,
    disallows: u64,
}

/// Parses a capture timestamp down to its calendar date
///
/// Accepts RFC 3339 timestamps (the WARC-Date form), naive date-times with a
/// `T` or space separator, and plain dates. With an explicit offset the date
/// is taken in that offset.
pub fn parse_fetch_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.date());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CensusError::InvalidDate {
        value: value.to_string(),
    })
}

/// Groups rows by capture date, in ascending date order
///
/// # Arguments
///
/// * `rows` - The flat dataset
/// * `ok_count` - Archive-wide count of status 200 responses
/// * `non_ok_count` - Archive-wide count of all other responses
///
/// # Returns
///
/// * `Ok(Vec<DailyStat>)` - One entry per distinct date
/// * `Err(CensusError::InvalidDate)` - A row's date could not be parsed
pub fn aggregate_daily(
    rows: &[FlatRow],
    ok_count: u64,
    non_ok_count: u64,
) -> Result<Vec<DailyStat>> {
    let mut groups: BTreeMap<NaiveDate, DayGroup> = BTreeMap::new();

    for row in rows {
        let date = parse_fetch_date(&row.fetched_date)?;
        let group = groups.entry(date).or_default();
        group.agents.insert(row.user_agent.as_deref());
        group.allows += u64::from(row.allow_count.unwrap_or(0));
        group.disallows += u64::from(row.disallow_count.unwrap_or(0));
    }

    Ok(groups
        .into_iter()
        .map(|(date, group)| DailyStat {
            date,
            total_errors: non_ok_count,
            total_ok: ok_count,
            total_distinct_ua: group.agents.len(),
            total_allows: group.allows,
            total_disallows: group.disallows,
        })
        .collect())
}
