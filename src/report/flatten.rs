use crate::extract::ResponseRecord;

/// One row of the flat dataset
///
/// Rows coming from a non-200 response carry no agent and no counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub fetched_date: String,
    pub domain: String,
    pub http_code: u16,
    pub user_agent: Option<String>,
    pub disallow_count: Option<u32>,
    pub allow_count: Option<u32>,
}

/// Expands every response record into its rows, preserving archive order
///
/// A record with agent rules yields one row per rule, in the order the blocks
/// appeared; a record without any yields a single empty row.
pub fn flatten(records: &[ResponseRecord]) -> Vec<FlatRow> {
    let mut rows = Vec::with_capacity(records.len());

    for record in records {
        if record.agents.is_empty() {
            rows.push(FlatRow {
                fetched_date: record.fetched_date.clone(),
                domain: record.domain.clone(),
                http_code: record.http_code,
                user_agent: None,
                disallow_count: None,
                allow_count: None,
            });
            continue;
        }

        for agent in &record.agents {
            rows.push(FlatRow {
                fetched_date: record.fetched_date.clone(),
                domain: record.domain.clone(),
                http_code: record.http_code,
                user_agent: agent.user_agent.clone(),
                disallow_count: Some(agent.disallow_count),
                allow_count: Some(agent.allow_count),
            });
        }
    }

    rows
}
