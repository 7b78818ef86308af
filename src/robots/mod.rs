//! Robots.txt handling module
//!
//! This module turns a robots.txt body into per-user-agent rule counts. It
//! does not interpret the rules; it only counts the lines that declare them.

mod parser;

pub use parser::{count_rules, AgentRule, ALLOW_PREFIX, DISALLOW_PREFIX, USER_AGENT_PREFIX};
