//! Robots.txt rule counting
//!
//! Directives are recognized by exact, case-sensitive line prefix. A line
//! indented by whitespace or written as `user-agent:` is not a directive.

/// Starts a new user-agent block
pub const USER_AGENT_PREFIX: &str = "User-agent:";

/// Counted as a disallow rule of the current block
pub const DISALLOW_PREFIX: &str = "Disallow:";

/// Counted as an allow rule of the current block
pub const ALLOW_PREFIX: &str = "Allow:";

/// Rule counts for one user-agent block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentRule {
    /// Agent named by the block, `None` when the body declares no agent
    pub user_agent: Option<String>,
    pub disallow_count: u32,
    pub allow_count: u32,
}

/// Accumulates counts while scanning a body line by line
#[derive(Debug, Default)]
struct RuleCounter {
    current_agent: Option<String>,
    disallow_count: u32,
    allow_count: u32,
    rules: Vec<AgentRule>,
}

impl RuleCounter {
    fn feed(&mut self, line: &str) {
        if line.starts_with(USER_AGENT_PREFIX) {
            // Rules seen before the first agent line stay with the first block
            if self.current_agent.is_some() {
                self.flush();
            }
            self.current_agent = Some(agent_name(line));
        } else if line.starts_with(DISALLOW_PREFIX) {
            self.disallow_count += 1;
        } else if line.starts_with(ALLOW_PREFIX) {
            self.allow_count += 1;
        }
    }

    fn flush(&mut self) {
        self.rules.push(AgentRule {
            user_agent: self.current_agent.clone(),
            disallow_count: self.disallow_count,
            allow_count: self.allow_count,
        });
        self.disallow_count = 0;
        self.allow_count = 0;
    }

    fn finish(mut self) -> Vec<AgentRule> {
        self.flush();
        self.rules
    }
}

/// Agent name: the text between the first and second colon, trimmed
fn agent_name(line: &str) -> String {
    line.split(':').nth(1).unwrap_or_default().trim().to_string()
}

/// Counts `Disallow:` and `Allow:` lines per `User-agent:` block
///
/// Always returns at least one entry: a body without any `User-agent:` line
/// yields a single rule with no agent name carrying whatever was counted.
///
/// # Example
///
/// ```
/// use robots_census::robots::count_rules;
///
/// let rules = count_rules("User-agent: A\nDisallow: /x\nUser-agent: B\nAllow: /y");
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules[0].user_agent.as_deref(), Some("A"));
/// assert_eq!(rules[1].allow_count, 1);
/// ```
pub fn count_rules(body: &str) -> Vec<AgentRule> {
    let mut counter = RuleCounter::default();
    for line in body.split('\n') {
        counter.feed(line);
    }
    counter.finish()
}
