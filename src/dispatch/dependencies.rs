use regex::Regex;
use std::sync::OnceLock;
use tracing::info;

use crate::trackers::JiraClient;

/// Transition names that count as "work started", checked case-insensitively
/// against whatever the workflow exposes.
const WORK_STARTED_NAMES: &[&str] = &["in progress", "backend in progress", "backend inprogress"];

static ISSUE_KEY_RE: OnceLock<Regex> = OnceLock::new();

fn issue_key_re() -> &'static Regex {
    // Project-prefixed identifier shape: an uppercase letter, one or more
    // uppercase letters or digits, a hyphen, then digits.
    ISSUE_KEY_RE.get_or_init(|| Regex::new(r"[A-Z][A-Z0-9]+-[0-9]+").expect("valid regex"))
}

/// Scan text for embedded issue keys, deduplicated in first-seen order.
pub fn scan_issue_keys(text: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for found in issue_key_re().find_iter(text) {
        let key = found.as_str();
        if !keys.iter().any(|existing| existing == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

/// Resolves issue keys mentioned in a content block to "work started"
/// transitions against the tracker.
pub struct DependencyResolver<'a> {
    tracker: &'a JiraClient,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(tracker: &'a JiraClient) -> Self {
        DependencyResolver { tracker }
    }

    /// Attempt a transition for every issue key in the text. Each attempt
    /// is independent: a failure on one key neither blocks nor rolls back
    /// the others, and every per-key outcome is reported.
    pub fn resolve(&self, text: &str) -> Vec<String> {
        let keys = scan_issue_keys(text);
        if !keys.is_empty() {
            info!("Resolving {} issue reference(s)", keys.len());
        }

        keys.iter().map(|key| self.transition_to_started(key)).collect()
    }

    fn transition_to_started(&self, key: &str) -> String {
        let transitions = match self.tracker.list_transitions(key) {
            Ok(transitions) => transitions,
            Err(e) => return format!("❌ Jira {}: failed to fetch transitions: {}", key, e),
        };

        let target = transitions.iter().find(|t| {
            let name = t.name.to_lowercase();
            WORK_STARTED_NAMES.contains(&name.as_str())
        });

        let target = match target {
            Some(target) => target,
            None => {
                let available: Vec<&str> =
                    transitions.iter().map(|t| t.name.as_str()).collect();
                return format!(
                    "⚠️ Jira {}: no work-started transition available. Available: {}",
                    key,
                    available.join(", ")
                );
            }
        };

        match self.tracker.apply_transition(key, &target.id) {
            Ok(()) => format!("✅ Jira {}: status updated via '{}'", key, target.name),
            Err(e) => format!("❌ Jira {}: transition failed: {}", key, e),
        }
    }
}
