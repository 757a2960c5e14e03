//! Shared fixtures for unit tests.
#![cfg(test)]

use jiff::civil::Date;

use crate::trackers::{Issue, Sprint};

/// Create a test issue. The summary is derived from the key.
pub fn test_issue(key: &str, status: &str, assignee: Option<&str>, points: Option<f64>) -> Issue {
    Issue {
        key: key.to_string(),
        summary: format!("Task {}", key),
        status: status.to_string(),
        assignee: assignee.map(str::to_string),
        points,
    }
}

/// Create an active sprint without dates.
pub fn test_sprint(id: u64, name: &str) -> Sprint {
    dated_sprint(id, name, None, None)
}

/// Create an active sprint with explicit calendar bounds.
pub fn dated_sprint(id: u64, name: &str, start: Option<Date>, end: Option<Date>) -> Sprint {
    Sprint {
        id,
        name: name.to_string(),
        state: "active".to_string(),
        start_date: start,
        end_date: end,
    }
}
