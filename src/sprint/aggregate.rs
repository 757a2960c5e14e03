use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use tracing::info;

use crate::config::JiraConfig;
use crate::trackers::{Issue, JiraClient, Sprint};

/// Fetches and filters the active sprint's issues for analysis.
pub struct SprintAggregator<'a> {
    tracker: &'a JiraClient,
    jira: &'a JiraConfig,
}

impl<'a> SprintAggregator<'a> {
    pub fn new(tracker: &'a JiraClient, jira: &'a JiraConfig) -> Self {
        SprintAggregator { tracker, jira }
    }

    /// Collect the active sprint and its relevant issues.
    ///
    /// Returns `Ok(None)` when there is no active sprint or nothing
    /// survives the status filter — a skip condition for callers, never an
    /// empty-but-valid report. Missing configuration is an error.
    pub fn collect(&self) -> Result<Option<SprintData>> {
        let board_id = self
            .jira
            .board_id
            .ok_or_else(|| anyhow!("jira.board_id is not configured"))?;
        let project_key = self
            .jira
            .project_key
            .as_deref()
            .ok_or_else(|| anyhow!("jira.project_key is not configured"))?;

        let sprint = match self.tracker.active_sprint(board_id)? {
            Some(sprint) => sprint,
            None => {
                info!("No active sprint found for board {}", board_id);
                return Ok(None);
            }
        };

        let jql = format!("sprint = {} AND project = {}", sprint.id, project_key);
        let all_issues = self.tracker.search(&jql)?;

        let issues: Vec<Issue> = all_issues
            .into_iter()
            .filter(|issue| {
                let status = issue.status.to_uppercase();
                !self
                    .jira
                    .excluded_status_markers
                    .iter()
                    .any(|marker| status.contains(&marker.to_uppercase()))
            })
            .collect();

        if issues.is_empty() {
            info!("No relevant issues in sprint '{}'", sprint.name);
            return Ok(None);
        }

        info!("Sprint '{}': {} issue(s) after filtering", sprint.name, issues.len());

        Ok(Some(SprintData {
            sprint,
            issues,
            done_statuses: self
                .jira
                .done_statuses
                .iter()
                .map(|s| s.to_uppercase())
                .collect(),
        }))
    }
}

/// The unit of sprint progress: points when any issue carries an estimate,
/// otherwise a plain issue count.
#[derive(Debug, Clone, PartialEq)]
pub struct SprintMetric {
    pub name: &'static str,
    pub total: f64,
    pub completed: f64,
}

/// An active sprint with its filtered issues, grouped and normalized for
/// analysis.
#[derive(Debug)]
pub struct SprintData {
    pub sprint: Sprint,
    pub issues: Vec<Issue>,
    done_statuses: Vec<String>,
}

impl SprintData {
    #[cfg(test)]
    pub fn for_tests(sprint: Sprint, issues: Vec<Issue>, done_statuses: &[&str]) -> Self {
        SprintData {
            sprint,
            issues,
            done_statuses: done_statuses.iter().map(|s| s.to_uppercase()).collect(),
        }
    }

    pub fn is_done(&self, issue: &Issue) -> bool {
        self.done_statuses.contains(&issue.status.to_uppercase())
    }

    pub fn remaining(&self) -> Vec<&Issue> {
        self.issues.iter().filter(|i| !self.is_done(i)).collect()
    }

    /// Normalize progress to a points-or-count metric. When the point sum
    /// across all issues is exactly zero, the issues themselves become the
    /// unit — a deliberate degrade, not an error.
    pub fn metric(&self) -> SprintMetric {
        let total: f64 = self.issues.iter().map(Issue::points_or_zero).sum();

        if total == 0.0 {
            let completed = self.issues.iter().filter(|i| self.is_done(i)).count();
            return SprintMetric {
                name: "Tickets",
                total: self.issues.len() as f64,
                completed: completed as f64,
            };
        }

        let completed = self
            .issues
            .iter()
            .filter(|i| self.is_done(i))
            .map(Issue::points_or_zero)
            .sum();

        SprintMetric {
            name: "Points",
            total,
            completed,
        }
    }

    /// Group the remaining assigned issues by assignee display name.
    /// Unassigned issues are skipped; there is nobody to remind.
    pub fn remaining_by_assignee(&self) -> BTreeMap<&str, Vec<&Issue>> {
        let mut groups: BTreeMap<&str, Vec<&Issue>> = BTreeMap::new();
        for issue in self.remaining() {
            if let Some(assignee) = issue.assignee.as_deref() {
                groups.entry(assignee).or_default().push(issue);
            }
        }
        groups
    }
}
