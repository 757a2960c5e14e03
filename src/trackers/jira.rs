use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::JiraConfig;
use crate::trackers::models::{Issue, RestIssue, RestSprint, Sprint, Transition};

/// Issue tracker client abstraction.
pub enum JiraClient {
    Real(RealJira),
    #[cfg(test)]
    Mock(MockJira),
}

impl JiraClient {
    /// Create a real client. Missing credentials fail fast here; no
    /// partial attempt is ever made against the API.
    pub fn new(config: &JiraConfig) -> Result<Self> {
        Ok(JiraClient::Real(RealJira::new(config)?))
    }

    #[cfg(test)]
    pub fn mock() -> Self {
        JiraClient::Mock(MockJira::new())
    }

    /// Create an issue. Soft failures come back as ❌-marked outcome
    /// strings, per the collaborator contract.
    pub fn create_issue(&self, summary: &str, description: &str) -> String {
        match self {
            JiraClient::Real(client) => client.create_issue(summary, description),
            #[cfg(test)]
            JiraClient::Mock(client) => client.create_issue(summary, description),
        }
    }

    /// List the workflow transitions currently available on an issue.
    pub fn list_transitions(&self, issue_key: &str) -> Result<Vec<Transition>> {
        match self {
            JiraClient::Real(client) => client.list_transitions(issue_key),
            #[cfg(test)]
            JiraClient::Mock(client) => client.list_transitions(issue_key),
        }
    }

    /// Apply a transition by id.
    pub fn apply_transition(&self, issue_key: &str, transition_id: &str) -> Result<()> {
        match self {
            JiraClient::Real(client) => client.apply_transition(issue_key, transition_id),
            #[cfg(test)]
            JiraClient::Mock(client) => client.apply_transition(issue_key, transition_id),
        }
    }

    /// Search for issues with a JQL query.
    pub fn search(&self, jql: &str) -> Result<Vec<Issue>> {
        match self {
            JiraClient::Real(client) => client.search(jql),
            #[cfg(test)]
            JiraClient::Mock(client) => client.search(jql),
        }
    }

    /// Fetch the active sprint for a board, if one exists.
    pub fn active_sprint(&self, board_id: u64) -> Result<Option<Sprint>> {
        match self {
            JiraClient::Real(client) => client.active_sprint(board_id),
            #[cfg(test)]
            JiraClient::Mock(client) => client.active_sprint(board_id),
        }
    }
}

/// Real Jira client over the REST and agile APIs.
pub struct RealJira {
    http: reqwest::blocking::Client,
    url: String,
    email: String,
    token: String,
    project_key: Option<String>,
    point_fields: Vec<String>,
}

impl RealJira {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let url = config
            .url
            .clone()
            .ok_or_else(|| anyhow!("Jira credentials missing: jira.url is not configured"))?;
        let email = config
            .email
            .clone()
            .ok_or_else(|| anyhow!("Jira credentials missing: jira.email is not configured"))?;
        let token = config.api_token.clone().ok_or_else(|| {
            anyhow!("Jira credentials missing: jira.api_token is not configured")
        })?;

        Ok(RealJira {
            http: reqwest::blocking::Client::new(),
            url: url.trim_end_matches('/').to_string(),
            email,
            token,
            project_key: config.project_key.clone(),
            point_fields: config.point_fields.clone(),
        })
    }

    pub fn create_issue(&self, summary: &str, description: &str) -> String {
        let project = match &self.project_key {
            Some(key) => key.clone(),
            None => return "❌ No Jira project key configured (jira.project_key)".to_string(),
        };

        let payload = json!({
            "fields": {
                "project": { "key": project },
                "summary": summary,
                "description": description,
                "issuetype": { "name": "Task" },
            }
        });

        #[derive(Deserialize)]
        struct Created {
            key: String,
        }

        let response = self
            .http
            .post(format!("{}/rest/api/2/issue", self.url))
            .basic_auth(&self.email, Some(&self.token))
            .json(&payload)
            .send();

        match response {
            Ok(response) if response.status().is_success() => match response.json::<Created>() {
                Ok(created) => {
                    format!("✅ Success! Ticket created: {}/browse/{}", self.url, created.key)
                }
                Err(e) => format!("❌ Failed to create Jira ticket: {}", e),
            },
            Ok(response) => {
                let status = response.status();
                let body = response.text().unwrap_or_default();
                format!("❌ Failed to create Jira ticket: {} - {}", status, body)
            }
            Err(e) => format!("❌ Failed to create Jira ticket: {}", e),
        }
    }

    pub fn list_transitions(&self, issue_key: &str) -> Result<Vec<Transition>> {
        #[derive(Deserialize)]
        struct Transitions {
            transitions: Vec<Transition>,
        }

        let url = format!("{}/rest/api/3/issue/{}/transitions", self.url, issue_key);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.email, Some(&self.token))
            .send()
            .with_context(|| format!("Failed to fetch transitions for {}", issue_key))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Jira API error {} fetching transitions for {}",
                response.status(),
                issue_key
            ));
        }

        let transitions: Transitions = response
            .json()
            .context("Failed to parse Jira transitions response")?;
        Ok(transitions.transitions)
    }

    pub fn apply_transition(&self, issue_key: &str, transition_id: &str) -> Result<()> {
        let url = format!("{}/rest/api/3/issue/{}/transitions", self.url, issue_key);
        let payload = json!({ "transition": { "id": transition_id } });

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.email, Some(&self.token))
            .json(&payload)
            .send()
            .with_context(|| format!("Failed to transition {}", issue_key))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Jira API error {} transitioning {}",
                response.status(),
                issue_key
            ));
        }

        Ok(())
    }

    pub fn search(&self, jql: &str) -> Result<Vec<Issue>> {
        #[derive(Deserialize)]
        struct SearchResult {
            issues: Vec<RestIssue>,
        }

        debug!("Jira search: {}", jql);

        let response = self
            .http
            .get(format!("{}/rest/api/2/search", self.url))
            .basic_auth(&self.email, Some(&self.token))
            .query(&[("jql", jql), ("maxResults", "200")])
            .send()
            .context("Failed to execute Jira search")?;

        if !response.status().is_success() {
            return Err(anyhow!("Jira API error {} on search", response.status()));
        }

        let result: SearchResult = response
            .json()
            .context("Failed to parse Jira search response")?;

        Ok(result
            .issues
            .into_iter()
            .map(|rest| rest.into_issue(&self.point_fields))
            .collect())
    }

    pub fn active_sprint(&self, board_id: u64) -> Result<Option<Sprint>> {
        #[derive(Deserialize)]
        struct Sprints {
            values: Vec<RestSprint>,
        }

        let url = format!(
            "{}/rest/agile/1.0/board/{}/sprint?state=active",
            self.url, board_id
        );
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.email, Some(&self.token))
            .send()
            .with_context(|| format!("Failed to fetch sprints for board {}", board_id))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Jira API error {} fetching sprints for board {}",
                response.status(),
                board_id
            ));
        }

        let sprints: Sprints = response
            .json()
            .context("Failed to parse Jira sprint response")?;

        Ok(sprints.values.into_iter().next().map(Into::into))
    }
}

/// Mock tracker for testing.
#[cfg(test)]
pub struct MockJira {
    pub issues: Vec<Issue>,
    pub sprint: Option<Sprint>,
    pub transitions: std::collections::HashMap<String, Vec<Transition>>,
    pub failing_transitions: std::collections::HashSet<String>,
    pub applied: std::cell::RefCell<Vec<(String, String)>>,
}

#[cfg(test)]
impl MockJira {
    pub fn new() -> Self {
        MockJira {
            issues: vec![],
            sprint: None,
            transitions: std::collections::HashMap::new(),
            failing_transitions: std::collections::HashSet::new(),
            applied: std::cell::RefCell::new(vec![]),
        }
    }

    pub fn create_issue(&self, _summary: &str, _description: &str) -> String {
        "✅ Success! Ticket created: https://example.atlassian.net/browse/AB-100".to_string()
    }

    pub fn list_transitions(&self, issue_key: &str) -> Result<Vec<Transition>> {
        self.transitions
            .get(issue_key)
            .cloned()
            .ok_or_else(|| anyhow!("Issue {} not found", issue_key))
    }

    pub fn apply_transition(&self, issue_key: &str, transition_id: &str) -> Result<()> {
        if self.failing_transitions.contains(issue_key) {
            return Err(anyhow!("transition rejected for {}", issue_key));
        }
        self.applied
            .borrow_mut()
            .push((issue_key.to_string(), transition_id.to_string()));
        Ok(())
    }

    pub fn search(&self, _jql: &str) -> Result<Vec<Issue>> {
        Ok(self.issues.clone())
    }

    pub fn active_sprint(&self, _board_id: u64) -> Result<Option<Sprint>> {
        Ok(self.sprint.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_fail_fast() {
        let config = JiraConfig::default();
        let result = JiraClient::new(&config);

        assert!(result
            .err()
            .is_some_and(|e| e.to_string().contains("Jira credentials missing")));
    }

    #[test]
    fn test_mock_records_applied_transitions() {
        let mut mock = MockJira::new();
        mock.transitions.insert(
            "AB-1".to_string(),
            vec![Transition {
                id: "31".to_string(),
                name: "In Progress".to_string(),
            }],
        );

        let client = JiraClient::Mock(mock);
        client.apply_transition("AB-1", "31").unwrap();

        match &client {
            JiraClient::Mock(mock) => {
                assert_eq!(
                    mock.applied.borrow().as_slice(),
                    &[("AB-1".to_string(), "31".to_string())]
                );
            }
            _ => unreachable!(),
        }
    }
}
