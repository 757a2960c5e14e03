use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub jira: JiraConfig,
    #[serde(default)]
    pub slack: SlackConfig,
    #[serde(default)]
    pub notion: NotionConfig,
    #[serde(default)]
    pub sprint: SprintConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct JiraConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<u64>,
    /// Custom field ids probed for a story point estimate.
    #[serde(default = "default_point_fields")]
    pub point_fields: Vec<String>,
    /// Status names that count as completed work.
    #[serde(default = "default_done_statuses")]
    pub done_statuses: Vec<String>,
    /// Issues whose status contains any of these markers are excluded
    /// from sprint analysis.
    #[serde(default = "default_excluded_status_markers")]
    pub excluded_status_markers: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SlackConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
    /// Channel that receives forecasts and reminders.
    #[serde(default = "default_forecast_channel")]
    pub forecast_channel: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NotionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SprintConfig {
    /// Day of the sprint on which status reminders fire, counted from the
    /// start date.
    #[serde(default = "default_checkpoint_day")]
    pub checkpoint_day: i64,
    /// Forecasts are posted only with this many days (or fewer) left.
    #[serde(default = "default_notify_window_days")]
    pub notify_window_days: i64,
    /// Assignee display name to leave out of reminders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_assignee: Option<String>,
}

impl Config {
    /// Load configuration from the default location or a specified path.
    /// Tokens absent from the file fall back to the conventional
    /// environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {:?}", config_path))?;

        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", config_path))?;

        config.apply_env_fallbacks();

        Ok(config)
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("sprint-relay").join("config.toml"))
    }

    fn apply_env_fallbacks(&mut self) {
        fill_from_env(&mut self.jira.api_token, "JIRA_API_TOKEN");
        fill_from_env(&mut self.slack.bot_token, "SLACK_BOT_TOKEN");
        fill_from_env(&mut self.notion.token, "NOTION_TOKEN");
    }
}

fn fill_from_env(slot: &mut Option<String>, var: &str) {
    if slot.is_none() {
        *slot = std::env::var(var).ok();
    }
}

impl Default for JiraConfig {
    fn default() -> Self {
        JiraConfig {
            url: None,
            email: None,
            api_token: None,
            project_key: None,
            board_id: None,
            point_fields: default_point_fields(),
            done_statuses: default_done_statuses(),
            excluded_status_markers: default_excluded_status_markers(),
        }
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        SlackConfig {
            bot_token: None,
            forecast_channel: default_forecast_channel(),
        }
    }
}

impl Default for SprintConfig {
    fn default() -> Self {
        SprintConfig {
            checkpoint_day: default_checkpoint_day(),
            notify_window_days: default_notify_window_days(),
            excluded_assignee: None,
        }
    }
}

// Default value functions
fn default_point_fields() -> Vec<String> {
    vec![
        "customfield_10004".to_string(),
        "customfield_11441".to_string(),
    ]
}

fn default_done_statuses() -> Vec<String> {
    [
        "Done",
        "Backend Done",
        "Verification",
        "QA Approved",
        "Ready For Live",
        "BE PR Review",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_excluded_status_markers() -> Vec<String> {
    vec!["PRODUCT".to_string(), "DEPRECATED".to_string()]
}

fn default_forecast_channel() -> String {
    "backend-dev".to_string()
}

fn default_checkpoint_day() -> i64 {
    5
}

fn default_notify_window_days() -> i64 {
    4
}
