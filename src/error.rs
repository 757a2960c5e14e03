use std::fmt;

/// User-friendly error wrapper
#[derive(Debug)]
pub struct UserError {
    message: String,
    details: Option<String>,
    suggestion: Option<String>,
}

impl UserError {
    pub fn new(message: impl Into<String>) -> Self {
        UserError {
            message: message.into(),
            details: None,
            suggestion: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Format the error for display on stderr.
    pub fn display(&self) {
        eprintln!("\n❌ Error: {}", self.message);

        if let Some(ref details) = self.details {
            eprintln!("\n   {}", details);
        }

        if let Some(ref suggestion) = self.suggestion {
            eprintln!("\n💡 {}", suggestion);
        }
    }
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref details) = self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for UserError {}

/// Convert common errors to user-friendly messages
pub fn user_friendly_error(error: &anyhow::Error) -> UserError {
    let error_str = format!("{:#}", error);

    // Configuration errors
    if error_str.contains("Failed to read config") {
        return UserError::new("Configuration file not found")
            .with_details("No sprint-relay config file could be read")
            .with_suggestion("Run 'sprint-relay init' to create a configuration");
    }

    if error_str.contains("Failed to parse config") {
        return UserError::new("Invalid configuration file")
            .with_details("The configuration file contains syntax errors")
            .with_suggestion("Check the TOML syntax in your config.toml");
    }

    // Credential errors surface before any API call is attempted
    if error_str.contains("Jira credentials missing") {
        return UserError::new("Jira is not configured")
            .with_details(error_str)
            .with_suggestion(
                "Set jira.url, jira.email, and jira.api_token in the config (or JIRA_API_TOKEN in the environment)",
            );
    }

    if error_str.contains("Slack credentials missing") {
        return UserError::new("Slack is not configured")
            .with_details(error_str)
            .with_suggestion("Set slack.bot_token in the config (or SLACK_BOT_TOKEN in the environment)");
    }

    if error_str.contains("Notion credentials missing") {
        return UserError::new("Notion is not configured")
            .with_details(error_str)
            .with_suggestion("Set notion.token and notion.database_id in the config");
    }

    if error_str.contains("board_id is not configured") {
        return UserError::new("No Jira board configured")
            .with_details("Sprint analytics need a board to find the active sprint")
            .with_suggestion("Set jira.board_id in the config");
    }

    if error_str.contains("401") || error_str.contains("403") {
        return UserError::new("Authentication rejected")
            .with_details("A backend rejected the configured credentials")
            .with_suggestion("Check that your API tokens are current and have the right scopes");
    }

    // Network errors
    if error_str.contains("network") || error_str.contains("connection") {
        return UserError::new("Network connection failed")
            .with_details("Could not reach a backend API")
            .with_suggestion("Check your internet connection and try again");
    }

    // Default fallback
    UserError::new("An unexpected error occurred").with_details(error_str)
}

/// Wrap a result with user-friendly error handling
pub trait UserFriendly<T> {
    fn user_friendly(self) -> Result<T, UserError>;
}

impl<T> UserFriendly<T> for anyhow::Result<T> {
    fn user_friendly(self) -> Result<T, UserError> {
        self.map_err(|e| user_friendly_error(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_config_error_mapping() {
        let error = anyhow!("Failed to read config from \"/home/x/config.toml\"");
        let user_error = user_friendly_error(&error);
        assert_eq!(user_error.message(), "Configuration file not found");
    }

    #[test]
    fn test_credential_error_mapping() {
        let error = anyhow!("Jira credentials missing: jira.url is not configured");
        let user_error = user_friendly_error(&error);
        assert_eq!(user_error.message(), "Jira is not configured");
    }

    #[test]
    fn test_context_chain_is_inspected() {
        // Context added with anyhow wraps the original message; the full
        // chain has to be searched, not just the outermost layer.
        let error = anyhow!("Slack credentials missing: slack.bot_token is not configured")
            .context("Failed to create Slack client");
        let user_error = user_friendly_error(&error);
        assert_eq!(user_error.message(), "Slack is not configured");
    }

    #[test]
    fn test_unknown_error_falls_through() {
        let error = anyhow!("something odd");
        let user_error = user_friendly_error(&error);
        assert_eq!(user_error.message(), "An unexpected error occurred");
    }
}
