use anyhow::{anyhow, Result};
use jiff::civil::date;
use sprint_relay::content::{classify, Classification, ContentBlock};
use sprint_relay::dispatch::scan_issue_keys;
use sprint_relay::error::{user_friendly_error, UserFriendly};
use sprint_relay::sprint::{days_since_start, is_checkpoint_day};
use sprint_relay::Config;
use tempfile::TempDir;

// Note: Full integration tests exercising the tracker clients are limited
// because the mock clients are only available in library tests, not
// integration tests. This is a common Rust testing pattern limitation.
// End-to-end dispatch behavior is covered in src/dispatch/router.rs.

/// Test configuration loading from disk
#[test]
fn test_config_loading() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("config.toml");

    std::fs::write(
        &config_path,
        r#"
        [jira]
        url = "https://example.atlassian.net"
        email = "dev@example.com"
        project_key = "AB"
        board_id = 12

        [slack]
        forecast_channel = "sprint-updates"

        [sprint]
        checkpoint_day = 3
        "#,
    )?;

    let config = Config::load(Some(&config_path))?;

    assert_eq!(config.jira.url.as_deref(), Some("https://example.atlassian.net"));
    assert_eq!(config.jira.board_id, Some(12));
    assert_eq!(config.slack.forecast_channel, "sprint-updates");
    assert_eq!(config.sprint.checkpoint_day, 3);
    // Unset fields fall back to defaults.
    assert_eq!(config.sprint.notify_window_days, 4);
    assert_eq!(config.jira.point_fields.len(), 2);

    Ok(())
}

/// Test configuration defaults and serialization round trip
#[test]
fn test_config_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("config.toml");

    let config_str = toml::to_string_pretty(&Config::default())?;
    std::fs::write(&config_path, config_str)?;

    let config = Config::load(Some(&config_path))?;

    assert_eq!(config.sprint.checkpoint_day, 5);
    assert_eq!(config.slack.forecast_channel, "backend-dev");
    assert!(config.jira.done_statuses.iter().any(|s| s == "Done"));

    Ok(())
}

/// Test classification priority across realistic content blocks
#[test]
fn test_classification_priority() {
    let message = ContentBlock::from_text(
        "**Channel**: #backend-dev\n\n**Message**\nStandup moved to 10am tomorrow.",
    );
    assert_eq!(classify(&message), Classification::Messaging);

    let log = ContentBlock::from_text(
        "**Task Category**: Code Review\n\nReviewed AB-42 and left comments.",
    );
    assert_eq!(classify(&log), Classification::KnowledgeLog);

    let ticket = ContentBlock::from_text(
        "**Summary**\nRate limiter returns 500 under load\n\n**Description**\nSeen in prod.",
    );
    assert_eq!(classify(&ticket), Classification::IssueTicket);

    // Messaging labels outrank knowledge-log labels.
    let both = ContentBlock::from_text(
        "**Recipient**: ops\n**Task Category**: Development\n**Message**\nnote",
    );
    assert_eq!(classify(&both), Classification::Messaging);
}

/// Test field extraction from header lines
#[test]
fn test_field_extraction() {
    // Value on the label line.
    let block = ContentBlock::from_text("**Channel**: #general");
    assert_eq!(
        block.field(sprint_relay::content::RECIPIENT_LABELS).as_deref(),
        Some("#general")
    );

    // Value on the following line.
    let block = ContentBlock::from_text("**Summary**\nFix the login bug");
    assert_eq!(block.field(&["Summary"]).as_deref(), Some("Fix the login bug"));

    // Multi-line body runs to the end of the block.
    let block = ContentBlock::from_text("**Message**\nline one\n\nline two");
    assert_eq!(block.body_after("Message").as_deref(), Some("line one\n\nline two"));

    // Absent label extracts nothing.
    let block = ContentBlock::from_text("no labels here");
    assert!(block.field(&["Summary"]).is_none());
    assert!(block.body_after("Message").is_none());
}

/// Test issue key scanning across free-form text
#[test]
fn test_issue_key_scanning() {
    let keys = scan_issue_keys(
        "Finished AB-12 and started AB2-7; AB-12 still needs review. \
         Version v1.2-3 and ab-9 should not match.",
    );
    assert_eq!(keys, vec!["AB-12".to_string(), "AB2-7".to_string()]);

    assert!(scan_issue_keys("no references at all").is_empty());
}

/// Test checkpoint day arithmetic
#[test]
fn test_checkpoint_day() {
    let start = Some(date(2025, 3, 3));

    assert_eq!(days_since_start(date(2025, 3, 3), date(2025, 3, 8)), 5);
    assert!(is_checkpoint_day(start, date(2025, 3, 8), 5));
    // Exact match only: neither the day before nor the day after fires.
    assert!(!is_checkpoint_day(start, date(2025, 3, 7), 5));
    assert!(!is_checkpoint_day(start, date(2025, 3, 9), 5));
    // Undated sprints never fire.
    assert!(!is_checkpoint_day(None, date(2025, 3, 8), 5));
}

/// Test user-friendly error mapping
#[test]
fn test_user_friendly_errors() {
    let error = anyhow!("Jira credentials missing: url, api_token");
    let friendly = user_friendly_error(&error);
    assert!(friendly.message().contains("Jira"));

    let error = anyhow!("something nobody anticipated");
    let friendly = user_friendly_error(&error);
    assert!(friendly.message().contains("error"));

    // The extension trait maps a failed Result the same way.
    let result: Result<()> = Err(anyhow!("Failed to read config from nowhere"));
    let friendly = result.user_friendly().unwrap_err();
    assert_eq!(friendly.message(), "Configuration file not found");
}
