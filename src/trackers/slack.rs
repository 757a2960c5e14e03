use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::json;

use crate::config::SlackConfig;

/// Messaging client abstraction.
pub enum SlackClient {
    Real(RealSlack),
    #[cfg(test)]
    Mock(MockSlack),
}

impl SlackClient {
    pub fn new(config: &SlackConfig) -> Result<Self> {
        Ok(SlackClient::Real(RealSlack::new(config)?))
    }

    #[cfg(test)]
    pub fn mock() -> Self {
        SlackClient::Mock(MockSlack::new())
    }

    /// Send a message. The target may be a channel name (with or without
    /// the leading `#`) or an already-resolved conversation id. The result
    /// is an outcome string; soft failures are data, not errors.
    pub fn send(&self, target: &str, body: &str) -> String {
        match self {
            SlackClient::Real(client) => client.send(target, body),
            #[cfg(test)]
            SlackClient::Mock(client) => client.send(target, body),
        }
    }
}

/// Real Slack client over chat.postMessage.
pub struct RealSlack {
    http: reqwest::blocking::Client,
    token: String,
}

impl RealSlack {
    pub fn new(config: &SlackConfig) -> Result<Self> {
        let token = config.bot_token.clone().ok_or_else(|| {
            anyhow!("Slack credentials missing: slack.bot_token is not configured")
        })?;

        Ok(RealSlack {
            http: reqwest::blocking::Client::new(),
            token,
        })
    }

    pub fn send(&self, target: &str, body: &str) -> String {
        // Generator output uses markdown bold; Slack wants single stars.
        let text = body.replace("**", "*");
        let channel = resolve_target(target);

        #[derive(Deserialize)]
        struct PostResponse {
            ok: bool,
            error: Option<String>,
        }

        let response = self
            .http
            .post("https://slack.com/api/chat.postMessage")
            .bearer_auth(&self.token)
            .json(&json!({ "channel": channel, "text": text }))
            .send();

        match response {
            Ok(response) => match response.json::<PostResponse>() {
                Ok(posted) if posted.ok => format!("✅ Slack message sent to {}", channel),
                Ok(posted) => {
                    let error = posted.error.unwrap_or_else(|| "unknown_error".to_string());
                    if error == "channel_not_found" {
                        format!(
                            "❌ Slack Error: Channel '{}' not found. Ensure the bot is invited to the channel.",
                            channel
                        )
                    } else {
                        format!("❌ Failed to send Slack message: {}", error)
                    }
                }
                Err(e) => format!("❌ Failed to parse Slack response: {}", e),
            },
            Err(e) => format!("❌ Failed to send Slack message: {}", e),
        }
    }
}

/// Channel names get a `#` prefix; conversation ids (C…, U…, D…) and
/// already-prefixed names pass through untouched.
fn resolve_target(target: &str) -> String {
    if target.starts_with('#')
        || target.starts_with('C')
        || target.starts_with('U')
        || target.starts_with('D')
    {
        target.to_string()
    } else {
        format!("#{}", target)
    }
}

/// Mock messaging client for testing.
#[cfg(test)]
pub struct MockSlack {
    pub fail: bool,
    pub sent: std::cell::RefCell<Vec<(String, String)>>,
}

#[cfg(test)]
impl MockSlack {
    pub fn new() -> Self {
        MockSlack {
            fail: false,
            sent: std::cell::RefCell::new(vec![]),
        }
    }

    pub fn send(&self, target: &str, body: &str) -> String {
        if self.fail {
            return "❌ Failed to send Slack message: mock failure".to_string();
        }
        let channel = resolve_target(target);
        self.sent
            .borrow_mut()
            .push((channel.clone(), body.to_string()));
        format!("✅ Slack message sent to {}", channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("backend-dev"), "#backend-dev");
        assert_eq!(resolve_target("#backend-dev"), "#backend-dev");
        assert_eq!(resolve_target("C024BE91L"), "C024BE91L");
        assert_eq!(resolve_target("U1234"), "U1234");
    }

    #[test]
    fn test_missing_token_fails_fast() {
        let config = SlackConfig::default();
        assert!(SlackClient::new(&config).is_err());
    }

    #[test]
    fn test_mock_send_records_message() {
        let client = SlackClient::mock();
        let outcome = client.send("general", "hello *there*");

        assert!(outcome.starts_with("✅"));
        match &client {
            SlackClient::Mock(mock) => {
                let sent = mock.sent.borrow();
                assert_eq!(sent.len(), 1);
                assert_eq!(sent[0].0, "#general");
            }
            _ => unreachable!(),
        }
    }
}
