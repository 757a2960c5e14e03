use anyhow::{anyhow, Result};
use jiff::Zoned;
use serde_json::json;

use crate::config::NotionConfig;

const NOTION_API_VERSION: &str = "2022-06-28";

/// Knowledge-log client abstraction.
pub enum NotionClient {
    Real(RealNotion),
    #[cfg(test)]
    Mock(MockNotion),
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Result<Self> {
        Ok(NotionClient::Real(RealNotion::new(config)?))
    }

    #[cfg(test)]
    pub fn mock() -> Self {
        NotionClient::Mock(MockNotion::new())
    }

    /// Record a dated work-log entry under the given category. Returns an
    /// outcome string per the collaborator contract.
    pub fn record(&self, category: &str, body: &str) -> String {
        match self {
            NotionClient::Real(client) => client.record(category, body),
            #[cfg(test)]
            NotionClient::Mock(client) => client.record(category, body),
        }
    }
}

/// Real Notion client writing pages into a work-log database.
pub struct RealNotion {
    http: reqwest::blocking::Client,
    token: String,
    database_id: String,
}

impl RealNotion {
    pub fn new(config: &NotionConfig) -> Result<Self> {
        let token = config.token.clone().ok_or_else(|| {
            anyhow!("Notion credentials missing: notion.token is not configured")
        })?;
        let database_id = config.database_id.clone().ok_or_else(|| {
            anyhow!("Notion credentials missing: notion.database_id is not configured")
        })?;

        Ok(RealNotion {
            http: reqwest::blocking::Client::new(),
            token,
            database_id,
        })
    }

    pub fn record(&self, category: &str, body: &str) -> String {
        let today = Zoned::now().date().to_string();

        let payload = json!({
            "parent": { "database_id": self.database_id },
            "properties": {
                "Name": { "title": [{ "text": { "content": format!("Work Log: {}", category) } }] },
                "Category": { "select": { "name": category } },
                "Date": { "date": { "start": today } },
            },
            "children": [{
                "object": "block",
                "type": "paragraph",
                "paragraph": { "rich_text": [{ "type": "text", "text": { "content": body } }] },
            }],
        });

        let response = self
            .http
            .post("https://api.notion.com/v1/pages")
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_API_VERSION)
            .json(&payload)
            .send();

        match response {
            Ok(response) if response.status().is_success() => {
                format!("✅ Work logged in Notion under {}", category)
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().unwrap_or_default();
                format!("❌ Failed to log to Notion: {} - {}", status, body)
            }
            Err(e) => format!("❌ Failed to log to Notion: {}", e),
        }
    }
}

/// Mock knowledge-log client for testing.
#[cfg(test)]
pub struct MockNotion {
    pub fail: bool,
    pub recorded: std::cell::RefCell<Vec<(String, String)>>,
}

#[cfg(test)]
impl MockNotion {
    pub fn new() -> Self {
        MockNotion {
            fail: false,
            recorded: std::cell::RefCell::new(vec![]),
        }
    }

    pub fn record(&self, category: &str, body: &str) -> String {
        if self.fail {
            return "❌ Failed to log to Notion: mock failure".to_string();
        }
        self.recorded
            .borrow_mut()
            .push((category.to_string(), body.to_string()));
        format!("✅ Work logged in Notion under {}", category)
    }
}
