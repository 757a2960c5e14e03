use jiff::civil::Date;
use serde::Deserialize;
use serde_json::Value;

/// Snapshot of an issue as read from the tracker. The tracker owns the
/// record; the core only works with these snapshots.
#[derive(Debug, Clone)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub assignee: Option<String>,
    pub points: Option<f64>,
}

impl Issue {
    pub fn points_or_zero(&self) -> f64 {
        self.points.unwrap_or(0.0)
    }
}

/// A sprint as reported by the tracker's board API. Start and end dates
/// are optional; an undated sprint is a valid state.
#[derive(Debug, Clone)]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    pub state: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// An available workflow transition on an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
}

/// Wire shape of a Jira issue from the search API.
#[derive(Debug, Deserialize)]
pub struct RestIssue {
    pub key: String,
    pub fields: RestFields,
}

#[derive(Debug, Deserialize)]
pub struct RestFields {
    pub summary: Option<String>,
    pub status: RestStatus,
    pub assignee: Option<RestUser>,
    /// Story points live in instance-specific custom fields; capture
    /// everything else so the configured field ids can be probed.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct RestStatus {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RestUser {
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl RestIssue {
    /// Convert to the core snapshot, probing the given custom field ids
    /// for a point estimate. First numeric value wins; absent means no
    /// estimate, which downstream treats as zero.
    pub fn into_issue(self, point_fields: &[String]) -> Issue {
        let points = point_fields
            .iter()
            .find_map(|field| self.fields.extra.get(field).and_then(Value::as_f64));

        Issue {
            key: self.key,
            summary: self.fields.summary.unwrap_or_default(),
            status: self.fields.status.name,
            assignee: self.fields.assignee.map(|user| user.display_name),
            points,
        }
    }
}

/// Wire shape of a sprint from the agile board API.
#[derive(Debug, Deserialize)]
pub struct RestSprint {
    pub id: u64,
    pub name: String,
    pub state: String,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

impl From<RestSprint> for Sprint {
    fn from(rest: RestSprint) -> Sprint {
        Sprint {
            id: rest.id,
            name: rest.name,
            state: rest.state,
            start_date: rest.start_date.as_deref().and_then(parse_sprint_date),
            end_date: rest.end_date.as_deref().and_then(parse_sprint_date),
        }
    }
}

/// Parse the calendar date out of a Jira timestamp like
/// `2023-10-23T09:00:00.000Z`. An unparseable date is treated as absent.
fn parse_sprint_date(raw: &str) -> Option<Date> {
    raw.get(..10)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_parse_sprint_date() {
        assert_eq!(
            parse_sprint_date("2023-10-23T09:00:00.000Z"),
            Some(date(2023, 10, 23))
        );
        assert_eq!(parse_sprint_date("2023-10-23"), Some(date(2023, 10, 23)));
        assert_eq!(parse_sprint_date("soon"), None);
        assert_eq!(parse_sprint_date(""), None);
    }

    #[test]
    fn test_rest_issue_point_probing() {
        let json = serde_json::json!({
            "key": "AB-12",
            "fields": {
                "summary": "Fix the login flow",
                "status": { "name": "In Progress" },
                "assignee": { "displayName": "Dana Petrov" },
                "customfield_10004": null,
                "customfield_11441": 5.0
            }
        });

        let rest: RestIssue = serde_json::from_value(json).unwrap();
        let issue = rest.into_issue(&[
            "customfield_10004".to_string(),
            "customfield_11441".to_string(),
        ]);

        assert_eq!(issue.key, "AB-12");
        assert_eq!(issue.status, "In Progress");
        assert_eq!(issue.assignee.as_deref(), Some("Dana Petrov"));
        assert_eq!(issue.points, Some(5.0));
    }

    #[test]
    fn test_rest_issue_without_points_or_assignee() {
        let json = serde_json::json!({
            "key": "AB-13",
            "fields": {
                "summary": "Spike",
                "status": { "name": "To Do" },
                "assignee": null
            }
        });

        let rest: RestIssue = serde_json::from_value(json).unwrap();
        let issue = rest.into_issue(&["customfield_10004".to_string()]);

        assert_eq!(issue.points, None);
        assert_eq!(issue.points_or_zero(), 0.0);
        assert_eq!(issue.assignee, None);
    }
}
