use tracing::info;

use super::aggregate::SprintData;

/// Summary markers that flag frontend work, which status reminders skip.
const FRONTEND_MARKERS: &[&str] = &["FE ", " FE", "(FE)", "FRONTEND"];

/// Build the checkpoint-day status reminder for a sprint.
///
/// Remaining assigned issues are grouped per assignee; frontend-marked
/// summaries and the excluded assignee (typically the person running the
/// bot) are dropped first. Returns `None` when nothing is left to remind
/// about.
pub fn build_reminder(
    data: &SprintData,
    checkpoint_day: i64,
    excluded_assignee: Option<&str>,
) -> Option<String> {
    let mut sections: Vec<String> = Vec::new();

    for (assignee, issues) in data.remaining_by_assignee() {
        if excluded_assignee.is_some_and(|excluded| assignee.contains(excluded)) {
            continue;
        }

        let tasks: Vec<String> = issues
            .iter()
            .filter(|issue| !is_frontend(&issue.summary))
            .map(|issue| format!("• *{}*: {}", issue.key, issue.summary))
            .collect();

        if !tasks.is_empty() {
            sections.push(format!("👤 *{}*\n{}", assignee, tasks.join("\n")));
        }
    }

    if sections.is_empty() {
        info!("No open assigned tasks to remind about");
        return None;
    }

    let end = data
        .sprint
        .end_date
        .map(|date| date.strftime("%b %d, %Y").to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    Some(format!(
        "👋 *Active Sprint Status Update ({})*\n\n\
         🗓️ *Ends on*: {}\n\n\
         We are {} days into the sprint! Could you please provide a quick update on your active tasks?\n\n\
         {}",
        data.sprint.name,
        end,
        checkpoint_day,
        sections.join("\n\n")
    ))
}

fn is_frontend(summary: &str) -> bool {
    let upper = summary.to_uppercase();
    FRONTEND_MARKERS.iter().any(|marker| upper.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{dated_sprint, test_issue};
    use jiff::civil::date;

    const DONE: &[&str] = &["Done"];

    fn data(issues: Vec<crate::trackers::Issue>) -> SprintData {
        SprintData::for_tests(
            dated_sprint(1, "Sprint 9", Some(date(2026, 3, 2)), Some(date(2026, 3, 12))),
            issues,
            DONE,
        )
    }

    #[test]
    fn test_reminder_groups_by_assignee() {
        let reminder = build_reminder(
            &data(vec![
                test_issue("AB-1", "To Do", Some("Ana"), None),
                test_issue("AB-2", "In Progress", Some("Ben"), None),
                test_issue("AB-3", "In Progress", Some("Ana"), None),
            ]),
            5,
            None,
        )
        .unwrap();

        assert!(reminder.contains("Active Sprint Status Update (Sprint 9)"));
        assert!(reminder.contains("*Ends on*: Mar 12, 2026"));
        assert!(reminder.contains("👤 *Ana*\n• *AB-1*: Task AB-1\n• *AB-3*: Task AB-3"));
        assert!(reminder.contains("👤 *Ben*\n• *AB-2*: Task AB-2"));
    }

    #[test]
    fn test_done_and_unassigned_issues_are_skipped() {
        let reminder = build_reminder(
            &data(vec![
                test_issue("AB-1", "Done", Some("Ana"), None),
                test_issue("AB-2", "To Do", None, None),
            ]),
            5,
            None,
        );

        assert!(reminder.is_none());
    }

    #[test]
    fn test_excluded_assignee_is_skipped() {
        let reminder = build_reminder(
            &data(vec![
                test_issue("AB-1", "To Do", Some("Ana Ruiz"), None),
                test_issue("AB-2", "To Do", Some("Ben"), None),
            ]),
            5,
            Some("Ana"),
        )
        .unwrap();

        assert!(!reminder.contains("Ana"));
        assert!(reminder.contains("Ben"));
    }

    #[test]
    fn test_frontend_summaries_are_filtered() {
        let mut fe_issue = test_issue("AB-1", "To Do", Some("Ana"), None);
        fe_issue.summary = "(FE) Button polish".to_string();
        let mut frontend_issue = test_issue("AB-2", "To Do", Some("Ana"), None);
        frontend_issue.summary = "Frontend routing fix".to_string();

        let reminder = build_reminder(&data(vec![fe_issue, frontend_issue]), 5, None);

        assert!(reminder.is_none());
    }
}
