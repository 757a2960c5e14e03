use tracing::info;

use super::dependencies::DependencyResolver;
use super::{DispatchReport, FALLBACK_CATEGORY, FALLBACK_SUMMARY};
use crate::content::{
    classify, Classification, ContentBlock, BODY_LABEL, CATEGORY_LABEL, RECIPIENT_LABELS,
    SUMMARY_LABEL,
};
use crate::trackers::{JiraClient, NotionClient, SlackClient};

/// Routes a content block to its target backend and runs any cross-system
/// side effects the content implies.
///
/// One dispatch is a single pass: classify, extract, invoke, resolve
/// dependencies (knowledge-log path only), report. Every path terminates
/// in a report; there is no retry loop here.
pub struct DispatchRouter<'a> {
    tracker: &'a JiraClient,
    messenger: &'a SlackClient,
    knowledge_log: &'a NotionClient,
}

impl<'a> DispatchRouter<'a> {
    pub fn new(
        tracker: &'a JiraClient,
        messenger: &'a SlackClient,
        knowledge_log: &'a NotionClient,
    ) -> Self {
        DispatchRouter {
            tracker,
            messenger,
            knowledge_log,
        }
    }

    pub fn dispatch(&self, block: &ContentBlock) -> DispatchReport {
        match classify(block) {
            Classification::Messaging => self.dispatch_message(block),
            Classification::KnowledgeLog => self.dispatch_log_entry(block),
            Classification::IssueTicket => self.dispatch_ticket(block),
        }
    }

    /// Messaging requires both a recipient and a body; a missing field is
    /// a hard failure naming the field, never a send-to-default.
    fn dispatch_message(&self, block: &ContentBlock) -> DispatchReport {
        let recipient = block
            .field(RECIPIENT_LABELS)
            .map(|value| value.trim_start_matches('#').trim().to_string())
            .filter(|value| !value.is_empty());
        let body = block.body_after(BODY_LABEL);

        match (recipient, body) {
            (Some(recipient), Some(body)) => {
                info!("Dispatching message to '{}'", recipient);
                DispatchReport::from_primary(self.messenger.send(&recipient, &body))
            }
            (recipient, body) => {
                let mut missing = Vec::new();
                if recipient.is_none() {
                    missing.push("recipient (Channel/Recipient)");
                }
                if body.is_none() {
                    missing.push("message body (Message)");
                }
                DispatchReport::failure(format!(
                    "❌ Missing required field(s): {}",
                    missing.join(", ")
                ))
            }
        }
    }

    /// Classification guarantees the category label is present, but
    /// extraction can still come up empty; a fixed fallback category is
    /// substituted in that case. Dependency resolution always runs against
    /// the raw text, whether or not the log write succeeded.
    fn dispatch_log_entry(&self, block: &ContentBlock) -> DispatchReport {
        let category = block
            .field(&[CATEGORY_LABEL])
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

        info!("Recording knowledge-log entry under '{}'", category);
        let primary = self.knowledge_log.record(&category, block.text());

        let dependents = DependencyResolver::new(self.tracker).resolve(block.text());

        DispatchReport::from_primary(primary).with_dependents(dependents)
    }

    /// Ticket creation is never blocked on a missing summary; the fallback
    /// title is substituted instead.
    fn dispatch_ticket(&self, block: &ContentBlock) -> DispatchReport {
        let summary = block
            .field(&[SUMMARY_LABEL])
            .map(|value| value.replace("**", "").replace('#', "").trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| FALLBACK_SUMMARY.to_string());

        info!("Creating ticket '{}'", summary);
        DispatchReport::from_primary(self.tracker.create_issue(&summary, block.text()))
    }
}
