use super::{ContentBlock, CATEGORY_LABEL, RECIPIENT_LABELS};

/// The backend a content block targets. Total: every block classifies to
/// exactly one variant, with `IssueTicket` as the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Messaging,
    KnowledgeLog,
    IssueTicket,
}

/// A single classification rule: the block classifies as `target` when any
/// line contains one of `labels`.
#[derive(Debug)]
pub struct Rule {
    pub labels: &'static [&'static str],
    pub target: Classification,
}

/// Rules are tried in order and the first match wins; the order encodes
/// priority. A block containing both a channel label and a category label
/// is therefore always routed to Messaging. That ambiguity is a property
/// of the text contract, not something to resolve here.
pub const RULES: &[Rule] = &[
    Rule {
        labels: RECIPIENT_LABELS,
        target: Classification::Messaging,
    },
    Rule {
        labels: &[CATEGORY_LABEL],
        target: Classification::KnowledgeLog,
    },
];

/// Classify a content block. Falls back to `IssueTicket` when no rule
/// matches; that fallback is never an error, even when no issue-specific
/// fields are present either.
pub fn classify(block: &ContentBlock) -> Classification {
    RULES
        .iter()
        .find(|rule| block.contains_label(rule.labels))
        .map(|rule| rule.target)
        .unwrap_or(Classification::IssueTicket)
}
