mod dependencies;
mod router;

pub use dependencies::{scan_issue_keys, DependencyResolver};
pub use router::DispatchRouter;

/// Fallback knowledge-log category when the label is present but no value
/// can be recovered.
pub const FALLBACK_CATEGORY: &str = "Development";

/// Fallback ticket title; ticket creation is never blocked on a missing
/// summary.
pub const FALLBACK_SUMMARY: &str = "New Ticket";

/// Severity of a dispatch, derived from the collaborator's outcome string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Warning,
    Failure,
}

impl Outcome {
    /// Collaborators report soft results as marker-prefixed strings rather
    /// than structured status codes; the dispatch severity is read off
    /// that marker. Anything unmarked counts as a failure.
    pub fn from_marker(detail: &str) -> Outcome {
        if detail.starts_with("✅") {
            Outcome::Success
        } else if detail.starts_with("⚠️") {
            Outcome::Warning
        } else {
            Outcome::Failure
        }
    }
}

/// The user-facing result of one dispatch call. Created per call, never
/// persisted.
#[derive(Debug)]
pub struct DispatchReport {
    pub outcome: Outcome,
    pub detail: String,
    /// Outcomes of cascaded actions (issue transitions triggered by a
    /// knowledge-log entry). Empty on the other paths.
    pub dependents: Vec<String>,
}

impl DispatchReport {
    pub fn failure(detail: impl Into<String>) -> Self {
        DispatchReport {
            outcome: Outcome::Failure,
            detail: detail.into(),
            dependents: vec![],
        }
    }

    pub fn from_primary(detail: String) -> Self {
        DispatchReport {
            outcome: Outcome::from_marker(&detail),
            detail,
            dependents: vec![],
        }
    }

    /// Attach dependent results. A primary success with any non-success
    /// dependent becomes a composite warning; the primary action is never
    /// reverted.
    pub fn with_dependents(mut self, dependents: Vec<String>) -> Self {
        if self.outcome == Outcome::Success
            && dependents
                .iter()
                .any(|d| Outcome::from_marker(d) != Outcome::Success)
        {
            self.outcome = Outcome::Warning;
        }
        self.dependents = dependents;
        self
    }

    /// Render the report as plain text: the primary detail, then each
    /// dependent result, separated from the primary by a blank line.
    pub fn render(&self) -> String {
        if self.dependents.is_empty() {
            self.detail.clone()
        } else {
            format!("{}\n\n{}", self.detail, self.dependents.join("\n"))
        }
    }
}
