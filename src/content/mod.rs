mod classify;
mod extract;
mod lexer;

pub use classify::{classify, Classification, Rule, RULES};
pub use extract::{body_after, field};
pub use lexer::{lex, Line, LineKind};

/// Labels that mark the messaging target line.
pub const RECIPIENT_LABELS: &[&str] = &["Channel", "Recipient"];

/// Label that opens the multi-line messaging body.
pub const BODY_LABEL: &str = "Message";

/// Label that marks the knowledge-log category line.
pub const CATEGORY_LABEL: &str = "Task Category";

/// Label that marks the ticket title line.
pub const SUMMARY_LABEL: &str = "Summary";

/// An ordered block of generated text with no guaranteed schema.
///
/// The block is lexed once on construction; classification and field
/// extraction both operate on the lexed lines.
#[derive(Debug, Clone)]
pub struct ContentBlock {
    raw: String,
    lines: Vec<Line>,
}

impl ContentBlock {
    pub fn from_text(text: impl Into<String>) -> Self {
        let raw = text.into();
        let lines = lex(&raw);
        ContentBlock { raw, lines }
    }

    /// The full text as produced by the generator.
    pub fn text(&self) -> &str {
        &self.raw
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Whether any line contains one of the given labels.
    pub fn contains_label(&self, labels: &[&str]) -> bool {
        self.lines
            .iter()
            .any(|line| labels.iter().any(|label| line.raw.contains(label)))
    }

    /// Extract a single-line header field. See [`extract::field`].
    pub fn field(&self, labels: &[&str]) -> Option<String> {
        field(&self.lines, labels)
    }

    /// Extract a multi-line body field. See [`extract::body_after`].
    pub fn body_after(&self, label: &str) -> Option<String> {
        body_after(&self.lines, label)
    }
}
