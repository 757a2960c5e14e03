/// A single lexed line of a content block.
///
/// The raw text is kept alongside the tag: label matching is defined over
/// the raw line (containment), while the tag carries the pre-split header
/// value when one is present inline.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub raw: String,
    pub kind: LineKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Blank,
    /// A bold-marked header line, e.g. `**Channel**: #general` or a bare
    /// `**Description**`. `rest` is the text after the last delimiter
    /// (closing bold span or colon), empty when the header stands alone.
    Header { label: String, rest: String },
    Body,
}

impl Line {
    pub fn is_blank(&self) -> bool {
        matches!(self.kind, LineKind::Blank)
    }

    /// The inline value carried by this line, if any: the remainder after
    /// the last delimiter (colon or end of bold span), trimmed. Non-header
    /// lines still yield a value when they contain a colon, since the
    /// generator does not always emit the bold markers it is asked for.
    pub fn inline_value(&self) -> Option<&str> {
        match &self.kind {
            LineKind::Header { rest, .. } if !rest.is_empty() => Some(rest),
            LineKind::Header { .. } | LineKind::Blank => None,
            LineKind::Body => match self.raw.rsplit_once(':') {
                Some((_, rest)) if !rest.trim().is_empty() => Some(rest.trim()),
                _ => None,
            },
        }
    }
}

/// Lex a block of text into tagged lines.
pub fn lex(text: &str) -> Vec<Line> {
    text.lines().map(lex_line).collect()
}

fn lex_line(raw: &str) -> Line {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Line {
            raw: raw.to_string(),
            kind: LineKind::Blank,
        };
    }

    // A header is a line carrying a bold span: `**Label**` optionally
    // followed by a value. Treating every delimiter uniformly preserves
    // the "remainder after the last delimiter" rule: bold markers are
    // folded into colons before splitting, exactly like `**A**: b` and
    // `**A** b` both yielding `b`.
    if let Some(label) = bold_label(trimmed) {
        let folded = trimmed.replace("**", ":");
        let rest = folded
            .rsplit_once(':')
            .map(|(_, rest)| rest.trim())
            .unwrap_or("");
        return Line {
            raw: raw.to_string(),
            kind: LineKind::Header {
                label,
                rest: rest.to_string(),
            },
        };
    }

    Line {
        raw: raw.to_string(),
        kind: LineKind::Body,
    }
}

/// Extract the text inside the first complete `**...**` span.
fn bold_label(line: &str) -> Option<String> {
    let start = line.find("**")?;
    let after = &line[start + 2..];
    let end = after.find("**")?;
    let label = after[..end].trim();
    if label.is_empty() {
        return None;
    }
    Some(label.to_string())
}
