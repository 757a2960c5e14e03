use super::lexer::{Line, LineKind};

/// Extract a single-line header field.
///
/// Lines are scanned in order; a line matches when its raw text contains
/// one of the candidate labels. The value is the line's inline remainder
/// when present, otherwise the next non-empty line — unless that line is
/// itself a header, which marks a different field, never this one's
/// value. First match wins: a label appearing twice yields only the first
/// occurrence, and a match with no recoverable value ends the search
/// rather than resuming it.
pub fn field(lines: &[Line], labels: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        if !labels.iter().any(|label| line.raw.contains(label)) {
            continue;
        }

        if let Some(value) = line.inline_value() {
            return Some(value.to_string());
        }

        return lines[i + 1..]
            .iter()
            .find(|next| !next.is_blank())
            .filter(|next| !matches!(next.kind, LineKind::Header { .. }))
            .map(|next| next.raw.trim().to_string());
    }

    None
}

/// Extract a multi-line body field: everything after the first line
/// containing `label`, to the end of the block. Header fields are
/// single-line; body fields consume the remainder, so nothing after the
/// label line is ever parsed as a header.
pub fn body_after(lines: &[Line], label: &str) -> Option<String> {
    let position = lines.iter().position(|line| line.raw.contains(label))?;

    let body = lines[position + 1..]
        .iter()
        .map(|line| line.raw.as_str())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::lex;

    #[test]
    fn test_inline_value_after_colon() {
        let lines = lex("**Channel**: #backend-dev\nrest");
        assert_eq!(field(&lines, &["Channel"]), Some("#backend-dev".into()));
    }

    #[test]
    fn test_value_on_next_line() {
        let lines = lex("**Summary**\n\nFix the login flow\nmore");
        assert_eq!(field(&lines, &["Summary"]), Some("Fix the login flow".into()));
    }

    #[test]
    fn test_first_match_wins() {
        let lines = lex("**Channel**: #first\n**Channel**: #second");
        assert_eq!(field(&lines, &["Channel"]), Some("#first".into()));
    }

    #[test]
    fn test_any_candidate_label_matches() {
        let lines = lex("**Recipient**: ops-team");
        assert_eq!(
            field(&lines, &["Channel", "Recipient"]),
            Some("ops-team".into())
        );
    }

    #[test]
    fn test_missing_label_yields_none() {
        let lines = lex("Nothing structured here\nat all");
        assert_eq!(field(&lines, &["Channel"]), None);
    }

    #[test]
    fn test_next_header_is_not_a_value() {
        // A bare label followed by another field's header has no value;
        // the header must not be mistaken for one.
        let lines = lex("**Recipient**\n\n**Message**\nhello");
        assert_eq!(field(&lines, &["Recipient"]), None);
    }

    #[test]
    fn test_match_without_value_does_not_resume() {
        // The label matches on the last line with nothing after it; the
        // scan ends there instead of hunting for a later occurrence.
        let lines = lex("prose\n**Summary**");
        assert_eq!(field(&lines, &["Summary"]), None);
    }

    #[test]
    fn test_body_takes_everything_after_label() {
        let lines = lex("**Message**\nFirst line.\n\nSecond paragraph.");
        assert_eq!(
            body_after(&lines, "Message"),
            Some("First line.\n\nSecond paragraph.".into())
        );
    }

    #[test]
    fn test_body_empty_after_label() {
        let lines = lex("**Message**\n\n");
        assert_eq!(body_after(&lines, "Message"), None);
    }

    #[test]
    fn test_body_missing_label() {
        let lines = lex("no body marker here");
        assert_eq!(body_after(&lines, "Message"), None);
    }
}
