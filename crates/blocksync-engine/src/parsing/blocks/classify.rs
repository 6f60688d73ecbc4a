use crate::parsing::rope::{lines::LineRef, span::Span};

use super::kinds::{CodeFence, FenceSig};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Full byte span of this line in the rope, terminator included.
    pub line: Span,
    /// Whether the line is whitespace only.
    pub is_blank: bool,
    /// Byte width of the leading whitespace.
    pub indent: usize,
    /// Byte span of the line content after leading whitespace, terminator excluded.
    pub remainder_span: Span,
    /// Line content with the terminator stripped and nothing else touched.
    pub raw_text: String,
    /// Line content after leading whitespace.
    pub remainder_text: String,
    /// If the remainder looks like a fence opener.
    pub fence_sig: Option<FenceSig>,
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`] containing local facts.
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        let content = lr.content();
        let remainder = content.trim_start();
        let indent = content.len() - remainder.len();

        LineClass {
            line: lr.span,
            is_blank: remainder.is_empty(),
            indent,
            remainder_span: Span::new(lr.span.start + indent, lr.span.start + content.len()),
            raw_text: content.to_string(),
            remainder_text: remainder.to_string(),
            fence_sig: CodeFence::sig(remainder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::rope::lines_with_spans;
    use xi_rope::Rope;

    fn classify_all(text: &str) -> Vec<LineClass> {
        let rope = Rope::from(text);
        lines_with_spans(&rope)
            .map(|lr| MarkdownLineClassifier.classify(&lr))
            .collect()
    }

    #[test]
    fn blank_and_indent() {
        let lines = classify_all("  - item\n   \n");
        assert_eq!(lines.len(), 2);
        assert!(!lines[0].is_blank);
        assert_eq!(lines[0].indent, 2);
        assert_eq!(lines[0].remainder_text, "- item");
        assert_eq!(lines[0].remainder_span, Span::new(2, 8));
        assert!(lines[1].is_blank);
    }

    #[test]
    fn fence_signature_detected_after_indent() {
        let lines = classify_all("   ~~~ text\n");
        assert!(lines[0].fence_sig.is_some());
        assert_eq!(lines[0].raw_text, "   ~~~ text");
    }

    #[test]
    fn crlf_is_stripped() {
        let lines = classify_all("para\r\n");
        assert_eq!(lines[0].remainder_text, "para");
        assert_eq!(lines[0].line, Span::new(0, 6));
    }
}
