use crate::parsing::rope::span::Span;

/// A parsed inline node with byte spans into the parsed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Text that isn't part of any special construct. May contain escapes.
    Text(Span),
    /// A code span. This is a raw zone: no parsing inside.
    CodeSpan {
        /// Full span including backticks.
        full: Span,
        /// Content after padding removal.
        inner: Span,
    },
    /// An emphasis span; the inner text is literal apart from escapes.
    Emphasis {
        full: Span,
        inner: Span,
        strong: bool,
        em: bool,
    },
    /// An inline link. `text` is parsed again, without links.
    Link {
        full: Span,
        text: Span,
        dest: Span,
        /// `<url>` form; backslash escapes in `dest` apply.
        angled: bool,
    },
}

impl InlineNode {
    pub fn full(&self) -> Span {
        match self {
            InlineNode::Text(sp) => *sp,
            InlineNode::CodeSpan { full, .. }
            | InlineNode::Emphasis { full, .. }
            | InlineNode::Link { full, .. } => *full,
        }
    }
}
