use crate::parsing::rope::span::Span;

use super::{
    classify::LineClass,
    kinds::{CodeFence, FenceSig, ListMarker, Paragraph},
    open::{BlockOpen, try_open_leaf},
    types::{BlockKind, BlockNode},
};

#[derive(Debug, Clone)]
enum LeafState {
    None,
    Paragraph {
        start: Span,
        last_line_end: usize,
        lines: Vec<String>,
    },
    Fence {
        sig: FenceSig,
        language: String,
        start: Span,
        last_line_end: usize,
        lines: Vec<String>,
    },
}

/// Phase 2 of block parsing: consumes classified lines and emits block nodes.
pub struct BlockBuilder {
    leaf: LeafState,
    out: Vec<BlockNode>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            leaf: LeafState::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        if self.in_fence() {
            self.consume_fence_line(c);
            return;
        }

        if c.is_blank {
            self.flush_paragraph();
            return;
        }

        if let Some(open) = try_open_leaf(&c.remainder_text) {
            self.flush_paragraph();
            self.open_leaf(open, c.line);
            return;
        }

        self.extend_paragraph(c.line, &c.remainder_text);
    }

    pub fn finish(mut self) -> Vec<BlockNode> {
        // EOF flush
        self.flush_paragraph();
        self.flush_fence();
        self.out
    }

    fn in_fence(&self) -> bool {
        matches!(self.leaf, LeafState::Fence { .. })
    }

    fn open_leaf(&mut self, open: BlockOpen<'_>, line: Span) {
        match open {
            BlockOpen::FencedCode { sig, language } => {
                self.leaf = LeafState::Fence {
                    sig,
                    language: language.to_string(),
                    start: line,
                    last_line_end: line.end,
                    lines: vec![],
                }
            }
            // Headings and list items are single-line leaves.
            BlockOpen::Heading { level, text } => {
                self.emit(BlockKind::Heading { level }, line, text.to_string());
            }
            BlockOpen::ListItem { marker, text } => {
                let kind = match marker {
                    ListMarker::Bullet => BlockKind::BulletItem,
                    ListMarker::Numbered => BlockKind::NumberedItem,
                };
                self.emit(kind, line, text.to_string());
            }
        }
    }

    fn consume_fence_line(&mut self, c: &LineClass) {
        let LeafState::Fence {
            sig,
            last_line_end,
            lines,
            ..
        } = &mut self.leaf
        else {
            return;
        };

        *last_line_end = c.line.end;
        if CodeFence::closes(*sig, &c.remainder_text) {
            self.flush_fence();
        } else {
            lines.push(c.raw_text.clone());
        }
    }

    fn extend_paragraph(&mut self, line: Span, text: &str) {
        match &mut self.leaf {
            LeafState::Paragraph {
                last_line_end,
                lines,
                ..
            } => {
                *last_line_end = line.end;
                lines.push(text.to_string());
            }
            _ => {
                self.leaf = LeafState::Paragraph {
                    start: line,
                    last_line_end: line.end,
                    lines: vec![text.to_string()],
                };
            }
        }
    }

    fn flush_paragraph(&mut self) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        if let LeafState::Paragraph {
            start,
            last_line_end,
            lines,
        } = prev
        {
            self.out.push(BlockNode {
                kind: BlockKind::Paragraph,
                span: Span::new(start.start, last_line_end),
                content: Paragraph::join(&lines),
            });
        } else {
            self.leaf = prev; // put back non-paragraph leaf (e.g. fence)
        }
    }

    /// Emits the open fence, closed or not. An unterminated fence runs to EOF.
    fn flush_fence(&mut self) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        if let LeafState::Fence {
            sig,
            language,
            start,
            last_line_end,
            lines,
        } = prev
        {
            self.out.push(BlockNode {
                kind: BlockKind::FencedCode {
                    kind: sig.kind,
                    language,
                },
                span: Span::new(start.start, last_line_end),
                content: lines.join("\n"),
            });
        } else {
            self.leaf = prev;
        }
    }

    fn emit(&mut self, kind: BlockKind, line: Span, content: String) {
        self.out.push(BlockNode {
            kind,
            span: line,
            content,
        });
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::blocks::MarkdownLineClassifier;
    use crate::parsing::blocks::kinds::FenceKind;
    use crate::parsing::rope::lines_with_spans;
    use pretty_assertions::assert_eq;
    use xi_rope::Rope;

    fn build(text: &str) -> Vec<BlockNode> {
        let rope = Rope::from(text);
        let mut builder = BlockBuilder::new();
        for lr in lines_with_spans(&rope) {
            builder.push(&MarkdownLineClassifier.classify(&lr));
        }
        builder.finish()
    }

    fn kinds(nodes: &[BlockNode]) -> Vec<BlockKind> {
        nodes.iter().map(|n| n.kind.clone()).collect()
    }

    #[test]
    fn paragraph_lines_join_with_space() {
        let nodes = build("first line\n  second line\n\nnext");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].content, "first line second line");
        assert_eq!(nodes[0].span, Span::new(0, 25));
        assert_eq!(nodes[1].content, "next");
    }

    #[test]
    fn blank_runs_collapse() {
        let nodes = build("a\n\n\n\nb\n");
        assert_eq!(kinds(&nodes), vec![BlockKind::Paragraph, BlockKind::Paragraph]);
    }

    #[test]
    fn heading_interrupts_paragraph() {
        let nodes = build("text\n## Sub\nmore");
        assert_eq!(
            kinds(&nodes),
            vec![
                BlockKind::Paragraph,
                BlockKind::Heading { level: 2 },
                BlockKind::Paragraph
            ]
        );
        assert_eq!(nodes[1].content, "Sub");
    }

    #[test]
    fn list_items_are_single_line() {
        let nodes = build("- one\n- two\ncontinued\n1. first");
        assert_eq!(
            kinds(&nodes),
            vec![
                BlockKind::BulletItem,
                BlockKind::BulletItem,
                BlockKind::Paragraph,
                BlockKind::NumberedItem
            ]
        );
        assert_eq!(nodes[1].content, "two");
        assert_eq!(nodes[3].content, "first");
    }

    #[test]
    fn fence_content_is_verbatim() {
        let nodes = build("```rust\n# not heading\n  - not item\n\n```\nafter");
        assert_eq!(nodes.len(), 2);
        assert_eq!(
            nodes[0].kind,
            BlockKind::FencedCode {
                kind: FenceKind::Backticks,
                language: "rust".to_string()
            }
        );
        assert_eq!(nodes[0].content, "# not heading\n  - not item\n");
        assert_eq!(nodes[1].content, "after");
    }

    #[test]
    fn unterminated_fence_runs_to_eof() {
        let nodes = build("~~~\nline one\nline two\n");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].content, "line one\nline two");
        assert_eq!(nodes[0].span, Span::new(0, 22));
    }

    #[test]
    fn shorter_run_does_not_close_fence() {
        let nodes = build("````\n```\n````");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].content, "```");
    }

    #[test]
    fn empty_fence() {
        let nodes = build("```\n```");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].content, "");
    }
}
