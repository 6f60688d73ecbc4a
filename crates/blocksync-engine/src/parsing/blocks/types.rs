use crate::parsing::rope::span::Span;

use super::kinds::FenceKind;

/// The kind of a leaf block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// A paragraph block (default when no other block opener matches).
    Paragraph,
    /// An ATX heading. `level` is the raw marker count, before clamping.
    Heading { level: usize },
    BulletItem,
    NumberedItem,
    /// A fenced code block (``` or ~~~).
    FencedCode { kind: FenceKind, language: String },
}

/// A parsed block node with its kind, source span and text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub kind: BlockKind,
    /// Full byte span of the block including delimiters.
    pub span: Span,
    /// Inline source for text blocks; verbatim content for fenced code.
    pub content: String,
}
