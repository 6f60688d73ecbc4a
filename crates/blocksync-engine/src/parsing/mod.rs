//! # MarkupParser
//!
//! Markdown text to [`Document`]. Parsing is total: anything unrecognised
//! degrades to paragraph text and no input produces an error.
//!
//! Block structure is found first (`blocks`), then the text of headings,
//! paragraphs and list items is lowered to style runs (`inline`).

pub mod blocks;
pub mod inline;
pub mod rope;

use log::trace;
use xi_rope::Rope;

use crate::models::{Block, Document, MAX_HEADING_LEVEL};
use blocks::{BlockBuilder, BlockKind, BlockNode, MarkdownLineClassifier};
use inline::inline_runs;
use rope::lines_with_spans;

/// The block nodes of a source text, before title extraction and inline parsing.
#[derive(Debug)]
pub struct ParsedDoc {
    pub blocks: Vec<BlockNode>,
}

/// Runs both block parsing phases over `text`.
pub fn parse_blocks(text: &str) -> ParsedDoc {
    let rope = Rope::from(text);
    let classifier = MarkdownLineClassifier;
    let mut builder = BlockBuilder::new();

    for lr in lines_with_spans(&rope) {
        let lc = classifier.classify(&lr);
        builder.push(&lc);
    }

    ParsedDoc {
        blocks: builder.finish(),
    }
}

/// Parses markdown into a [`Document`].
///
/// The first heading written with exactly one `#` becomes the title and is
/// removed from the block sequence; later level-1 headings stay as blocks.
pub fn parse_document(text: &str) -> Document {
    let parsed = parse_blocks(text);
    let mut title = None;
    let mut blocks = Vec::with_capacity(parsed.blocks.len());

    for node in parsed.blocks {
        if title.is_none() && node.kind == (BlockKind::Heading { level: 1 }) {
            trace!("title taken from heading at {:?}", node.span);
            title = Some(node.content);
            continue;
        }
        blocks.push(lower_block(node));
    }

    Document::new(title, blocks)
}

fn lower_block(node: BlockNode) -> Block {
    match node.kind {
        BlockKind::Heading { level } => {
            let level = u8::try_from(level).unwrap_or(MAX_HEADING_LEVEL);
            Block::heading(level, inline_runs(&node.content))
        }
        BlockKind::Paragraph => Block::paragraph(inline_runs(&node.content)),
        BlockKind::BulletItem => Block::bullet(inline_runs(&node.content)),
        BlockKind::NumberedItem => Block::numbered(inline_runs(&node.content)),
        BlockKind::FencedCode { language, .. } => Block::code(language, node.content),
    }
}
