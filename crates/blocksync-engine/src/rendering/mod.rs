//! # BlockRenderer
//!
//! [`Document`] to markdown text. Rendering is total: out-of-range values are
//! clamped, never rejected.
//!
//! Output shape: an optional `# title` line, then blocks separated by a blank
//! line, except consecutive items of the same list kind which are separated by
//! a single newline. Non-empty output ends with exactly one newline.

pub mod blocks;
pub mod inline;

use crate::models::{Block, Document};
use crate::parsing::blocks::kinds::Heading;

pub use blocks::{escape_block_start, render_block};
pub use inline::{escape_text, render_runs};

/// Renders a document to markdown.
pub fn render_document(doc: &Document) -> String {
    let mut out = String::new();

    if let Some(title) = &doc.title {
        out.push_str(&Heading::marker(1));
        let title = title.replace('\n', " ");
        let title = title.trim();
        if !title.is_empty() {
            out.push(' ');
            out.push_str(title);
        }
    }

    let mut prev: Option<&Block> = None;
    let mut ordinal = 0;
    for block in &doc.blocks {
        if is_blank_paragraph(block) {
            continue;
        }
        ordinal = match (prev, block) {
            (Some(Block::NumberedListItem { .. }), Block::NumberedListItem { .. }) => ordinal + 1,
            _ => 1,
        };
        if !out.is_empty() {
            let grouped = prev.is_some_and(|p| p.same_list_kind(block));
            out.push_str(if grouped { "\n" } else { "\n\n" });
        }
        out.push_str(&render_block(block, ordinal));
        prev = Some(block);
    }

    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// A paragraph that would render to nothing but whitespace.
fn is_blank_paragraph(block: &Block) -> bool {
    match block {
        Block::Paragraph { runs } => runs
            .iter()
            .all(|r| r.text.is_empty() || (r.is_plain() && r.text.trim().is_empty())),
        _ => false,
    }
}
