use crate::models::{Block, clamp_heading_level};
use crate::parsing::blocks::kinds::{CodeFence, FenceKind, Heading, ListItem};
use crate::parsing::blocks::{BlockOpen, try_open_leaf};
use crate::parsing::inline::kinds::Escape;

use super::inline::render_runs;

/// Renders one block. `ordinal` is the 1-based position of a numbered item
/// within its run of consecutive numbered items.
pub fn render_block(block: &Block, ordinal: usize) -> String {
    match block {
        Block::Heading { level, runs } => with_marker(
            &Heading::marker(clamp_heading_level(*level)),
            &single_line(&render_runs(runs)),
        ),
        Block::Paragraph { runs } => render_paragraph(&render_runs(runs)),
        Block::BulletListItem { runs } => {
            with_marker(ListItem::BULLET, &single_line(&render_runs(runs)))
        }
        Block::NumberedListItem { runs } => {
            with_marker(&format!("{ordinal}."), &single_line(&render_runs(runs)))
        }
        Block::CodeBlock { language, text } => render_code(language, text),
    }
}

fn with_marker(marker: &str, text: &str) -> String {
    if text.is_empty() {
        marker.to_string()
    } else {
        format!("{marker} {text}")
    }
}

fn single_line(text: &str) -> String {
    text.replace('\n', " ").trim().to_string()
}

/// Paragraph text, one source line per text line, with blank lines dropped.
fn render_paragraph(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(escape_block_start)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escapes a paragraph line that would otherwise open a heading, list item or fence.
pub fn escape_block_start(line: &str) -> String {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    let at = match try_open_leaf(body) {
        None => return line.to_string(),
        Some(BlockOpen::ListItem { .. }) => ListItem::ordinal_delimiter_at(body).unwrap_or(0),
        Some(_) => 0,
    };
    format!(
        "{indent}{}{}{}",
        &body[..at],
        Escape::BACKSLASH as char,
        &body[at..]
    )
}

fn render_code(language: &str, text: &str) -> String {
    let language: String = language.split_whitespace().collect::<Vec<_>>().join("-");
    let kind = if language.contains(CodeFence::BACKTICK) {
        FenceKind::Tildes
    } else {
        FenceKind::Backticks
    };
    let fence = CodeFence::fence_for(kind, text);
    let sep = if language.starts_with(kind.char()) { " " } else { "" };
    format!("{fence}{sep}{language}\n{text}\n{fence}")
}
