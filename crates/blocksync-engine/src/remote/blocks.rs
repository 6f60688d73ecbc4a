//! Adapter between [`Block`]s and the remote store's native block JSON.

use log::debug;
use serde_json::{Map, Value, json};

use crate::models::{Block, Document, InlineRun, clamp_heading_level, normalize_runs};

use super::rich_text::{rich_text_plain, rich_text_to_runs, runs_to_rich_text};

/// Remote name for code without a language.
pub const PLAIN_TEXT_LANGUAGE: &str = "plain text";

const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("", PLAIN_TEXT_LANGUAGE),
    ("text", PLAIN_TEXT_LANGUAGE),
    ("txt", PLAIN_TEXT_LANGUAGE),
    ("plain", PLAIN_TEXT_LANGUAGE),
    ("rs", "rust"),
    ("py", "python"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("sh", "shell"),
    ("zsh", "shell"),
    ("yml", "yaml"),
    ("md", "markdown"),
    ("rb", "ruby"),
    ("kt", "kotlin"),
    ("golang", "go"),
    ("cpp", "c++"),
    ("cs", "c#"),
    ("csharp", "c#"),
    ("fsharp", "f#"),
    ("objc", "objective-c"),
    ("ps1", "powershell"),
    ("dockerfile", "docker"),
    ("visual-basic", "visual basic"),
];

/// Maps a fence language to the remote language name.
pub fn language_to_remote(language: &str) -> String {
    let lower = language.trim().to_lowercase();
    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, remote)| (*remote).to_string())
        .unwrap_or(lower)
}

/// Maps a remote language name to a fence language.
pub fn language_from_remote(language: &str) -> String {
    if language == PLAIN_TEXT_LANGUAGE {
        String::new()
    } else {
        language.to_string()
    }
}

fn heading_kind(level: u8) -> &'static str {
    match clamp_heading_level(level) {
        1 => "heading_1",
        2 => "heading_2",
        _ => "heading_3",
    }
}

fn typed_block(kind: &str, payload: Value) -> Value {
    let mut block = Map::new();
    block.insert("object".to_string(), json!("block"));
    block.insert("type".to_string(), json!(kind));
    block.insert(kind.to_string(), payload);
    Value::Object(block)
}

fn text_block(kind: &str, runs: &[InlineRun]) -> Value {
    typed_block(kind, json!({ "rich_text": runs_to_rich_text(runs) }))
}

/// Converts one block to its remote JSON shape.
pub fn block_to_remote(block: &Block) -> Value {
    match block {
        Block::Heading { level, runs } => text_block(heading_kind(*level), runs),
        Block::Paragraph { runs } => text_block("paragraph", runs),
        Block::BulletListItem { runs } => text_block("bulleted_list_item", runs),
        Block::NumberedListItem { runs } => text_block("numbered_list_item", runs),
        Block::CodeBlock { language, text } => typed_block(
            "code",
            json!({
                "rich_text": runs_to_rich_text(&[InlineRun::plain(text.as_str())]),
                "language": language_to_remote(language),
            }),
        ),
    }
}

pub fn blocks_to_remote(blocks: &[Block]) -> Vec<Value> {
    blocks.iter().map(block_to_remote).collect()
}

/// Converts one remote block, or `None` for block types without text.
///
/// `to_do` becomes a bullet prefixed with a checkbox; `quote`, `callout` and
/// `toggle` become paragraphs. Children of remote blocks are not followed.
pub fn block_from_remote(value: &Value) -> Option<Block> {
    let kind = value.get("type")?.as_str()?;
    let payload = value.get(kind).unwrap_or(&Value::Null);
    let runs = || rich_text_to_runs(payload.get("rich_text"));

    let block = match kind {
        "heading_1" => Block::heading(1, runs()),
        "heading_2" => Block::heading(2, runs()),
        "heading_3" => Block::heading(3, runs()),
        "paragraph" | "quote" | "callout" | "toggle" => Block::paragraph(runs()),
        "bulleted_list_item" => Block::bullet(runs()),
        "numbered_list_item" => Block::numbered(runs()),
        "to_do" => {
            let checked = payload
                .get("checked")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let mut with_box = vec![InlineRun::plain(if checked { "[x] " } else { "[ ] " })];
            with_box.extend(runs());
            Block::bullet(normalize_runs(with_box))
        }
        "code" => Block::code(
            language_from_remote(payload.get("language").and_then(Value::as_str).unwrap_or("")),
            rich_text_plain(payload.get("rich_text")),
        ),
        other => {
            debug!("skipping remote block of type {other}");
            return None;
        }
    };
    Some(block)
}

pub fn blocks_from_remote(values: &[Value]) -> Vec<Block> {
    values.iter().filter_map(block_from_remote).collect()
}

/// Title of a remote page: the plain text of its `title`-typed property.
pub fn page_title(page: &Value) -> String {
    let Some(properties) = page.get("properties").and_then(Value::as_object) else {
        return String::new();
    };
    properties
        .values()
        .find(|p| p.get("type").and_then(Value::as_str) == Some("title"))
        .or_else(|| properties.get("title"))
        .map(|p| rich_text_plain(p.get("title")))
        .unwrap_or_default()
}

/// `properties` object that sets a page title on creation. Long titles are
/// split like block text.
pub fn title_property(title: &str) -> Value {
    json!({
        "title": {
            "title": runs_to_rich_text(&[InlineRun::plain(title)])
        }
    })
}

/// Builds a document from a remote page and its child blocks. An untitled
/// page has no title.
pub fn document_from_remote(page: &Value, children: &[Value]) -> Document {
    let title = page_title(page);
    let title = (!title.trim().is_empty()).then_some(title);
    Document::new(title, blocks_from_remote(children))
}
