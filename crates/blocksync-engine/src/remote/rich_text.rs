use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{InlineRun, normalize_runs};

/// Remote per-item content limit, in characters.
pub const MAX_TEXT_LEN: usize = 2000;

/// One item of a remote `rich_text` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type", default = "text_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

fn text_kind() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTarget {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: "default".to_string(),
        }
    }
}

impl RichText {
    /// Items for one run, split so no item exceeds [`MAX_TEXT_LEN`] characters.
    pub fn from_run(run: &InlineRun) -> Vec<RichText> {
        split_chars(&run.text, MAX_TEXT_LEN)
            .into_iter()
            .map(|content| RichText {
                kind: text_kind(),
                text: Some(TextContent {
                    content,
                    link: run.link.clone().map(|url| LinkTarget { url }),
                }),
                annotations: Annotations {
                    bold: run.bold,
                    italic: run.italic,
                    code: run.code,
                    ..Annotations::default()
                },
                plain_text: None,
                href: None,
            })
            .collect()
    }

    /// The run this item denotes. Non-text items (mentions, equations) fall
    /// back to their rendered `plain_text` and `href`.
    pub fn to_run(&self) -> InlineRun {
        let (text, link) = match &self.text {
            Some(t) => (
                t.content.clone(),
                t.link.as_ref().map(|l| l.url.clone()).or_else(|| self.href.clone()),
            ),
            None => (self.plain_text.clone().unwrap_or_default(), self.href.clone()),
        };
        InlineRun {
            text,
            bold: self.annotations.bold,
            italic: self.annotations.italic,
            code: self.annotations.code,
            link,
        }
    }
}

fn split_chars(text: &str, max: usize) -> Vec<String> {
    if text.chars().count() <= max {
        return vec![text.to_string()];
    }
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(max).map(|c| c.iter().collect()).collect()
}

/// Converts runs to a remote `rich_text` array.
pub fn runs_to_rich_text(runs: &[InlineRun]) -> Vec<RichText> {
    runs.iter()
        .filter(|r| !r.text.is_empty())
        .flat_map(RichText::from_run)
        .collect()
}

/// Converts a remote `rich_text` array to normalized runs. Unreadable input
/// yields no runs.
pub fn rich_text_to_runs(value: Option<&Value>) -> Vec<InlineRun> {
    let Some(value) = value else {
        return vec![];
    };
    match Vec::<RichText>::deserialize(value) {
        Ok(items) => normalize_runs(items.iter().map(RichText::to_run).collect()),
        Err(e) => {
            debug!("unreadable rich_text array: {e}");
            vec![]
        }
    }
}

/// Concatenated plain text of a remote `rich_text` array.
pub fn rich_text_plain(value: Option<&Value>) -> String {
    rich_text_to_runs(value)
        .into_iter()
        .map(|r| r.text)
        .collect()
}
