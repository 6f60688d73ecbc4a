use serde::{Deserialize, Serialize};

/// Highest heading level the block model carries. Deeper headings are clamped.
pub const MAX_HEADING_LEVEL: u8 = 3;

/// A contiguous span of text sharing one style combination.
///
/// Concatenating the `text` of all runs in a block reproduces the block's
/// plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl InlineRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            italic: true,
            ..Self::plain(text)
        }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self {
            code: true,
            ..Self::plain(text)
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::plain(text).with_link(url)
    }

    #[must_use]
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    /// Returns true if both runs carry exactly the same style combination.
    pub fn same_style(&self, other: &InlineRun) -> bool {
        self.bold == other.bold
            && self.italic == other.italic
            && self.code == other.code
            && self.link == other.link
    }

    /// Returns true if the run has no style at all.
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.code && self.link.is_none()
    }
}

/// Merges adjacent runs that share a style and drops empty runs.
pub fn normalize_runs(runs: Vec<InlineRun>) -> Vec<InlineRun> {
    let mut out: Vec<InlineRun> = Vec::with_capacity(runs.len());
    for run in runs {
        if run.text.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(prev) if prev.same_style(&run) => prev.text.push_str(&run.text),
            _ => out.push(run),
        }
    }
    out
}

/// Concatenates the text of a run sequence.
pub fn plain_text(runs: &[InlineRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

/// One structural unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { level: u8, runs: Vec<InlineRun> },
    Paragraph { runs: Vec<InlineRun> },
    BulletListItem { runs: Vec<InlineRun> },
    NumberedListItem { runs: Vec<InlineRun> },
    CodeBlock { language: String, text: String },
}

impl Block {
    /// Builds a heading, clamping `level` into `1..=MAX_HEADING_LEVEL`.
    pub fn heading(level: u8, runs: Vec<InlineRun>) -> Self {
        Block::Heading {
            level: clamp_heading_level(level),
            runs,
        }
    }

    pub fn paragraph(runs: Vec<InlineRun>) -> Self {
        Block::Paragraph { runs }
    }

    pub fn bullet(runs: Vec<InlineRun>) -> Self {
        Block::BulletListItem { runs }
    }

    pub fn numbered(runs: Vec<InlineRun>) -> Self {
        Block::NumberedListItem { runs }
    }

    pub fn code(language: impl Into<String>, text: impl Into<String>) -> Self {
        Block::CodeBlock {
            language: language.into(),
            text: text.into(),
        }
    }

    /// The rich-text runs of the block, or `None` for code blocks.
    pub fn runs(&self) -> Option<&[InlineRun]> {
        match self {
            Block::Heading { runs, .. }
            | Block::Paragraph { runs }
            | Block::BulletListItem { runs }
            | Block::NumberedListItem { runs } => Some(runs),
            Block::CodeBlock { .. } => None,
        }
    }

    pub fn plain_text(&self) -> String {
        match self {
            Block::CodeBlock { text, .. } => text.clone(),
            other => other.runs().map(plain_text).unwrap_or_default(),
        }
    }

    /// Returns true if both blocks are list items of the same kind.
    pub fn same_list_kind(&self, other: &Block) -> bool {
        matches!(
            (self, other),
            (Block::BulletListItem { .. }, Block::BulletListItem { .. })
                | (Block::NumberedListItem { .. }, Block::NumberedListItem { .. })
        )
    }
}

pub fn clamp_heading_level(level: u8) -> u8 {
    level.clamp(1, MAX_HEADING_LEVEL)
}

/// Title plus ordered block sequence.
///
/// Constructed fresh by the parser or by the remote adapter and never mutated
/// by the converter afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(title: Option<String>, blocks: Vec<Block>) -> Self {
        Self { title, blocks }
    }

    /// Title or the empty string when absent.
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_merges_same_style_and_drops_empty() {
        let runs = vec![
            InlineRun::plain("a"),
            InlineRun::plain(""),
            InlineRun::plain("b"),
            InlineRun::bold("c"),
            InlineRun::bold("d"),
            InlineRun::link("e", "http://x"),
            InlineRun::link("f", "http://y"),
        ];
        assert_eq!(
            normalize_runs(runs),
            vec![
                InlineRun::plain("ab"),
                InlineRun::bold("cd"),
                InlineRun::link("e", "http://x"),
                InlineRun::link("f", "http://y"),
            ]
        );
    }

    #[test]
    fn heading_level_is_clamped() {
        assert_eq!(
            Block::heading(6, vec![]),
            Block::Heading {
                level: 3,
                runs: vec![]
            }
        );
        assert_eq!(
            Block::heading(0, vec![]),
            Block::Heading {
                level: 1,
                runs: vec![]
            }
        );
    }

    #[test]
    fn plain_text_concatenates_runs() {
        let block = Block::paragraph(vec![
            InlineRun::bold("bold"),
            InlineRun::plain(" and "),
            InlineRun::code("code"),
        ]);
        assert_eq!(block.plain_text(), "bold and code");
    }

    #[test]
    fn list_kind_grouping() {
        let b = Block::bullet(vec![]);
        let n = Block::numbered(vec![]);
        assert!(b.same_list_kind(&Block::bullet(vec![])));
        assert!(!b.same_list_kind(&n));
        assert!(!Block::paragraph(vec![]).same_list_kind(&Block::paragraph(vec![])));
    }

    #[test]
    fn block_serializes_with_kind_tag() {
        let json = serde_json::to_value(Block::code("rust", "fn main() {}")).unwrap();
        assert_eq!(json["kind"], "code_block");
        assert_eq!(json["language"], "rust");
    }
}
