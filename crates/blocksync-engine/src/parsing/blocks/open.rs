use super::kinds::{CodeFence, FenceSig, Heading, ListItem, ListMarker};

/// A leaf block opener recognised at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOpen<'a> {
    FencedCode { sig: FenceSig, language: &'a str },
    Heading { level: usize, text: &'a str },
    ListItem { marker: ListMarker, text: &'a str },
}

/// Detects a leaf block opener in `remainder` (leading whitespace stripped).
///
/// Used by the block builder and by the renderer to decide when paragraph text
/// needs escaping.
pub fn try_open_leaf(remainder: &str) -> Option<BlockOpen<'_>> {
    // Precedence: fence beats everything else.
    if let Some(sig) = CodeFence::sig(remainder) {
        return Some(BlockOpen::FencedCode {
            sig,
            language: CodeFence::language(remainder, sig),
        });
    }
    if let Some((level, text)) = Heading::parse(remainder) {
        return Some(BlockOpen::Heading { level, text });
    }
    if let Some((marker, text)) = ListItem::parse(remainder) {
        return Some(BlockOpen::ListItem { marker, text });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::blocks::kinds::FenceKind;

    #[test]
    fn fence_wins() {
        assert_eq!(
            try_open_leaf("```sh"),
            Some(BlockOpen::FencedCode {
                sig: FenceSig {
                    kind: FenceKind::Backticks,
                    len: 3
                },
                language: "sh"
            })
        );
    }

    #[test]
    fn heading_and_items() {
        assert_eq!(
            try_open_leaf("## Two"),
            Some(BlockOpen::Heading {
                level: 2,
                text: "Two"
            })
        );
        assert_eq!(
            try_open_leaf("3. three"),
            Some(BlockOpen::ListItem {
                marker: ListMarker::Numbered,
                text: "three"
            })
        );
        assert_eq!(try_open_leaf("just text"), None);
    }
}
