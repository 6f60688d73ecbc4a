/// Which character a fence is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn char(self) -> char {
        match self {
            FenceKind::Backticks => CodeFence::BACKTICK,
            FenceKind::Tildes => CodeFence::TILDE,
        }
    }
}

/// Signature of a line that looks like a fence: its character and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    pub len: usize,
}

/// Fenced code block syntax.
///
/// All fence-related knowledge lives here; the classifier, builder and renderer
/// only call into it.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: char = '`';
    pub const TILDE: char = '~';
    /// Minimum run length of an opening fence.
    pub const MIN_LEN: usize = 3;

    /// Detects an opening fence at the start of `remainder` (leading whitespace
    /// already stripped).
    ///
    /// A backtick fence whose info string contains a backtick is not a fence,
    /// so inline code spans at the start of a paragraph line never open one.
    pub fn sig(remainder: &str) -> Option<FenceSig> {
        let kind = match remainder.chars().next()? {
            Self::BACKTICK => FenceKind::Backticks,
            Self::TILDE => FenceKind::Tildes,
            _ => return None,
        };
        let len = remainder.chars().take_while(|&c| c == kind.char()).count();
        if len < Self::MIN_LEN {
            return None;
        }
        if kind == FenceKind::Backticks && remainder[len..].contains(Self::BACKTICK) {
            return None;
        }
        Some(FenceSig { kind, len })
    }

    /// Language token of an opening fence line: the first whitespace-delimited
    /// word of the info string, or the empty string.
    pub fn language(remainder: &str, sig: FenceSig) -> &str {
        remainder
            .get(sig.len..)
            .and_then(|info| info.split_whitespace().next())
            .unwrap_or("")
    }

    /// Returns true if `remainder` closes a fence opened with `open`.
    ///
    /// The closer must use the same character, be at least as long as the
    /// opener, and carry nothing but whitespace after the run.
    pub fn closes(open: FenceSig, remainder: &str) -> bool {
        let c = open.kind.char();
        let len = remainder.chars().take_while(|&ch| ch == c).count();
        len >= open.len && remainder[len..].trim().is_empty()
    }

    /// Fence of `kind` long enough that no line of `text` can close it.
    pub fn fence_for(kind: FenceKind, text: &str) -> String {
        let c = kind.char();
        let longest = text
            .split('\n')
            .map(|line| line.trim_start().chars().take_while(|&ch| ch == c).count())
            .max()
            .unwrap_or(0);
        c.to_string().repeat(Self::MIN_LEN.max(longest + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_backtick_fence() {
        assert_eq!(
            CodeFence::sig("```rust"),
            Some(FenceSig {
                kind: FenceKind::Backticks,
                len: 3
            })
        );
    }

    #[test]
    fn detect_tilde_fence() {
        assert_eq!(
            CodeFence::sig("~~~~"),
            Some(FenceSig {
                kind: FenceKind::Tildes,
                len: 4
            })
        );
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::sig("hello"), None);
        assert_eq!(CodeFence::sig("``two"), None);
    }

    #[test]
    fn backtick_info_with_backtick_is_not_a_fence() {
        assert_eq!(CodeFence::sig("``` ``code`` ```"), None);
        assert!(CodeFence::sig("~~~ `ok`").is_some());
    }

    #[test]
    fn language_is_first_info_word() {
        let sig = CodeFence::sig("```rust ignore").unwrap();
        assert_eq!(CodeFence::language("```rust ignore", sig), "rust");
        let sig = CodeFence::sig("```").unwrap();
        assert_eq!(CodeFence::language("```", sig), "");
        let sig = CodeFence::sig("```  python").unwrap();
        assert_eq!(CodeFence::language("```  python", sig), "python");
    }

    #[test]
    fn closes_matching_fence() {
        let open = CodeFence::sig("```").unwrap();
        assert!(CodeFence::closes(open, "```"));
        assert!(CodeFence::closes(open, "````  "));
        assert!(!CodeFence::closes(open, "``"));
        assert!(!CodeFence::closes(open, "``` rust"));
        assert!(!CodeFence::closes(open, "~~~"));
    }

    #[test]
    fn longer_opener_needs_longer_closer() {
        let open = CodeFence::sig("`````").unwrap();
        assert!(!CodeFence::closes(open, "```"));
        assert!(CodeFence::closes(open, "`````"));
    }

    #[test]
    fn fence_for_outgrows_content() {
        let ticks = FenceKind::Backticks;
        assert_eq!(CodeFence::fence_for(ticks, "plain"), "```");
        assert_eq!(CodeFence::fence_for(ticks, "```\ninner\n```"), "````");
        assert_eq!(CodeFence::fence_for(ticks, "  `````"), "``````");
        assert_eq!(CodeFence::fence_for(FenceKind::Tildes, "~~~~"), "~~~~~");
    }
}
