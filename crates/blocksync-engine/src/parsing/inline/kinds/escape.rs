/// Backslash escapes: `\` followed by ASCII punctuation is that punctuation.
pub struct Escape;

impl Escape {
    pub const BACKSLASH: u8 = b'\\';

    pub fn is_escapable(b: u8) -> bool {
        b.is_ascii_punctuation()
    }

    /// Removes backslash escapes from `s`.
    pub fn unescape(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == Self::BACKSLASH as char
                && chars.peek().is_some_and(|n| n.is_ascii_punctuation())
            {
                if let Some(n) = chars.next() {
                    out.push(n);
                }
                continue;
            }
            out.push(c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_punctuation_only() {
        assert_eq!(Escape::unescape(r"\*a\* \\ \q"), r"*a* \ \q");
        assert_eq!(Escape::unescape(r"trailing\"), r"trailing\");
    }
}
