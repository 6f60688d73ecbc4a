/// Marker flavour of a list item line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    Numbered,
}

/// Flat list item syntax: `-`, `*`, `+` bullets and `1.` / `1)` ordinals.
pub struct ListItem;

impl ListItem {
    pub const BULLETS: [char; 3] = ['-', '*', '+'];
    pub const ORDINAL_DELIMITERS: [char; 2] = ['.', ')'];
    /// Longest digit run accepted as an ordinal.
    pub const MAX_ORDINAL_DIGITS: usize = 9;
    pub const BULLET: &'static str = "-";

    /// Splits a list item line into its marker flavour and trimmed text.
    pub fn parse(remainder: &str) -> Option<(ListMarker, &str)> {
        let first = remainder.chars().next()?;
        if Self::BULLETS.contains(&first) {
            return Self::after_marker(&remainder[first.len_utf8()..])
                .map(|text| (ListMarker::Bullet, text));
        }

        let digits = remainder.chars().take_while(char::is_ascii_digit).count();
        if digits == 0 || digits > Self::MAX_ORDINAL_DIGITS {
            return None;
        }
        let rest = &remainder[digits..];
        let delimiter = rest.chars().next()?;
        if !Self::ORDINAL_DELIMITERS.contains(&delimiter) {
            return None;
        }
        Self::after_marker(&rest[delimiter.len_utf8()..]).map(|text| (ListMarker::Numbered, text))
    }

    /// Byte offset of the ordinal delimiter in a numbered marker, if any.
    pub fn ordinal_delimiter_at(remainder: &str) -> Option<usize> {
        let digits = remainder.chars().take_while(char::is_ascii_digit).count();
        (digits > 0).then_some(digits)
    }

    fn after_marker(rest: &str) -> Option<&str> {
        match rest.chars().next() {
            None => Some(""),
            Some(c) if c.is_whitespace() => Some(rest.trim()),
            Some(_) => None,
        }
    }
}
