/// ATX heading syntax: a run of `#` followed by whitespace or end of line.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';

    /// Splits a heading line into its marker count and trimmed text.
    ///
    /// The marker count is returned unclamped; `#x` is not a heading.
    pub fn parse(remainder: &str) -> Option<(usize, &str)> {
        let level = remainder
            .chars()
            .take_while(|&c| c == Self::MARKER)
            .count();
        if level == 0 {
            return None;
        }
        let rest = &remainder[level..];
        match rest.chars().next() {
            None => Some((level, "")),
            Some(c) if c.is_whitespace() => Some((level, rest.trim())),
            Some(_) => None,
        }
    }

    pub fn marker(level: u8) -> String {
        Self::MARKER.to_string().repeat(usize::from(level))
    }
}
