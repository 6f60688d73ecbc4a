/// Inline link `[text](url)` / `[text](<url>)` delimiters.
pub struct Link;

impl Link {
    pub const TEXT_OPEN: u8 = b'[';
    pub const TEXT_CLOSE: u8 = b']';
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';
    pub const ANGLE_OPEN: u8 = b'<';
    pub const ANGLE_CLOSE: u8 = b'>';

    /// Formats a destination so that it parses back unchanged.
    ///
    /// Destinations with whitespace or parentheses, or starting with `<`, use
    /// the angle-bracket form, where backslashes and `>` are escaped.
    pub fn destination(url: &str) -> String {
        let needs_angle = url.starts_with(Self::ANGLE_OPEN as char)
            || url
                .chars()
                .any(|c| c.is_whitespace() || c == '(' || c == ')');
        if !needs_angle {
            return url.to_string();
        }
        let mut out = String::with_capacity(url.len() + 2);
        out.push(Self::ANGLE_OPEN as char);
        for c in url.chars() {
            if c == '\\' || c == Self::ANGLE_CLOSE as char {
                out.push('\\');
            }
            out.push(c);
        }
        out.push(Self::ANGLE_CLOSE as char);
        out
    }
}
