/// Asterisk emphasis: `*italic*`, `**bold**`, `***bold italic***`.
///
/// Underscores are ordinary text.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    /// Widest delimiter run that opens a span.
    pub const MAX_WIDTH: usize = 3;

    /// `(bold, italic)` for a delimiter of `width` stars.
    pub fn style(width: usize) -> (bool, bool) {
        (width >= 2, width != 2)
    }

    /// Delimiter for a style combination, or `None` when unstyled.
    pub fn marker(bold: bool, italic: bool) -> Option<&'static str> {
        match (bold, italic) {
            (true, true) => Some("***"),
            (true, false) => Some("**"),
            (false, true) => Some("*"),
            (false, false) => None,
        }
    }
}
