/// Paragraph block type.
///
/// Paragraphs have no delimiters: they are the default leaf block when no
/// other opener matches. Contiguous lines are joined with a single space.
pub struct Paragraph;

impl Paragraph {
    pub const LINE_JOIN: &'static str = " ";

    pub fn join<S: AsRef<str>>(lines: &[S]) -> String {
        lines
            .iter()
            .map(|l| l.as_ref().trim())
            .collect::<Vec<_>>()
            .join(Self::LINE_JOIN)
    }
}
