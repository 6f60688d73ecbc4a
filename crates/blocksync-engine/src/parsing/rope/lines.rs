use xi_rope::Rope;

use super::span::Span;

/// A single line of the source with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Byte span of this line in the rope (includes the terminator if present).
    pub span: Span,
    /// The line text including its terminator.
    pub text: String,
}

impl LineRef {
    /// Line text with any `\n` / `\r\n` terminator removed.
    pub fn content(&self) -> &str {
        let t = self.text.strip_suffix('\n').unwrap_or(&self.text);
        t.strip_suffix('\r').unwrap_or(t)
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` to preserve newline characters, which keeps span tracking
/// exact during block parsing.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        offset += line.len();
        LineRef {
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}
