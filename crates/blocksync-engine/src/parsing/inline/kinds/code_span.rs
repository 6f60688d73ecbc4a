/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: no other inline parsing occurs inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';
    pub const PAD: char = ' ';

    /// Strips one padding space from each side when both are present and the
    /// content is not made only of spaces. Returns the `(start, end)` trim.
    pub fn padding(content: &str) -> (usize, usize) {
        let padded = content.len() >= 2
            && content.starts_with(Self::PAD)
            && content.ends_with(Self::PAD)
            && !content.chars().all(|c| c == Self::PAD);
        if padded { (1, 1) } else { (0, 0) }
    }

    /// Delimiter and padding needed to wrap `content` so that it parses back
    /// to exactly `content`.
    pub fn wrap(content: &str) -> String {
        let longest = longest_tick_run(content);
        let ticks = (Self::TICK as char).to_string().repeat(longest + 1);
        let tick = Self::TICK as char;
        let needs_pad = content.starts_with(tick)
            || content.ends_with(tick)
            || Self::padding(content) != (0, 0);
        if needs_pad {
            format!("{ticks}{pad}{content}{pad}{ticks}", pad = Self::PAD)
        } else {
            format!("{ticks}{content}{ticks}")
        }
    }
}

fn longest_tick_run(s: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for b in s.bytes() {
        if b == CodeSpan::TICK {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
