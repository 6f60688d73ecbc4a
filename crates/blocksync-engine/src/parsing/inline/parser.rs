use crate::parsing::rope::span::Span;

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Emphasis, Escape, Link},
    types::InlineNode,
};

/// Parses inline content into a sequence of [`InlineNode`]s.
///
/// # Precedence
/// At each position, in order: backslash escape, code span, emphasis, link.
/// Code spans are raw zones and suppress all other parsing inside them.
/// Anything that fails to match is plain text; parsing never fails.
///
/// # Returns
/// A vector of inline nodes covering the entire input. Text between special
/// constructs is emitted as `InlineNode::Text`.
pub fn parse_inline(s: &str) -> Vec<InlineNode> {
    parse_with(s, true)
}

/// Like [`parse_inline`] but treats `[` as plain text. Used for link text.
pub fn parse_inline_without_links(s: &str) -> Vec<InlineNode> {
    parse_with(s, false)
}

fn parse_with(s: &str, links: bool) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = cur.pos();

    // Helper to flush accumulated text as a Text node
    fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
        if end > start {
            out.push(InlineNode::Text(Span { start, end }));
        }
    }

    while !cur.eof() {
        if at_escape(&cur) {
            cur.bump_n(2);
            continue;
        }
        if cur.peek() == Some(CodeSpan::TICK) {
            match try_parse_code_span(&mut cur) {
                Some(node) => {
                    flush_text(&mut out, text_start, node.full().start);
                    text_start = node.full().end;
                    out.push(node);
                }
                // An unmatched run is literal as a whole.
                None => cur.bump_n(cur.run_len(CodeSpan::TICK)),
            }
            continue;
        }
        let node = match try_parse_emphasis(&mut cur) {
            Some(node) => Some(node),
            None if links => try_parse_link(&mut cur),
            None => None,
        };
        if let Some(node) = node {
            flush_text(&mut out, text_start, node.full().start);
            text_start = node.full().end;
            out.push(node);
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, text_start, cur.pos());
    out
}

fn at_escape(cur: &Cursor<'_>) -> bool {
    cur.peek() == Some(Escape::BACKSLASH) && cur.peek_at(1).is_some_and(Escape::is_escapable)
}

/// Attempts to parse a code span starting at the current position.
///
/// The opening run of N backticks is closed by the next run of exactly N.
/// On failure, cursor position is restored.
fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    let saved = cur.clone();
    let start = cur.pos();
    let n = cur.run_len(CodeSpan::TICK);
    if n == 0 {
        return None;
    }
    cur.bump_n(n);
    let content_start = cur.pos();

    let Some(content_end) = find_closing_ticks(cur, n) else {
        *cur = saved;
        return None;
    };
    cur.bump_n(n); // closing run

    let (lead, trail) = CodeSpan::padding(&cur.s[content_start..content_end]);
    Some(InlineNode::CodeSpan {
        full: Span::new(start, cur.pos()),
        inner: Span::new(content_start + lead, content_end - trail),
    })
}

/// Advances to the next backtick run of exactly `n`, returning its start.
fn find_closing_ticks(cur: &mut Cursor<'_>, n: usize) -> Option<usize> {
    while !cur.eof() {
        let run = cur.run_len(CodeSpan::TICK);
        if run == n {
            return Some(cur.pos());
        }
        if run > 0 {
            cur.bump_n(run);
        } else {
            cur.bump();
        }
    }
    None
}

/// Attempts to parse an emphasis span at the current position.
///
/// Tries the widest delimiter first (`***`, then `**`, then `*`). The opener
/// must be followed by non-whitespace and the closer preceded by
/// non-whitespace. On failure, cursor position is restored.
fn try_parse_emphasis(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    let run = cur.run_len(Emphasis::STAR);
    if run == 0 {
        return None;
    }
    for width in (1..=run.min(Emphasis::MAX_WIDTH)).rev() {
        if let Some(node) = try_parse_emphasis_width(cur, width) {
            return Some(node);
        }
    }
    None
}

fn try_parse_emphasis_width(cur: &mut Cursor<'_>, width: usize) -> Option<InlineNode> {
    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(width);
    let inner_start = cur.pos();
    if cur.current_char().is_none_or(char::is_whitespace) {
        *cur = saved;
        return None;
    }

    let delimiter = vec![Emphasis::STAR; width];
    while !cur.eof() {
        if at_escape(cur) {
            cur.bump_n(2);
            continue;
        }
        if cur.pos() > inner_start
            && cur.starts_with(&delimiter)
            && cur.prev_char().is_some_and(|c| !c.is_whitespace())
        {
            let inner_end = cur.pos();
            cur.bump_n(width);
            let (strong, em) = Emphasis::style(width);
            return Some(InlineNode::Emphasis {
                full: Span::new(start, cur.pos()),
                inner: Span::new(inner_start, inner_end),
                strong,
                em,
            });
        }
        cur.bump();
    }

    *cur = saved;
    None
}

/// Attempts to parse `[text](dest)` or `[text](<dest>)`.
///
/// The closing bracket is found by nesting depth, skipping escapes and code
/// spans. Empty text or an empty destination is not a link. On failure,
/// cursor position is restored.
fn try_parse_link(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(Link::TEXT_OPEN) {
        return None;
    }
    let saved = cur.clone();
    let parsed = parse_link_parts(cur);
    if parsed.is_none() {
        *cur = saved;
    }
    parsed
}

fn parse_link_parts(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    let start = cur.pos();
    cur.bump(); // [
    let text_start = cur.pos();
    let text_end = find_text_close(cur)?;
    cur.bump(); // ]
    if text_end == text_start || cur.bump() != Some(Link::DEST_OPEN) {
        return None;
    }

    let angled = cur.peek() == Some(Link::ANGLE_OPEN);
    let dest = if angled {
        cur.bump();
        let dest_start = cur.pos();
        while cur.peek().is_some_and(|b| b != Link::ANGLE_CLOSE) {
            if at_escape(cur) {
                cur.bump_n(2);
            } else {
                cur.bump();
            }
        }
        let dest_end = cur.pos();
        if cur.bump() != Some(Link::ANGLE_CLOSE) {
            return None;
        }
        Span::new(dest_start, dest_end)
    } else {
        let dest_start = cur.pos();
        while cur.peek().is_some_and(|b| b != Link::DEST_CLOSE) {
            if cur.current_char().is_some_and(char::is_whitespace) {
                return None;
            }
            cur.bump();
        }
        Span::new(dest_start, cur.pos())
    };

    if dest.is_empty() || cur.bump() != Some(Link::DEST_CLOSE) {
        return None;
    }

    Some(InlineNode::Link {
        full: Span::new(start, cur.pos()),
        text: Span::new(text_start, text_end),
        dest,
        angled,
    })
}

/// Advances to the `]` matching an already consumed `[`.
fn find_text_close(cur: &mut Cursor<'_>) -> Option<usize> {
    let mut depth = 1usize;
    while !cur.eof() {
        if at_escape(cur) {
            cur.bump_n(2);
            continue;
        }
        match cur.peek() {
            Some(CodeSpan::TICK) => {
                let run = cur.run_len(CodeSpan::TICK);
                if try_parse_code_span(cur).is_none() {
                    cur.bump_n(run);
                }
            }
            Some(Link::TEXT_OPEN) => {
                depth += 1;
                cur.bump();
            }
            Some(Link::TEXT_CLOSE) => {
                depth -= 1;
                if depth == 0 {
                    return Some(cur.pos());
                }
                cur.bump();
            }
            _ => {
                cur.bump();
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(s: &str, sp: Span) -> &str {
        sp.slice(s)
    }

    #[test]
    fn parse_simple_text() {
        let nodes = parse_inline("hello world");
        assert_eq!(nodes, vec![InlineNode::Text(Span::new(0, 11))]);
    }

    #[test]
    fn parse_code_span() {
        let nodes = parse_inline("`code`");
        assert_eq!(
            nodes,
            vec![InlineNode::CodeSpan {
                full: Span::new(0, 6),
                inner: Span::new(1, 5)
            }]
        );
    }

    #[test]
    fn code_span_padding_is_stripped() {
        let s = "`` `tick` ``";
        match &parse_inline(s)[..] {
            [InlineNode::CodeSpan { inner, .. }] => assert_eq!(slice(s, *inner), "`tick`"),
            other => panic!("expected CodeSpan, got {other:?}"),
        }
    }

    #[test]
    fn unmatched_tick_run_is_literal() {
        let s = "``a`";
        assert_eq!(parse_inline(s), vec![InlineNode::Text(Span::new(0, 4))]);
    }

    #[test]
    fn code_span_suppresses_emphasis_and_links() {
        let nodes = parse_inline("`*a* [b](c)`");
        assert_eq!(nodes.len(), 1);
        assert!(matches!(nodes[0], InlineNode::CodeSpan { .. }));
    }

    #[test]
    fn parse_emphasis_widths() {
        let s = "*i* **b** ***bi***";
        let styles: Vec<_> = parse_inline(s)
            .into_iter()
            .filter_map(|n| match n {
                InlineNode::Emphasis {
                    inner, strong, em, ..
                } => Some((slice(s, inner).to_string(), strong, em)),
                _ => None,
            })
            .collect();
        assert_eq!(
            styles,
            vec![
                ("i".to_string(), false, true),
                ("b".to_string(), true, false),
                ("bi".to_string(), true, true),
            ]
        );
    }

    #[test]
    fn emphasis_needs_flanking_non_whitespace() {
        assert_eq!(parse_inline("a * b *").len(), 1);
        assert_eq!(parse_inline("** b").len(), 1);
        assert_eq!(parse_inline("*b *").len(), 1);
    }

    #[test]
    fn escaped_star_does_not_close() {
        let s = r"*a\*b*";
        match &parse_inline(s)[..] {
            [InlineNode::Emphasis { inner, .. }] => assert_eq!(slice(s, *inner), r"a\*b"),
            other => panic!("expected Emphasis, got {other:?}"),
        }
    }

    #[test]
    fn unclosed_emphasis_becomes_text() {
        let nodes = parse_inline("**unclosed");
        assert_eq!(nodes, vec![InlineNode::Text(Span::new(0, 10))]);
    }

    #[test]
    fn parse_link() {
        let s = "see [the docs](https://x.y) now";
        let nodes = parse_inline(s);
        assert_eq!(nodes.len(), 3);
        match &nodes[1] {
            InlineNode::Link { text, dest, .. } => {
                assert_eq!(slice(s, *text), "the docs");
                assert_eq!(slice(s, *dest), "https://x.y");
            }
            other => panic!("expected Link, got {other:?}"),
        }
    }

    #[test]
    fn parse_angle_link_with_spaces() {
        let s = "[a](<my file.md>)";
        match &parse_inline(s)[..] {
            [InlineNode::Link { dest, .. }] => assert_eq!(slice(s, *dest), "my file.md"),
            other => panic!("expected Link, got {other:?}"),
        }
    }

    #[test]
    fn escaped_angle_close_stays_in_destination() {
        let s = r"[a](<x\>y>)";
        match &parse_inline(s)[..] {
            [InlineNode::Link { dest, angled, .. }] => {
                assert!(*angled);
                assert_eq!(slice(s, *dest), r"x\>y");
            }
            other => panic!("expected Link, got {other:?}"),
        }
    }

    #[test]
    fn link_text_nests_brackets_and_skips_code() {
        let s = "[a [b] `]`](u)";
        match &parse_inline(s)[..] {
            [InlineNode::Link { text, .. }] => assert_eq!(slice(s, *text), "a [b] `]`"),
            other => panic!("expected Link, got {other:?}"),
        }
    }

    #[test]
    fn broken_links_are_text() {
        for s in ["[a]", "[a] (u)", "[](u)", "[a]()", "[a](b c)", "[a](u"] {
            assert!(
                parse_inline(s)
                    .iter()
                    .all(|n| matches!(n, InlineNode::Text(_))),
                "{s} should be text"
            );
        }
    }

    #[test]
    fn links_disabled_treats_brackets_as_text() {
        let nodes = parse_inline_without_links("[a](u)");
        assert_eq!(nodes, vec![InlineNode::Text(Span::new(0, 6))]);
    }
}
