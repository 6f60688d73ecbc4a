use crate::models::InlineRun;
use crate::parsing::inline::kinds::{CodeSpan, Emphasis, Escape, Link};

/// Renders a run sequence as inline markdown that parses back to the same runs.
///
/// Consecutive runs sharing a link are wrapped in a single `[...](url)`.
pub fn render_runs(runs: &[InlineRun]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < runs.len() {
        match runs[i].link.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => {
                let group = runs[i..]
                    .iter()
                    .take_while(|r| r.link.as_deref() == Some(url))
                    .count();
                let inner: String = runs[i..i + group]
                    .iter()
                    .map(|r| render_run(r, true))
                    .collect();
                out.push(Link::TEXT_OPEN as char);
                out.push_str(&inner);
                out.push(Link::TEXT_CLOSE as char);
                out.push(Link::DEST_OPEN as char);
                out.push_str(&Link::destination(url));
                out.push(Link::DEST_CLOSE as char);
                i += group;
            }
            None => {
                out.push_str(&render_run(&runs[i], false));
                i += 1;
            }
        }
    }
    out
}

fn render_run(run: &InlineRun, in_link: bool) -> String {
    if run.code {
        if run.text.is_empty() {
            return String::new();
        }
        return CodeSpan::wrap(&run.text.replace('\n', " "));
    }

    let Some(marker) = Emphasis::marker(run.bold, run.italic) else {
        return escape_text(&run.text, in_link);
    };
    let core = run.text.trim();
    if core.is_empty() {
        return escape_text(&run.text, in_link);
    }
    // Whitespace moves outside the delimiters so they stay flanking.
    let lead = &run.text[..run.text.len() - run.text.trim_start().len()];
    let trail = &run.text[run.text.trim_end().len()..];
    format!(
        "{lead}{marker}{}{marker}{trail}",
        escape_text(core, in_link)
    )
}

/// Escapes characters that would otherwise open an inline construct.
///
/// A backslash is escaped when it precedes punctuation or ends the text, so
/// it can never combine with whatever is rendered next.
pub fn escape_text(text: &str, in_link: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let escape = match c {
            '\\' => chars.peek().is_none_or(|n| n.is_ascii_punctuation()),
            '*' | '`' | '[' => true,
            ']' => in_link,
            _ => false,
        };
        if escape {
            out.push(Escape::BACKSLASH as char);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(InlineRun::plain("a*b"), r"a\*b")]
    #[case(InlineRun::bold("b"), "**b**")]
    #[case(InlineRun::italic(" i "), " *i* ")]
    #[case(InlineRun { text: "bi".into(), bold: true, italic: true, ..Default::default() }, "***bi***")]
    #[case(InlineRun::code("x`y"), "``x`y``")]
    #[case(InlineRun { text: "c".into(), bold: true, code: true, ..Default::default() }, "`c`")]
    #[case(InlineRun::bold("   "), "   ")]
    fn single_runs(#[case] run: InlineRun, #[case] expected: &str) {
        assert_eq!(render_runs(&[run]), expected);
    }

    #[test]
    fn link_groups_share_one_bracket() {
        let runs = vec![
            InlineRun::bold("a").with_link("u"),
            InlineRun::link(" b]", "u"),
            InlineRun::plain(" after"),
        ];
        assert_eq!(render_runs(&runs), r"[**a** b\]](u) after");
    }

    #[test]
    fn link_with_spaces_uses_angle_form() {
        let runs = vec![InlineRun::link("doc", "my doc.md")];
        assert_eq!(render_runs(&runs), "[doc](<my doc.md>)");
    }

    #[test]
    fn empty_link_url_is_dropped() {
        let runs = vec![InlineRun::link("x", "")];
        assert_eq!(render_runs(&runs), "x");
    }

    #[rstest]
    #[case(r"a\b", r"a\b")]
    #[case(r"a\", r"a\\")]
    #[case(r"\*", r"\\\*")]
    #[case("[x]", r"\[x]")]
    fn escaping(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(escape_text(text, false), expected);
    }
}
