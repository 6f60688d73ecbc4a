use crate::models::{InlineRun, normalize_runs};

use super::{
    kinds::Escape,
    parser::{parse_inline, parse_inline_without_links},
    types::InlineNode,
};

/// Parses inline source into normalized style runs.
pub fn inline_runs(s: &str) -> Vec<InlineRun> {
    normalize_runs(nodes_to_runs(s, &parse_inline(s)))
}

fn nodes_to_runs(s: &str, nodes: &[InlineNode]) -> Vec<InlineRun> {
    let mut runs = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            InlineNode::Text(span) => runs.push(InlineRun::plain(Escape::unescape(span.slice(s)))),
            InlineNode::CodeSpan { inner, .. } => runs.push(InlineRun::code(inner.slice(s))),
            InlineNode::Emphasis {
                inner, strong, em, ..
            } => runs.push(InlineRun {
                text: Escape::unescape(inner.slice(s)),
                bold: *strong,
                italic: *em,
                ..InlineRun::default()
            }),
            InlineNode::Link {
                text, dest, angled, ..
            } => {
                let text = text.slice(s);
                let url = if *angled {
                    Escape::unescape(dest.slice(s))
                } else {
                    dest.slice(s).to_string()
                };
                runs.extend(
                    nodes_to_runs(text, &parse_inline_without_links(text))
                        .into_iter()
                        .map(|run| run.with_link(url.as_str())),
                );
            }
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mixed_styles() {
        let runs = inline_runs("**bold** and *italic* and `code` and [text](http://x)");
        assert_eq!(
            runs,
            vec![
                InlineRun::bold("bold"),
                InlineRun::plain(" and "),
                InlineRun::italic("italic"),
                InlineRun::plain(" and "),
                InlineRun::code("code"),
                InlineRun::plain(" and "),
                InlineRun::link("text", "http://x"),
            ]
        );
    }

    #[test]
    fn escapes_are_resolved() {
        assert_eq!(
            inline_runs(r"1\. not \*emphasis\* \q"),
            vec![InlineRun::plain(r"1. not *emphasis* \q")]
        );
    }

    #[test]
    fn styled_link_text_carries_url() {
        assert_eq!(
            inline_runs("[**a** b](u)"),
            vec![
                InlineRun::bold("a").with_link("u"),
                InlineRun::link(" b", "u"),
            ]
        );
    }

    #[test]
    fn nested_emphasis_is_literal() {
        assert_eq!(
            inline_runs("**a *b* c**"),
            vec![InlineRun::bold("a *b* c")]
        );
    }

    #[test]
    fn underscores_are_plain() {
        assert_eq!(inline_runs("_a_ __b__"), vec![InlineRun::plain("_a_ __b__")]);
    }

    #[test]
    fn adjacent_same_link_merges() {
        assert_eq!(inline_runs("[a](u)[b](u)"), vec![InlineRun::link("ab", "u")]);
    }

    #[test]
    fn angle_destination_unescapes_but_plain_is_raw() {
        assert_eq!(
            inline_runs(r"[t](<a(\>b\\c>)"),
            vec![InlineRun::link("t", r"a(>b\c")]
        );
        assert_eq!(inline_runs(r"[t](a\>b)"), vec![InlineRun::link("t", r"a\>b")]);
    }
}
