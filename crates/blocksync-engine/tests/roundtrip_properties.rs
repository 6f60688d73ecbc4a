//! Property-based tests for the markdown converter.
//!
//! Rendering a parsed document and parsing it again must give back the same
//! document, whatever the input looked like.

use blocksync_engine::{Block, Document, InlineRun, parse, render};
use proptest::collection::vec;
use proptest::prelude::*;

/// Fragments that exercise every construct the parser knows about, plus the
/// punctuation that has to be escaped when it appears literally.
fn fragment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z]{1,6}".prop_map(String::from),
        3 => Just(" ".to_string()),
        2 => Just("\n".to_string()),
        1 => Just("\n\n".to_string()),
        1 => Just("\t".to_string()),
        1 => Just("*".to_string()),
        1 => Just("**".to_string()),
        1 => Just("***".to_string()),
        1 => Just("`".to_string()),
        1 => Just("``".to_string()),
        1 => Just("[".to_string()),
        1 => Just("]".to_string()),
        1 => Just("(".to_string()),
        1 => Just(")".to_string()),
        1 => Just("<".to_string()),
        1 => Just(">".to_string()),
        1 => Just("\\".to_string()),
        1 => Just("_".to_string()),
        1 => Just("# ".to_string()),
        1 => Just("## ".to_string()),
        1 => Just("#### ".to_string()),
        1 => Just("- ".to_string()),
        1 => Just("+ ".to_string()),
        1 => Just("1. ".to_string()),
        1 => Just("2) ".to_string()),
        1 => Just("```".to_string()),
        1 => Just("~~~".to_string()),
        1 => Just("](".to_string()),
        1 => Just("(>".to_string()),
    ]
}

fn markdown_strategy() -> impl Strategy<Value = String> {
    vec(fragment_strategy(), 0..48).prop_map(|parts| parts.concat())
}

fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn words_strategy() -> impl Strategy<Value = String> {
    vec(word_strategy(), 1..6).prop_map(|w| w.join(" "))
}

/// Blocks whose rendered form parses back to exactly the same block.
fn stable_block_strategy() -> impl Strategy<Value = Block> {
    prop_oneof![
        (2u8..=3, words_strategy())
            .prop_map(|(level, text)| Block::heading(level, vec![InlineRun::plain(text)])),
        (words_strategy(), words_strategy()).prop_map(|(a, b)| Block::paragraph(vec![
            InlineRun::plain(format!("{a} ")),
            InlineRun::bold(b),
        ])),
        words_strategy().prop_map(|t| Block::bullet(vec![InlineRun::italic(t)])),
        (words_strategy(), word_strategy())
            .prop_map(|(t, host)| Block::numbered(vec![InlineRun::link(
                t,
                format!("https://{host}.example/")
            )])),
        (word_strategy(), vec("[a-z`#* ]{0,12}", 0..4))
            .prop_map(|(lang, lines)| Block::code(lang, lines.join("\n"))),
    ]
}

proptest! {
    #[test]
    fn render_then_parse_is_stable(md in markdown_strategy()) {
        let doc = parse(&md);
        let rendered = render(&doc);
        prop_assert_eq!(parse(&rendered), doc, "rendered:\n{}", rendered);
    }

    #[test]
    fn rendering_is_a_fixed_point(md in markdown_strategy()) {
        let once = render(&parse(&md));
        let twice = render(&parse(&once));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn stable_documents_round_trip(
        title in proptest::option::of(words_strategy()),
        blocks in vec(stable_block_strategy(), 0..12),
    ) {
        let doc = Document::new(title, blocks);
        prop_assert_eq!(parse(&render(&doc)), doc);
    }

    #[test]
    fn paragraph_text_is_preserved(words in vec(word_strategy(), 1..20)) {
        let text = words.join(" ");
        let doc = parse(&text);
        prop_assert_eq!(doc.blocks.len(), 1);
        prop_assert_eq!(doc.blocks[0].plain_text(), text);
    }
}
