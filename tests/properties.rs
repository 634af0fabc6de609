//! Property-based tests
//!
//! Plain-content round trip through the inline resolver, totality of the transpiler and both
//! serializers, and idempotence of the canonical source.

use proptest::prelude::*;
use wikimark::math::{delimited, latex, omml, parse, MathMode};
use wikimark::wiki::ast::{visible_text, BlockKind};
use wikimark::wiki::config::MathConfig;
use wikimark::wiki::inlines::resolve_spans;
use wikimark::{convert_str, MathNode, WikiConfig};

/// Source fragments that combine into mostly-valid equations.
fn equation_source() -> impl Strategy<Value = String> {
    let fragment = prop::sample::select(vec![
        "x", "y", "2", "3", " ", "+", "=", "(", ")", "^", "_", "{", "}", "[", "]", r"\alpha",
        r"\pi", r"\sin", r"\frac", r"\sqrt", r"\hat", r"\vec", r"\text{hi}", r"\left(",
        r"\right)", r"\,", r"\leq",
    ]);
    prop::collection::vec(fragment, 0..16).prop_map(|parts| parts.concat())
}

fn count_nodes(node: &MathNode) -> usize {
    1 + node.children().into_iter().map(count_nodes).sum::<usize>()
}

proptest! {
    #[test]
    fn plain_lines_round_trip(line in "[a-zA-Z0-9 ,.;:!?'()-]{0,60}") {
        let spans = resolve_spans(&line);
        prop_assert_eq!(visible_text(&spans), line);
    }

    #[test]
    fn plain_paragraph_blocks_round_trip(line in "[a-zA-Z][a-zA-Z0-9 ,.;!?]{0,40}") {
        let doc = convert_str(&line, &WikiConfig::default());
        for block in doc.iter_blocks() {
            if block.kind == BlockKind::Paragraph {
                prop_assert_eq!(block.visible_text(), block.raw_text.clone());
            }
        }
    }

    #[test]
    fn conversion_never_panics(source in "\\PC{0,200}") {
        let doc = convert_str(&source, &WikiConfig::default());
        let _ = doc.stats();
    }

    #[test]
    fn transpiler_never_panics(source in "\\PC{0,60}") {
        let _ = parse(&source);
    }

    #[test]
    fn serializers_are_total(source in equation_source()) {
        if let Ok(node) = parse(&source) {
            let config = MathConfig::default();
            let element = omml::serialize(&node, MathMode::Display, &config);
            prop_assert!(element.element_count() >= 1);
            let text = delimited::serialize(&source, MathMode::Inline, &config);
            prop_assert!(text.starts_with(&config.inline_open));
            prop_assert_eq!(count_nodes(&node), node.node_count());
        }
    }

    #[test]
    fn canonical_source_reparses_equal(source in equation_source()) {
        if let Ok(node) = parse(&source) {
            let canonical = latex::to_latex(&node);
            prop_assert_eq!(parse(&canonical), Ok(node));
        }
    }
}
