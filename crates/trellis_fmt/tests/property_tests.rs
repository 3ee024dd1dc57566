#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls
)]
//! Property-based tests for the template formatter.
//!
//! These tests use proptest to generate synthetic documents and verify:
//! 1. Content preservation: every word and token survives, in order
//! 2. Width compliance: no line exceeds the budget when every unit fits
//! 3. Normalization: single-line directive content always renders as
//!    `<% trimmed %>`
//! 4. Determinism: the same tree always formats identically
//!
//! This complements the hand-written scenarios by exercising inputs not
//! present in the fixed cases.

use proptest::prelude::*;
use trellis_fmt::{format_document, FormatConfig};
use trellis_ir::{
    AttrValue, Attribute, Directive, DirectiveMarker, Element, NodeArena, NodeId, NodeKind,
    QuoteKind, Span,
};

fn doc(arena: &mut NodeArena, children: Vec<NodeId>) {
    let root = arena.alloc(NodeKind::Document { children }, Span::DUMMY);
    arena.set_root(root);
}

fn text(arena: &mut NodeArena, content: &str) -> NodeId {
    arena.alloc(
        NodeKind::Text {
            content: content.into(),
        },
        Span::DUMMY,
    )
}

fn fmt(arena: &NodeArena) -> String {
    format_document(arena, "", FormatConfig::default())
}

/// A short lowercase word, safe from every punctuation-adjacency rule.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,12}").expect("valid regex")
}

/// A token-list entry, e.g. a utility class name.
fn token_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9-]{0,18}").expect("valid regex")
}

proptest! {
    #[test]
    fn flowed_text_preserves_words(words in prop::collection::vec(word_strategy(), 1..60)) {
        let mut arena = NodeArena::new();
        let body = words.join(" ");
        let t = text(&mut arena, &body);
        doc(&mut arena, vec![t]);

        let out = fmt(&arena);
        let reflowed: Vec<&str> = out.split_whitespace().collect();
        let original: Vec<&str> = words.iter().map(|w| w.as_str()).collect();
        prop_assert_eq!(reflowed, original);

        for line in out.lines() {
            prop_assert!(line.chars().count() <= 80);
        }
        prop_assert!(out.ends_with('\n'));
    }

    #[test]
    fn token_list_values_preserve_tokens(tokens in prop::collection::vec(token_strategy(), 1..40)) {
        let mut arena = NodeArena::new();
        let class = arena.alloc(
            NodeKind::Attribute(Attribute {
                name: "class".into(),
                value: Some(AttrValue::literal(QuoteKind::Double, tokens.join(" "))),
            }),
            Span::DUMMY,
        );
        let x = text(&mut arena, "x");
        let div = arena.alloc(
            NodeKind::Element(Element {
                tag_name: "div".into(),
                attrs: vec![class],
                children: vec![x],
                open_span: Span::DUMMY,
                close_span: Some(Span::DUMMY),
                self_closing: false,
            }),
            Span::DUMMY,
        );
        doc(&mut arena, vec![div]);

        let out = fmt(&arena);
        let start = out.find("class=\"").expect("class attribute present") + "class=\"".len();
        let end = start + out[start..].find('"').expect("closing quote present");
        let value: Vec<&str> = out[start..end].split_whitespace().collect();
        let original: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
        prop_assert_eq!(value, original);

        for line in out.lines() {
            prop_assert!(line.chars().count() <= 80);
        }
    }

    #[test]
    fn single_line_directive_content_trimmed(
        content in prop::string::string_regex(" {0,3}[a-z][a-z_. ]{0,30}").expect("valid regex"),
    ) {
        let mut arena = NodeArena::new();
        let d = arena.alloc(
            NodeKind::Directive(Directive {
                marker: DirectiveMarker::Expression,
                content: content.clone(),
            }),
            Span::DUMMY,
        );
        doc(&mut arena, vec![d]);

        let out = fmt(&arena);
        prop_assert_eq!(out, format!("<%= {} %>\n", content.trim()));
    }

    #[test]
    fn formatting_is_deterministic(words in prop::collection::vec(word_strategy(), 1..30)) {
        let mut arena = NodeArena::new();
        let body = words.join(" ");
        let t = text(&mut arena, &body);
        let p = arena.alloc(
            NodeKind::Element(Element {
                tag_name: "p".into(),
                attrs: vec![],
                children: vec![t],
                open_span: Span::DUMMY,
                close_span: Some(Span::DUMMY),
                self_closing: false,
            }),
            Span::DUMMY,
        );
        doc(&mut arena, vec![p]);

        prop_assert_eq!(fmt(&arena), fmt(&arena));
    }
}
