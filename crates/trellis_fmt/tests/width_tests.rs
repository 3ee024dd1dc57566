#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Width-parameterized tests for the template formatter.
//!
//! These tests verify that the formatter behaves correctly at various line
//! widths:
//! 1. Line width compliance: no lines exceed the configured max width
//!    (words and tokens are kept short enough to always be packable)
//! 2. Content preservation: every word survives reformatting, in order
//! 3. Determinism: the same tree formats identically every time
//!
//! Testing at different widths helps catch edge cases in line-breaking
//! logic.

use trellis_fmt::{format_document, FormatConfig};
use trellis_ir::{AttrValue, Attribute, Element, NodeArena, NodeId, NodeKind, QuoteKind, Span};

/// Widths to test. Covers narrow (40), standard (80), and wide (120).
const TEST_WIDTHS: &[usize] = &[40, 60, 80, 100, 120];

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

fn el(arena: &mut NodeArena, tag: &str, attrs: Vec<NodeId>, children: Vec<NodeId>) -> NodeId {
    arena.alloc(
        NodeKind::Element(Element {
            tag_name: tag.into(),
            attrs,
            children,
            open_span: Span::DUMMY,
            close_span: Some(Span::DUMMY),
            self_closing: false,
        }),
        Span::DUMMY,
    )
}

fn class_attr(arena: &mut NodeArena, value: &str) -> NodeId {
    arena.alloc(
        NodeKind::Attribute(Attribute {
            name: "class".into(),
            value: Some(AttrValue::literal(QuoteKind::Double, value)),
        }),
        Span::DUMMY,
    )
}

/// A paragraph of short words, long enough to need wrapping at every
/// tested width.
fn paragraph() -> String {
    let words: Vec<String> = (0..40).map(|i| format!("word{i}")).collect();
    words.join(" ")
}

fn assert_lines_within(out: &str, width: usize) {
    for line in out.lines() {
        assert!(
            line.chars().count() <= width,
            "line exceeds width {width}: {line:?}"
        );
    }
}

#[test]
fn wrapped_text_respects_width() {
    for &width in TEST_WIDTHS {
        let mut arena = NodeArena::new();
        let body = paragraph();
        let t = text(&mut arena, &body);
        doc(&mut arena, vec![t]);

        let out = format_document(&arena, "", FormatConfig::with_max_width(width));
        assert_lines_within(&out, width);

        let original: Vec<&str> = body.split_whitespace().collect();
        let reflowed: Vec<&str> = out.split_whitespace().collect();
        assert_eq!(original, reflowed, "words lost or reordered at width {width}");
    }
}

#[test]
fn nested_text_respects_width() {
    for &width in TEST_WIDTHS {
        let mut arena = NodeArena::new();
        let body = paragraph();
        let t = text(&mut arena, &body);
        let p = el(&mut arena, "p", vec![], vec![t]);
        let div = el(&mut arena, "div", vec![], vec![p]);
        doc(&mut arena, vec![div]);

        let out = format_document(&arena, "", FormatConfig::with_max_width(width));
        assert_lines_within(&out, width);
        assert!(out.starts_with("<div>"));
        assert!(out.ends_with("</div>\n"));
    }
}

#[test]
fn token_list_wrap_respects_width() {
    for &width in TEST_WIDTHS {
        let mut arena = NodeArena::new();
        let tokens: Vec<String> = (0..30).map(|i| format!("tok-{i}")).collect();
        let class = class_attr(&mut arena, &tokens.join(" "));
        let t = text(&mut arena, "x");
        let div = el(&mut arena, "div", vec![class], vec![t]);
        doc(&mut arena, vec![div]);

        let out = format_document(&arena, "", FormatConfig::with_max_width(width));
        assert_lines_within(&out, width);
        for token in &tokens {
            assert!(out.contains(token), "token {token} lost at width {width}");
        }
    }
}

#[test]
fn formatting_is_deterministic_at_every_width() {
    for &width in TEST_WIDTHS {
        let mut arena = NodeArena::new();
        let body = paragraph();
        let t = text(&mut arena, &body);
        let p = el(&mut arena, "p", vec![], vec![t]);
        doc(&mut arena, vec![p]);

        let config = FormatConfig::with_max_width(width);
        let first = format_document(&arena, "", config);
        let second = format_document(&arena, "", config);
        assert_eq!(first, second);
    }
}
