//! Identity printer.
//!
//! Reconstructs the original source bytes of any node (or region) from its
//! span. Used for content-preserving element bodies (`<pre>`, `<script>`,
//! `<style>`, `<textarea>`) and as the universal fallback for node kinds
//! the formatter does not reformat: the output is a slice of the original
//! document, so it is byte-identical by construction.

use crate::arena::NodeArena;
use crate::node::Element;
use crate::node_id::NodeId;
use crate::span::Span;

/// Byte-identical reconstruction of source regions.
#[derive(Debug, Clone, Copy)]
pub struct VerbatimPrinter<'s> {
    source: &'s str,
}

impl<'s> VerbatimPrinter<'s> {
    /// Create an identity printer over the original document text.
    pub fn new(source: &'s str) -> Self {
        VerbatimPrinter { source }
    }

    /// The full original source.
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Original text of an arbitrary span.
    ///
    /// Out-of-range spans (synthesized nodes carrying `Span::DUMMY` among
    /// them) yield the empty string rather than panicking.
    pub fn print_span(&self, span: Span) -> &'s str {
        self.source.get(span.range()).unwrap_or("")
    }

    /// Original text of a node.
    pub fn print(&self, arena: &NodeArena, id: NodeId) -> &'s str {
        self.print_span(arena.get(id).span)
    }

    /// Original text between an element's opening and closing tags.
    ///
    /// Empty for void and self-closing elements.
    pub fn print_inner(&self, element: &Element) -> &'s str {
        match element.body_span() {
            Some(span) => self.print_span(span),
            None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn print_span_slices_source() {
        let printer = VerbatimPrinter::new("<div>hello</div>");
        assert_eq!(printer.print_span(Span::new(5, 10)), "hello");
    }

    #[test]
    fn print_span_out_of_range_is_empty() {
        let printer = VerbatimPrinter::new("abc");
        assert_eq!(printer.print_span(Span::new(2, 50)), "");
    }

    #[test]
    fn print_node() {
        let source = "<p>x</p>";
        let mut arena = NodeArena::new();
        let id = arena.alloc(NodeKind::Text { content: "x".into() }, Span::new(3, 4));
        let printer = VerbatimPrinter::new(source);
        assert_eq!(printer.print(&arena, id), "x");
    }

    #[test]
    fn print_inner_body() {
        let source = "<pre>  kept\n  as-is </pre>";
        let element = Element {
            tag_name: "pre".into(),
            attrs: vec![],
            children: vec![],
            open_span: Span::new(0, 5),
            close_span: Some(Span::new(20, 26)),
            self_closing: false,
        };
        let printer = VerbatimPrinter::new(source);
        assert_eq!(printer.print_inner(&element), "  kept\n  as-is ");
    }
}
