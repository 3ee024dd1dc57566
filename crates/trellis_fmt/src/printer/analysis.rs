//! Element analysis.
//!
//! Decides, per element, whether its opening tag, content, and closing tag
//! render inline. Analyses are memoized by arena index for the lifetime of
//! one pass; nothing is persisted across invocations.
//!
//! The general case measures by rendering through the real pipeline into an
//! isolated capture buffer, so the analyzer and the renderer can never
//! disagree about what an inline layout would look like.

use trellis_ir::{Element, NodeId, NodeKind};

use super::Printer;
use crate::classify::{
    all_children_inline, is_content_preserving, is_inline_node, is_void_element,
    is_whitespace_only,
};

/// Per-element layout decision.
///
/// Invariant: `content_inline` implies `open_tag_inline` — a body is never
/// rendered compactly beneath an expanded opening tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementAnalysis {
    /// Opening tag (name plus attributes) fits on one line.
    pub open_tag_inline: bool,
    /// Body renders on the same line as the tags.
    pub content_inline: bool,
    /// Closing tag shares the content line. Always equals `content_inline`.
    pub close_tag_inline: bool,
}

impl ElementAnalysis {
    /// Fully expanded rendering; also the fail-closed answer.
    pub const BLOCK: Self = Self {
        open_tag_inline: false,
        content_inline: false,
        close_tag_inline: false,
    };

    /// Fully inline rendering (void and self-closing elements).
    pub const INLINE: Self = Self {
        open_tag_inline: true,
        content_inline: true,
        close_tag_inline: true,
    };

    /// Content-preserving elements: inline opening tag, verbatim block body.
    pub const PRESERVED: Self = Self {
        open_tag_inline: true,
        content_inline: false,
        close_tag_inline: false,
    };
}

impl Printer<'_> {
    /// Analyze an element, memoized per node for this pass.
    ///
    /// Re-entrant analysis (a capture cycle) and non-element nodes fail
    /// closed to block rendering rather than looping or crashing.
    pub(crate) fn analyze(&mut self, id: NodeId) -> ElementAnalysis {
        if let Some(&analysis) = self.analyses.get(&id) {
            return analysis;
        }
        if !self.analyzing.insert(id) {
            return ElementAnalysis::BLOCK;
        }
        let analysis = self.compute_analysis(id);
        self.analyzing.remove(&id);
        self.analyses.insert(id, analysis);
        analysis
    }

    fn compute_analysis(&mut self, id: NodeId) -> ElementAnalysis {
        let Some(element) = self.element_ref(id) else {
            return ElementAnalysis::BLOCK;
        };

        if is_content_preserving(&element.tag_name) {
            return ElementAnalysis::PRESERVED;
        }
        if is_void_element(&element.tag_name) || element.self_closing {
            return ElementAnalysis::INLINE;
        }

        let open_tag_inline = self.open_tag_renders_inline(id, element);
        let content_inline = open_tag_inline && self.content_renders_inline(id, element);

        ElementAnalysis {
            open_tag_inline,
            content_inline,
            close_tag_inline: content_inline,
        }
    }

    /// Decide the opening tag: forced block when any attribute entry spans
    /// multiple source lines, otherwise capture-and-measure.
    fn open_tag_renders_inline(&mut self, id: NodeId, element: &'_ Element) -> bool {
        if self.opening_tag_spans_lines(element) {
            return false;
        }

        let rendered = self.capture(|printer| {
            if let Some(element) = printer.element_ref(id) {
                printer.emit_open_tag_inline(element);
            }
        });
        !rendered.contains('\n')
            && self.ctx.indent_width() + rendered.chars().count() <= self.ctx.max_width()
    }

    /// Whether any opening-tag entry is multi-line in the source: a
    /// directive with a multi-line body, a control-flow group spanning
    /// lines, or an attribute value containing a newline.
    fn opening_tag_spans_lines(&self, element: &Element) -> bool {
        element.attrs.iter().any(|&entry| {
            match &self.arena().get(entry).kind {
                NodeKind::Attribute(attr) => {
                    attr.value.as_ref().is_some_and(|value| value.is_multiline())
                }
                NodeKind::Directive(directive) => directive.is_multiline(),
                NodeKind::ControlFlow(_) => self.source_text(entry).contains('\n'),
                _ => false,
            }
        })
    }

    /// Decide the body: every meaningful child must be inline-level all the
    /// way down, and the full element must measure within the budget when
    /// rendered compactly.
    fn content_renders_inline(&mut self, id: NodeId, element: &'_ Element) -> bool {
        let arena = self.arena();
        let meaningful: Vec<NodeId> = element
            .children
            .iter()
            .copied()
            .filter(|&child| !is_whitespace_only(arena, child))
            .collect();

        if meaningful.is_empty() {
            return true;
        }
        if !meaningful.iter().all(|&child| is_inline_node(arena, child)) {
            return false;
        }
        if !all_children_inline(arena, &element.children) {
            return false;
        }

        let rendered = self.capture(|printer| printer.emit_element_inline(id));
        !rendered.contains('\n')
            && self.ctx.indent_width() + rendered.chars().count() <= self.ctx.max_width()
    }
}
