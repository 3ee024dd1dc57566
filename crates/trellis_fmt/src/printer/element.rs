//! Element rendering.
//!
//! Emits markup elements in the layout their analysis selected: fully
//! inline, inline opening tag over a block body, or fully expanded.
//! Content-preserving elements get an inline opening tag and a verbatim
//! body via the identity printer.

use trellis_ir::{NodeId, NodeKind};

use super::Printer;
use crate::classify::{is_content_preserving, is_void_element, is_whitespace_only};

impl Printer<'_> {
    /// Print an element at the current cursor position.
    pub(crate) fn print_element(&mut self, id: NodeId) {
        let Some(element) = self.element_ref(id) else {
            self.print_verbatim(id);
            return;
        };

        if is_content_preserving(&element.tag_name) {
            self.print_preserved_element(id);
            return;
        }

        let analysis = self.analyze(id);

        if is_void_element(&element.tag_name) || element.self_closing {
            // Void and self-closing elements are just their opening tag.
            if analysis.open_tag_inline {
                self.emit_open_tag_inline(element);
            } else {
                self.emit_open_tag_expanded(element);
            }
            return;
        }

        if analysis.content_inline {
            self.emit_element_inline(id);
            return;
        }

        if analysis.open_tag_inline {
            self.emit_open_tag_inline(element);
        } else {
            self.emit_open_tag_expanded(element);
        }

        let arena = self.arena();
        let has_content = element
            .children
            .iter()
            .any(|&child| !is_whitespace_only(arena, child));

        if has_content {
            self.ctx.push_element(&element.tag_name);
            self.ctx.indent();
            self.ctx.emit_newline();
            self.print_block_children(&element.children);
            self.ctx.dedent();
            self.ctx.emit_newline_indent();
            self.ctx.pop_element();
        }

        self.emit_close_tag(&element.tag_name);
    }

    /// Emit an element compactly on the current line: opening tag, collapsed
    /// inline content, closing tag. Also the analyzer's measuring render.
    pub(crate) fn emit_element_inline(&mut self, id: NodeId) {
        let Some(element) = self.element_ref(id) else {
            self.print_verbatim(id);
            return;
        };

        self.emit_open_tag_inline(element);
        if is_void_element(&element.tag_name) || element.self_closing {
            return;
        }

        let children = &element.children;
        let saved = self.ctx.set_inline_mode(true);
        let body = self.render_children_inline(children);
        self.ctx.set_inline_mode(saved);
        if !body.is_empty() {
            self.ctx.emit_multiline(&body);
        }
        self.emit_close_tag(&element.tag_name);
    }

    /// Render a child run as collapsed single-line content, preserving one
    /// boundary space where the source had whitespace between children.
    pub(crate) fn render_children_inline(&mut self, children: &[NodeId]) -> String {
        let mut out = String::new();

        for &child in children {
            let arena = self.arena();
            match &arena.get(child).kind {
                NodeKind::Text { content } => {
                    if content.starts_with(char::is_whitespace) {
                        push_boundary_space(&mut out);
                    }
                    let collapsed: Vec<&str> = content.split_whitespace().collect();
                    out.push_str(&collapsed.join(" "));
                    if content.ends_with(char::is_whitespace) && !content.trim().is_empty() {
                        out.push(' ');
                    }
                }
                NodeKind::Whitespace { .. } => push_boundary_space(&mut out),
                NodeKind::Directive(_) => {
                    let rendered = self.capture(|printer| printer.print_directive(child));
                    out.push_str(&rendered);
                }
                NodeKind::Element(_) => {
                    let rendered = self.capture(|printer| printer.emit_element_inline(child));
                    out.push_str(&rendered);
                }
                NodeKind::ControlFlow(_) => {
                    let rendered = self.render_control_flow_inline(child, false);
                    out.push_str(&rendered);
                }
                // Comments and anything else keep their original bytes.
                _ => out.push_str(self.source_text(child)),
            }
        }

        out.trim().to_string()
    }

    /// Content-preserving elements: inline opening tag, byte-identical body.
    fn print_preserved_element(&mut self, id: NodeId) {
        let Some(element) = self.element_ref(id) else {
            self.print_verbatim(id);
            return;
        };

        self.emit_open_tag_inline(element);
        if element.self_closing {
            return;
        }
        let body = self.verbatim().print_inner(element);
        self.ctx.emit_multiline(body);
        if element.close_span.is_some() {
            self.emit_close_tag(&element.tag_name);
        }
    }

    /// Print a markup comment: collapsed to one line when its content is
    /// single-line, otherwise reproduced verbatim.
    pub(crate) fn print_comment(&mut self, id: NodeId) {
        let NodeKind::Comment { content } = &self.arena().get(id).kind else {
            self.print_verbatim(id);
            return;
        };

        if content.contains('\n') {
            self.print_verbatim(id);
            return;
        }

        let trimmed = content.trim();
        if trimmed.is_empty() {
            self.ctx.emit("<!-- -->");
        } else {
            self.ctx.emit("<!-- ");
            self.ctx.emit(trimmed);
            self.ctx.emit(" -->");
        }
    }

    /// Print a doctype: the html5 form is normalized, anything else is
    /// reproduced verbatim.
    pub(crate) fn print_doctype(&mut self, id: NodeId) {
        let NodeKind::Doctype { content } = &self.arena().get(id).kind else {
            self.print_verbatim(id);
            return;
        };

        if content.trim().eq_ignore_ascii_case("html") {
            self.ctx.emit("<!DOCTYPE html>");
        } else {
            self.print_verbatim(id);
        }
    }

    fn emit_close_tag(&mut self, tag_name: &str) {
        self.ctx.emit("</");
        self.ctx.emit(tag_name);
        self.ctx.emit(">");
    }
}

/// Append a single boundary space unless one is already pending or the
/// buffer is empty (leading whitespace is dropped).
fn push_boundary_space(out: &mut String) {
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
}
