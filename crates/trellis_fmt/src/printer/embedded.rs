//! Embedded directive tags and control-flow groups.
//!
//! Normalizes whitespace inside directive delimiters and formats
//! control-flow groups (conditionals, iteration, block-with-terminator,
//! begin/rescue/ensure) by recursing into the printer for their bodies.
//! Inline mode handles the tags that appear inside opening tags and
//! attribute values, where spacing rules differ.

use trellis_ir::{NodeId, NodeKind};

use super::Printer;
use crate::classify::is_whitespace_only;

impl Printer<'_> {
    /// Print a directive tag at the current cursor position.
    ///
    /// Single-line content is trimmed and padded with exactly one space
    /// against each delimiter. Multi-line comments and statements expand
    /// marker-per-line with the body re-indented; heredoc content keeps its
    /// own lines and puts the closing delimiter on a fresh line.
    pub(crate) fn print_directive(&mut self, id: NodeId) {
        let arena = self.arena();
        let NodeKind::Directive(directive) = &arena.get(id).kind else {
            self.print_verbatim(id);
            return;
        };

        let open = directive.marker.open();
        let close = directive.marker.close();
        let trimmed = directive.content.trim();

        if trimmed.is_empty() {
            self.ctx.emit(open);
            self.ctx.emit_space();
            self.ctx.emit(close);
            return;
        }

        if starts_heredoc(trimmed) {
            self.ctx.emit(open);
            self.ctx.emit_space();
            self.ctx.emit_multiline(trimmed);
            if self.ctx.in_inline_mode() {
                self.ctx.emit_newline();
            } else {
                self.ctx.emit_newline_indent();
            }
            self.ctx.emit(close);
            return;
        }

        if trimmed.contains('\n') {
            self.emit_expanded_directive(open, trimmed, close);
            return;
        }

        self.ctx.emit(open);
        self.ctx.emit_space();
        self.ctx.emit(trimmed);
        self.ctx.emit_space();
        self.ctx.emit(close);
    }

    /// Marker-per-line expansion for multi-line comment and statement
    /// bodies, re-indented one level relative to the tag.
    fn emit_expanded_directive(&mut self, open: &str, trimmed: &str, close: &str) {
        self.ctx.emit(open);
        self.ctx.indent();
        for line in reindent_body(trimmed) {
            if line.is_empty() {
                self.ctx.emit_newline();
            } else {
                self.ctx.emit_newline_indent();
                self.ctx.emit(&line);
            }
        }
        self.ctx.dedent();
        self.ctx.emit_newline_indent();
        self.ctx.emit(close);
    }

    /// Print a control-flow group in block layout: opening tag, body one
    /// level deeper, secondary clauses at the opening tag's indent, then
    /// the terminator.
    pub(crate) fn print_control_flow(&mut self, id: NodeId) {
        let arena = self.arena();
        let NodeKind::ControlFlow(flow) = &arena.get(id).kind else {
            self.print_verbatim(id);
            return;
        };

        self.emit_flow_tag(&flow.opening);
        self.emit_flow_body(&flow.children);

        for clause in &flow.clauses {
            self.ctx.emit_newline_indent();
            self.emit_flow_tag(&clause.opening);
            self.emit_flow_body(&clause.children);
        }

        self.ctx.emit_newline_indent();
        self.emit_flow_tag("end");
    }

    /// Render a control-flow group for a single-line position: inside an
    /// opening tag or an attribute value. Tags and body go on one line.
    ///
    /// `spaced` pads the body with single spaces against the surrounding
    /// tags: required between attributes in an opening tag and between
    /// tokens in a token-list value, but not inside other attribute
    /// values, where an extra space would change the decoded text.
    pub(crate) fn render_control_flow_inline(&mut self, id: NodeId, spaced: bool) -> String {
        let arena = self.arena();
        let NodeKind::ControlFlow(flow) = &arena.get(id).kind else {
            return self.source_text(id).to_string();
        };

        let pad = if spaced { " " } else { "" };
        let mut out = String::new();

        out.push_str(&flow_tag(&flow.opening));
        push_padded(&mut out, &self.render_inline_flow_children(&flow.children), pad);

        for clause in &flow.clauses {
            out.push_str(&flow_tag(&clause.opening));
            push_padded(&mut out, &self.render_inline_flow_children(&clause.children), pad);
        }

        out.push_str(&flow_tag("end"));
        out
    }

    /// Render a control-flow body for inline mode: meaningful children
    /// joined by single spaces.
    fn render_inline_flow_children(&mut self, children: &[NodeId]) -> String {
        let arena = self.arena();
        let mut parts = Vec::new();

        for &child in children {
            if is_whitespace_only(arena, child) {
                continue;
            }
            let rendered = match &arena.get(child).kind {
                NodeKind::Text { content } => {
                    content.split_whitespace().collect::<Vec<_>>().join(" ")
                }
                NodeKind::Attribute(attr) => self.render_attribute_inline(attr),
                NodeKind::Directive(_) => {
                    self.capture(|printer| printer.print_directive(child))
                }
                NodeKind::Element(_) => {
                    self.capture(|printer| printer.emit_element_inline(child))
                }
                NodeKind::ControlFlow(_) => self.render_control_flow_inline(child, false),
                _ => self.source_text(child).to_string(),
            };
            if !rendered.is_empty() {
                parts.push(rendered);
            }
        }

        parts.join(" ")
    }

    /// Emit a control-flow tag: `<% opening %>`.
    fn emit_flow_tag(&mut self, opening: &str) {
        self.ctx.emit("<% ");
        self.ctx.emit(opening.trim());
        self.ctx.emit(" %>");
    }

    /// Emit a control-flow body one level deeper, or nothing for an empty
    /// body.
    fn emit_flow_body(&mut self, children: &[NodeId]) {
        let arena = self.arena();
        let has_content = children
            .iter()
            .any(|&child| !is_whitespace_only(arena, child));
        if !has_content {
            return;
        }
        self.ctx.indent();
        self.ctx.emit_newline();
        self.print_block_children(children);
        self.ctx.dedent();
    }
}

/// A control-flow tag as a string: `<% opening %>`.
fn flow_tag(opening: &str) -> String {
    format!("<% {} %>", opening.trim())
}

/// Append a body between padding separators, skipping empty bodies.
fn push_padded(out: &mut String, body: &str, pad: &str) {
    if !body.is_empty() {
        out.push_str(pad);
        out.push_str(body);
        out.push_str(pad);
    }
}

/// Whether directive content opens a multi-line raw-text (heredoc) region:
/// `<<~ID`, `<<-ID`, `<<"ID"`, `<<'ID'`, or bare `<<ID`. The body of such a
/// region is program data and must never be re-indented.
fn starts_heredoc(trimmed: &str) -> bool {
    let Some(rest) = trimmed.strip_prefix("<<") else {
        return false;
    };
    let rest = rest
        .strip_prefix('~')
        .or_else(|| rest.strip_prefix('-'))
        .unwrap_or(rest);
    rest.chars()
        .next()
        .is_some_and(|c| c == '"' || c == '\'' || c.is_ascii_uppercase() || c == '_')
}

/// Split a multi-line directive body into lines stripped of their minimum
/// common indentation, counted in whitespace characters. The first line is
/// already flush from the trim.
fn reindent_body(trimmed: &str) -> Vec<String> {
    let lines: Vec<&str> = trimmed.lines().collect();
    let min_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.trim_end().to_string()
            } else if line.trim().is_empty() {
                String::new()
            } else {
                strip_indent_columns(line, min_indent).trim_end().to_string()
            }
        })
        .collect()
}

/// Advance past up to `columns` leading whitespace characters. Splits on
/// character boundaries, so multi-byte whitespace in the indentation cannot
/// produce an out-of-boundary slice.
fn strip_indent_columns(line: &str, columns: usize) -> &str {
    let mut stripped = 0;
    for (i, c) in line.char_indices() {
        if stripped == columns || !c.is_whitespace() {
            return &line[i..];
        }
        stripped += 1;
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heredoc_detection() {
        assert!(starts_heredoc("<<~TEXT"));
        assert!(starts_heredoc("<<-SQL"));
        assert!(starts_heredoc("<<'SQL'"));
        assert!(starts_heredoc("<<\"EOS\""));
        assert!(starts_heredoc("<<EOF"));
        assert!(!starts_heredoc("value << item"));
        assert!(!starts_heredoc("<< shifted"));
        assert!(!starts_heredoc("<<1"));
    }

    #[test]
    fn reindent_strips_common_indentation() {
        let body = "first\n    indented\n      deeper\n    back";
        assert_eq!(
            reindent_body(body),
            vec!["first", "indented", "  deeper", "back"]
        );
    }

    #[test]
    fn reindent_strips_by_character_not_byte() {
        // U+00A0 is whitespace but two bytes wide in UTF-8.
        let body = "a\n b\n\u{a0}c";
        assert_eq!(reindent_body(body), vec!["a", "b", "c"]);
    }

    #[test]
    fn reindent_keeps_blank_lines_empty() {
        let body = "a\n\n  b";
        assert_eq!(reindent_body(body), vec!["a", "", "b"]);
    }

    #[test]
    fn flow_tag_trims_opening() {
        assert_eq!(flow_tag(" if x "), "<% if x %>");
    }
}
