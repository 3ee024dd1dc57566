//! Attribute formatting.
//!
//! Renders opening tags either inline (attributes space-separated on one
//! line) or expanded (one attribute per line). Covers quote normalization
//! and the greedy wrapping of long token-list values (`class`, `rel`).

use trellis_ir::{AttrValue, Attribute, Element, NodeId, NodeKind, QuoteKind, ValuePart};

use super::Printer;
use crate::classify::is_token_list_attribute;
use crate::ignore::DISABLE_MARKER;

impl Printer<'_> {
    /// Emit an opening tag on one line: `<name attr="v" attr2>`.
    pub(crate) fn emit_open_tag_inline(&mut self, element: &Element) {
        self.ctx.emit("<");
        self.ctx.emit(&element.tag_name);
        for &entry in &element.attrs {
            let rendered = self.render_attr_entry_inline(entry);
            self.ctx.emit_space();
            self.ctx.emit_multiline(&rendered);
        }
        if element.self_closing {
            self.ctx.emit(" />");
        } else {
            self.ctx.emit(">");
        }
    }

    /// Emit an opening tag expanded: each attribute on its own indented
    /// line, then the tag-close character at the tag's own indent.
    ///
    /// Suppression directive comments stay on the opening line so they keep
    /// applying to it.
    pub(crate) fn emit_open_tag_expanded(&mut self, element: &Element) {
        self.ctx.emit("<");
        self.ctx.emit(&element.tag_name);

        if element.attrs.is_empty() {
            if element.self_closing {
                self.ctx.emit(" />");
            } else {
                self.ctx.emit(">");
            }
            return;
        }

        let (pinned, expanded): (Vec<NodeId>, Vec<NodeId>) = element
            .attrs
            .iter()
            .copied()
            .partition(|&entry| self.is_suppression_comment(entry));

        for entry in pinned {
            let rendered = self.render_attr_entry_inline(entry);
            self.ctx.emit_space();
            self.ctx.emit_multiline(&rendered);
        }

        self.ctx.indent();
        for entry in expanded {
            self.ctx.emit_newline_indent();
            self.emit_attr_entry_expanded(entry);
        }
        self.ctx.dedent();
        self.ctx.emit_newline_indent();
        if element.self_closing {
            self.ctx.emit("/>");
        } else {
            self.ctx.emit(">");
        }
    }

    /// Render one opening-tag entry for a single-line position.
    pub(crate) fn render_attr_entry_inline(&mut self, entry: NodeId) -> String {
        let arena = self.arena();
        match &arena.get(entry).kind {
            NodeKind::Attribute(attr) => self.render_attribute_inline(attr),
            NodeKind::Directive(_) => self.capture(|printer| printer.print_directive(entry)),
            NodeKind::ControlFlow(_) => self.render_control_flow_inline(entry, true),
            _ => self.source_text(entry).to_string(),
        }
    }

    /// Emit one opening-tag entry on its own line in expanded mode,
    /// wrapping long token-list values.
    fn emit_attr_entry_expanded(&mut self, entry: NodeId) {
        let arena = self.arena();
        match &arena.get(entry).kind {
            NodeKind::Attribute(attr) => {
                if let Some(value) = &attr.value {
                    if self.should_wrap_token_list(&attr.name, value) {
                        self.emit_wrapped_token_list(attr);
                        return;
                    }
                }
                let rendered = self.render_attribute_inline(attr);
                self.ctx.emit_multiline(&rendered);
            }
            NodeKind::Directive(_) => self.print_directive(entry),
            NodeKind::ControlFlow(_) => self.print_control_flow(entry),
            _ => self.print_verbatim(entry),
        }
    }

    /// Render `name` or `name="value"` with normalized quoting.
    pub(crate) fn render_attribute_inline(&mut self, attr: &Attribute) -> String {
        let Some(value) = &attr.value else {
            return attr.name.clone();
        };

        let text = self.render_attr_value(&attr.name, value);
        match normalized_quote(value.quote, &text) {
            QuoteKind::Double => format!("{}=\"{}\"", attr.name, text),
            QuoteKind::Single => format!("{}='{}'", attr.name, text),
            QuoteKind::Unquoted => format!("{}={}", attr.name, text),
        }
    }

    /// Render an attribute value's segments, with the attribute name
    /// recorded in the context so nested directive tags can detect
    /// token-list positions.
    fn render_attr_value(&mut self, name: &str, value: &AttrValue) -> String {
        let saved = self.ctx.set_current_attribute(Some(name.to_string()));
        let token_list = is_token_list_attribute(name);
        let mut out = String::new();

        for part in &value.parts {
            match part {
                ValuePart::Static(text) => {
                    if token_list {
                        out.push_str(&collapse_whitespace(text));
                    } else {
                        out.push_str(text);
                    }
                }
                ValuePart::Directive(id) => {
                    let arena = self.arena();
                    let rendered = match &arena.get(*id).kind {
                        NodeKind::ControlFlow(_) => {
                            self.render_control_flow_inline(*id, token_list)
                        }
                        _ => self.capture(|printer| printer.print_directive(*id)),
                    };
                    out.push_str(&rendered);
                }
            }
        }

        self.ctx.set_current_attribute(saved);
        if token_list {
            out.trim().to_string()
        } else {
            out
        }
    }

    /// A token-list value wraps when its single-line rendering overflows
    /// the budget at the current indent and it embeds no directive tag
    /// (tag boundaries cannot be safely split).
    fn should_wrap_token_list(&mut self, name: &str, value: &AttrValue) -> bool {
        if !is_token_list_attribute(name) || value.has_directive() {
            return false;
        }
        let text = self.render_attr_value(name, value);
        let line_len = self.ctx.indent_width() + name.len() + "=\"\"".len() + text.chars().count();
        line_len > self.ctx.max_width()
    }

    /// Emit a wrapped token-list attribute: the quotes open and close on
    /// their own lines, tokens greedily packed one level deeper.
    ///
    /// ```text
    /// class="
    ///   btn btn-primary btn-lg
    ///   rounded shadow
    /// "
    /// ```
    fn emit_wrapped_token_list(&mut self, attr: &Attribute) {
        let Some(value) = &attr.value else {
            self.ctx.emit(&attr.name);
            return;
        };
        let text = self.render_attr_value(&attr.name, value);

        self.ctx.emit(&attr.name);
        self.ctx.emit("=\"");
        self.ctx.indent();
        let budget = self.ctx.max_width().saturating_sub(self.ctx.indent_width());
        for line in pack_tokens(&text, budget) {
            self.ctx.emit_newline_indent();
            self.ctx.emit(&line);
        }
        self.ctx.dedent();
        self.ctx.emit_newline_indent();
        self.ctx.emit("\"");
    }

    /// Whether an opening-tag entry is a suppression directive comment that
    /// must stay on the opening line.
    fn is_suppression_comment(&self, entry: NodeId) -> bool {
        match &self.arena().get(entry).kind {
            NodeKind::Directive(directive) => {
                directive.marker == trellis_ir::DirectiveMarker::Comment
                    && directive.content.contains(DISABLE_MARKER)
            }
            _ => false,
        }
    }
}

/// Normalize quote style: unquoted and single-quoted values are rewritten
/// to double quotes unless the value itself contains a double quote, in
/// which case the original quoting is preserved.
fn normalized_quote(original: QuoteKind, text: &str) -> QuoteKind {
    if text.contains('"') {
        original
    } else {
        QuoteKind::Double
    }
}

/// Collapse whitespace runs to single spaces, preserving single boundary
/// spaces where the input had leading or trailing whitespace.
fn collapse_whitespace(text: &str) -> String {
    let collapsed: Vec<&str> = text.split_whitespace().collect();
    let mut out = String::new();
    if text.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(&collapsed.join(" "));
    if text.ends_with(char::is_whitespace) && !text.trim().is_empty() {
        out.push(' ');
    }
    out
}

/// Greedily pack whitespace-separated tokens into lines of at most
/// `budget` characters. A single token longer than the budget gets its own
/// line; tokens are never split.
fn pack_tokens(text: &str, budget: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for token in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(token);
        } else if current.chars().count() + 1 + token.chars().count() <= budget {
            current.push(' ');
            current.push_str(token);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(token);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_normalization_prefers_double() {
        assert_eq!(normalized_quote(QuoteKind::Single, "plain"), QuoteKind::Double);
        assert_eq!(normalized_quote(QuoteKind::Unquoted, "plain"), QuoteKind::Double);
        assert_eq!(normalized_quote(QuoteKind::Double, "plain"), QuoteKind::Double);
    }

    #[test]
    fn quote_normalization_keeps_original_around_double_quotes() {
        assert_eq!(
            normalized_quote(QuoteKind::Single, "say \"hi\""),
            QuoteKind::Single
        );
    }

    #[test]
    fn collapse_whitespace_preserves_boundaries() {
        assert_eq!(collapse_whitespace("a   b"), "a b");
        assert_eq!(collapse_whitespace("  a b  "), " a b ");
        assert_eq!(collapse_whitespace("a\n  b"), "a b");
    }

    #[test]
    fn pack_tokens_respects_budget() {
        let lines = pack_tokens("aa bb cc dd", 5);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn pack_tokens_preserves_order() {
        let text = "one two three four five six";
        let joined = pack_tokens(text, 10).join(" ");
        assert_eq!(joined, text);
    }

    #[test]
    fn pack_tokens_oversized_token_gets_own_line() {
        let lines = pack_tokens("short absurdly-long-token x", 10);
        assert_eq!(lines, vec!["short", "absurdly-long-token", "x"]);
    }
}
