//! Text flow and block-sibling spacing.
//!
//! A sibling run mixing free text with inline elements and directive tags
//! is converted into [`ContentUnit`]s, then greedily packed into lines
//! within the column budget. Units are never split; glued units (no
//! whitespace in the source between them) and non-wrappable units stay on
//! their line even past the budget.
//!
//! Block-level siblings go through the spacing heuristic instead: a blank
//! line separates them when the source had one, when either sibling
//! rendered multi-line, or after a doctype. Comments attach to what
//! follows them.

use trellis_ir::{DirectiveMarker, NodeId, NodeKind};

use super::Printer;
use crate::classify::is_inline_node;
use crate::ignore::DISABLE_MARKER;

/// What a content unit is, for spacing and wrapping decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnitKind {
    /// A single word of free text.
    Text,
    /// An already-rendered atomic fragment: an inline element or a
    /// directive tag.
    Inline,
    /// A fragment that cannot participate in wrapping at all.
    Block,
}

/// One renderable atom of a sibling run. Built fresh per run, never cached.
#[derive(Debug, Clone)]
pub(crate) struct ContentUnit {
    pub(crate) text: String,
    pub(crate) kind: UnitKind,
    /// The source had no whitespace between this unit and the previous one.
    pub(crate) glue_prev: bool,
    /// The rendering spans multiple lines; it flushes the pending line and
    /// is emitted on its own, never merged into a wrapped line.
    pub(crate) breaks_flow: bool,
    /// Must stay on the current line regardless of width.
    pub(crate) non_wrappable: bool,
}

/// One grouped child of a block body: either a run of flowing inline
/// content or a single block-level node.
enum Item {
    Run(Vec<NodeId>),
    Block(NodeId),
}

/// A pre-rendered item, with the facts the spacing heuristic consumes.
struct RenderedItem {
    text: String,
    multiline: bool,
    /// Newlines in the source whitespace before this item.
    gap_before: usize,
    is_run: bool,
    is_comment: bool,
    is_doctype: bool,
}

impl Printer<'_> {
    /// Print a block body: group children into flow runs and block items,
    /// pre-render each to learn its boundary flag, then emit them with
    /// blank lines per the spacing heuristic.
    ///
    /// The cursor is expected at column 0; each item is emitted behind
    /// fresh indentation and no trailing newline.
    pub(crate) fn print_block_children(&mut self, children: &[NodeId]) {
        let items = self.group_items(children);

        let mut rendered = Vec::with_capacity(items.len());
        for (item, gap_before) in &items {
            let text = self.capture(|printer| printer.print_item(item));
            rendered.push(RenderedItem {
                multiline: text.contains('\n'),
                text,
                gap_before: *gap_before,
                is_run: matches!(item, Item::Run(_)),
                is_comment: self.item_is(item, |kind| matches!(kind, NodeKind::Comment { .. })),
                is_doctype: self.item_is(item, |kind| matches!(kind, NodeKind::Doctype { .. })),
            });
        }

        for (i, item) in rendered.iter().enumerate() {
            if i == 0 {
                self.ctx.emit_indent();
            } else {
                if wants_blank_line(&rendered[i - 1], item) {
                    self.ctx.emit_newline();
                }
                self.ctx.emit_newline_indent();
            }
            self.ctx.emit_multiline(&item.text);
        }
    }

    /// Group a child list into items, accumulating the newline count of
    /// inter-item whitespace. A blank line inside a flow run splits it, so
    /// the user's paragraph break survives.
    fn group_items(&self, children: &[NodeId]) -> Vec<(Item, usize)> {
        let arena = self.arena();
        let mut items = Vec::new();
        let mut run: Vec<NodeId> = Vec::new();
        let mut run_gap = 0;
        let mut pending_ws: Vec<NodeId> = Vec::new();
        let mut gap = 0;

        for &child in children {
            if crate::classify::is_whitespace_only(arena, child) {
                gap += newline_count(arena, child);
                pending_ws.push(child);
                continue;
            }

            if is_inline_node(arena, child) {
                if run.is_empty() {
                    run_gap = gap;
                } else if gap >= 2 {
                    items.push((Item::Run(std::mem::take(&mut run)), run_gap));
                    run_gap = gap;
                } else {
                    run.append(&mut pending_ws);
                }
                run.push(child);
            } else {
                if !run.is_empty() {
                    items.push((Item::Run(std::mem::take(&mut run)), run_gap));
                }
                items.push((Item::Block(child), gap));
            }
            pending_ws.clear();
            gap = 0;
        }

        if !run.is_empty() {
            items.push((Item::Run(run), run_gap));
        }
        items
    }

    fn print_item(&mut self, item: &Item) {
        match item {
            Item::Run(nodes) => {
                let lines = self.flow_run(nodes);
                self.emit_flow_lines(&lines);
            }
            Item::Block(id) => self.print_node(*id),
        }
    }

    fn item_is(&self, item: &Item, pred: impl Fn(&NodeKind) -> bool) -> bool {
        match item {
            Item::Block(id) => pred(&self.arena().get(*id).kind),
            Item::Run(_) => false,
        }
    }

    /// Flow a sibling run into output lines within the column budget.
    ///
    /// Each returned entry is one line's content without leading indent; an
    /// entry holding a multi-line sub-render keeps its embedded newlines
    /// (its continuation lines already carry their own indentation).
    pub(crate) fn flow_run(&mut self, nodes: &[NodeId]) -> Vec<String> {
        let units = self.collect_units(nodes);
        self.wrap_units(&units)
    }

    /// Convert a sibling run into content units, pre-rendering inline
    /// elements and directive tags through the full pipeline.
    fn collect_units(&mut self, nodes: &[NodeId]) -> Vec<ContentUnit> {
        let mut units = Vec::new();
        // No whitespace seen since the last unit.
        let mut adjacent = false;

        for &id in nodes {
            let arena = self.arena();
            match &arena.get(id).kind {
                NodeKind::Whitespace { .. } => adjacent = false,
                NodeKind::Text { content } => {
                    if content.trim().is_empty() {
                        adjacent = false;
                        continue;
                    }
                    let glue_first = adjacent && !content.starts_with(char::is_whitespace);
                    for (i, word) in content.split_whitespace().enumerate() {
                        units.push(ContentUnit {
                            text: word.to_string(),
                            kind: UnitKind::Text,
                            glue_prev: i == 0 && glue_first,
                            breaks_flow: false,
                            non_wrappable: false,
                        });
                    }
                    adjacent = !content.ends_with(char::is_whitespace);
                }
                NodeKind::Directive(directive) => {
                    let non_wrappable = directive.marker == DirectiveMarker::Comment
                        && directive.content.contains(DISABLE_MARKER);
                    let text = self.capture(|printer| printer.print_directive(id));
                    units.push(ContentUnit {
                        breaks_flow: text.contains('\n'),
                        text,
                        kind: UnitKind::Inline,
                        glue_prev: adjacent,
                        non_wrappable,
                    });
                    adjacent = true;
                }
                NodeKind::Element(_) => {
                    let text = self.capture(|printer| printer.print_element(id));
                    units.push(ContentUnit {
                        breaks_flow: text.contains('\n'),
                        text,
                        kind: UnitKind::Inline,
                        glue_prev: adjacent,
                        non_wrappable: false,
                    });
                    adjacent = true;
                }
                _ => {
                    let text = self.capture(|printer| printer.print_node(id));
                    units.push(ContentUnit {
                        text,
                        kind: UnitKind::Block,
                        glue_prev: false,
                        breaks_flow: true,
                        non_wrappable: false,
                    });
                    adjacent = false;
                }
            }
        }

        units
    }

    /// Greedily pack units into lines of at most `max_width - indent`
    /// characters. A unit is never split; a flow-breaking unit flushes the
    /// pending line and stands alone.
    fn wrap_units(&self, units: &[ContentUnit]) -> Vec<String> {
        let budget = self
            .ctx
            .max_width()
            .saturating_sub(self.ctx.indent_width());
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut prev: Option<&ContentUnit> = None;

        for unit in units {
            if unit.breaks_flow {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(unit.text.clone());
                prev = None;
                continue;
            }

            let Some(previous) = prev else {
                current.push_str(&unit.text);
                prev = Some(unit);
                continue;
            };

            let space = needs_space_between(previous, unit);
            let width = current.chars().count()
                + usize::from(space)
                + unit.text.chars().count();
            if width <= budget || unit.non_wrappable || unit.glue_prev {
                if space {
                    current.push(' ');
                }
                current.push_str(&unit.text);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(&unit.text);
            }
            prev = Some(unit);
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Emit flowed lines at the current cursor, breaking to fresh indent
    /// between them.
    pub(crate) fn emit_flow_lines(&mut self, lines: &[String]) {
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.ctx.emit_newline_indent();
            }
            self.ctx.emit_multiline(line);
        }
    }
}

/// Punctuation that glues to the preceding unit.
const CLOSING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}'];

/// Punctuation that glues to the following unit.
const OPENING_PUNCTUATION: &[char] = &['(', '[', '{'];

/// Whether a join space belongs between two adjacent units on a line.
///
/// Suppressed for source-glued units, before closing punctuation, after
/// opening punctuation, and between a bare symbol and the tag it prefixes.
fn needs_space_between(prev: &ContentUnit, next: &ContentUnit) -> bool {
    if next.glue_prev {
        return false;
    }
    if next
        .text
        .chars()
        .next()
        .is_some_and(|c| CLOSING_PUNCTUATION.contains(&c))
    {
        return false;
    }
    if prev
        .text
        .chars()
        .last()
        .is_some_and(|c| OPENING_PUNCTUATION.contains(&c))
    {
        return false;
    }
    if prev.kind == UnitKind::Text
        && next.kind == UnitKind::Inline
        && next.text.starts_with('<')
        && is_bare_symbol(&prev.text)
    {
        return false;
    }
    true
}

/// A single-character non-alphanumeric token, e.g. a currency or reference
/// sigil directly prefixing a tag.
fn is_bare_symbol(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => !c.is_alphanumeric(),
        _ => false,
    }
}

/// Whether a blank line belongs between two rendered block items.
///
/// A source blank line always survives (as exactly one). A doctype is
/// always followed by one. A comment attaches to the item after it unless
/// both span multiple lines. Flow runs never get heuristic blanks; block
/// pairs get one when either rendered multi-line.
fn wants_blank_line(prev: &RenderedItem, next: &RenderedItem) -> bool {
    if next.gap_before >= 2 {
        return true;
    }
    if prev.is_doctype {
        return true;
    }
    if prev.is_comment {
        return !next.is_comment && prev.multiline && next.multiline;
    }
    if prev.is_run || next.is_run {
        return false;
    }
    prev.multiline || next.multiline
}

/// Newlines carried by a whitespace-only node.
fn newline_count(arena: &trellis_ir::NodeArena, id: NodeId) -> usize {
    match &arena.get(id).kind {
        NodeKind::Whitespace { content } | NodeKind::Text { content } => {
            content.matches('\n').count()
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> ContentUnit {
        ContentUnit {
            text: text.to_string(),
            kind: UnitKind::Text,
            glue_prev: false,
            breaks_flow: false,
            non_wrappable: false,
        }
    }

    fn inline(text: &str) -> ContentUnit {
        ContentUnit {
            text: text.to_string(),
            kind: UnitKind::Inline,
            glue_prev: false,
            breaks_flow: false,
            non_wrappable: false,
        }
    }

    #[test]
    fn space_between_plain_words() {
        assert!(needs_space_between(&word("hello"), &word("world")));
    }

    #[test]
    fn no_space_before_closing_punctuation() {
        assert!(!needs_space_between(&inline("</a>"), &word(".")));
        assert!(!needs_space_between(&word("end"), &word(", next")));
    }

    #[test]
    fn no_space_after_opening_punctuation() {
        assert!(!needs_space_between(&word("("), &word("note")));
    }

    #[test]
    fn no_space_between_symbol_and_tag() {
        assert!(!needs_space_between(&word("$"), &inline("<span>5</span>")));
        assert!(needs_space_between(&word("a"), &inline("<span>x</span>")));
    }

    #[test]
    fn glued_units_never_spaced() {
        let mut next = inline("<b>x</b>");
        next.glue_prev = true;
        assert!(!needs_space_between(&word("foo"), &next));
    }

    #[test]
    fn bare_symbol_detection() {
        assert!(is_bare_symbol("$"));
        assert!(is_bare_symbol("#"));
        assert!(!is_bare_symbol("a"));
        assert!(!is_bare_symbol("$$"));
        assert!(!is_bare_symbol(""));
    }
}
