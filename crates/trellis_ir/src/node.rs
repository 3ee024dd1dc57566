//! Node types for parsed template documents.
//!
//! A document mixes static markup with embedded directive tags (`<% %>`,
//! `<%= %>`, `<%# %>`). The parser produces a closed sum type over every
//! construct it recognizes; the formatter matches on it exhaustively, so
//! adding a node kind is a compile-time-checked change.
//!
//! Nodes are stored in a flat arena (see [`crate::arena::NodeArena`]) and
//! refer to each other by [`NodeId`]. The tree is read-only after parsing:
//! the formatter borrows it and re-emits derived text, never mutating.

use crate::node_id::NodeId;
use crate::span::Span;

/// A single node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    /// Create a new node.
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }

    /// Direct children of this node, if it is a container.
    ///
    /// Clause bodies of control-flow nodes are not included; callers that
    /// need them walk [`ControlFlow::clauses`] explicitly.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Document { children } => children,
            NodeKind::Element(element) => &element.children,
            NodeKind::ControlFlow(flow) => &flow.children,
            NodeKind::Attribute(_)
            | NodeKind::Text { .. }
            | NodeKind::Whitespace { .. }
            | NodeKind::Comment { .. }
            | NodeKind::Doctype { .. }
            | NodeKind::Directive(_) => &[],
        }
    }
}

/// Closed sum type over every node kind the parser produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root.
    Document { children: Vec<NodeId> },

    /// Markup element, e.g. `<div class="x">...</div>`.
    Element(Element),

    /// Attribute inside an opening tag. Attributes are arena nodes so that
    /// directive tags and control-flow groups can appear between them in an
    /// opening tag (`<div <% if x %>class="y"<% end %>>`).
    Attribute(Attribute),

    /// Text run. `content` is the raw source text, whitespace included.
    Text { content: String },

    /// Whitespace-only run between tokens. Carried verbatim when whitespace
    /// tracking is enabled; the blank-line source of truth for spacing.
    Whitespace { content: String },

    /// Markup comment, e.g. `<!-- note -->`. `content` is the inner text.
    Comment { content: String },

    /// Doctype declaration. `content` is the text after `<!DOCTYPE`.
    Doctype { content: String },

    /// Embedded directive tag, e.g. `<%= user.name %>`.
    Directive(Directive),

    /// Embedded control-flow group: opening tag, body, secondary clauses,
    /// and an implied `<% end %>` terminator.
    ControlFlow(ControlFlow),
}

/// A markup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name as written, e.g. `div`.
    pub tag_name: String,
    /// Opening-tag entries: `Attribute`, `Directive`, or `ControlFlow` nodes.
    pub attrs: Vec<NodeId>,
    /// Body children. Empty for void and self-closing elements.
    pub children: Vec<NodeId>,
    /// Span of the opening tag, `<` through `>` inclusive.
    pub open_span: Span,
    /// Span of the closing tag, when one exists.
    pub close_span: Option<Span>,
    /// Whether the source used XML-style self-closing syntax (`<br />`).
    pub self_closing: bool,
}

impl Element {
    /// Span of the element body: between the opening and closing tags.
    ///
    /// `None` when there is no closing tag (void or self-closing element).
    pub fn body_span(&self) -> Option<Span> {
        self.close_span
            .map(|close| Span::new(self.open_span.end, close.start))
    }
}

/// Quoting style of an attribute value as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Double,
    Single,
    Unquoted,
}

impl QuoteKind {
    /// The quote character, if any.
    pub fn char(self) -> Option<char> {
        match self {
            QuoteKind::Double => Some('"'),
            QuoteKind::Single => Some('\''),
            QuoteKind::Unquoted => None,
        }
    }
}

/// One segment of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuePart {
    /// Literal text.
    Static(String),
    /// Embedded directive or control-flow node.
    Directive(NodeId),
}

/// An attribute value: quoting style plus literal/directive segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrValue {
    pub quote: QuoteKind,
    pub parts: Vec<ValuePart>,
}

impl AttrValue {
    /// Value consisting of a single literal segment.
    pub fn literal(quote: QuoteKind, text: impl Into<String>) -> Self {
        AttrValue {
            quote,
            parts: vec![ValuePart::Static(text.into())],
        }
    }

    /// Whether any segment is an embedded directive.
    pub fn has_directive(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, ValuePart::Directive(_)))
    }

    /// Whether any literal segment spans multiple source lines.
    pub fn is_multiline(&self) -> bool {
        self.parts.iter().any(|part| match part {
            ValuePart::Static(text) => text.contains('\n'),
            ValuePart::Directive(_) => false,
        })
    }
}

/// An attribute: a name and an optional value.
///
/// Boolean attributes (`disabled`, `checked`) have no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<AttrValue>,
}

/// Delimiter style of a directive tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveMarker {
    /// `<% ... %>` - statement, no output.
    Statement,
    /// `<%= ... %>` - expression, output interpolated.
    Expression,
    /// `<%# ... %>` - comment, never evaluated.
    Comment,
}

impl DirectiveMarker {
    /// Opening delimiter as written.
    pub fn open(self) -> &'static str {
        match self {
            DirectiveMarker::Statement => "<%",
            DirectiveMarker::Expression => "<%=",
            DirectiveMarker::Comment => "<%#",
        }
    }

    /// Closing delimiter.
    pub fn close(self) -> &'static str {
        "%>"
    }
}

/// An embedded directive tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub marker: DirectiveMarker,
    /// Raw inner content between the delimiters, untrimmed.
    pub content: String,
}

impl Directive {
    /// Whether the trimmed content spans multiple lines.
    pub fn is_multiline(&self) -> bool {
        self.content.trim().contains('\n')
    }
}

/// The shape of an embedded control-flow group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlowKind {
    /// `if` / `elsif` / `else`.
    If,
    /// `unless` / `else`.
    Unless,
    /// `case` / `when` / `else`.
    Case,
    /// `for`, `while`, `until`, or an `.each do` iteration.
    Loop,
    /// Any other `do ... end` block-with-terminator.
    Block,
    /// `begin` / `rescue` / `ensure`.
    Begin,
}

/// A secondary clause of a control-flow group: `else`, `elsif`, `when`,
/// `rescue`, or `ensure`, with its own body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Inner text of the clause tag, e.g. `elsif user.admin?`.
    pub opening: String,
    pub children: Vec<NodeId>,
    pub span: Span,
}

/// An embedded control-flow group.
///
/// Uniform over conditionals, iteration, block-with-terminator, and
/// structured exception handling: an opening tag, a primary body, zero or
/// more secondary clauses, and an implied `<% end %>` terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlFlow {
    pub kind: ControlFlowKind,
    /// Inner text of the opening tag, e.g. `if user.admin?`.
    pub opening: String,
    pub children: Vec<NodeId>,
    pub clauses: Vec<Clause>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_marker_delimiters() {
        assert_eq!(DirectiveMarker::Statement.open(), "<%");
        assert_eq!(DirectiveMarker::Expression.open(), "<%=");
        assert_eq!(DirectiveMarker::Comment.open(), "<%#");
        assert_eq!(DirectiveMarker::Statement.close(), "%>");
    }

    #[test]
    fn attr_value_literal() {
        let value = AttrValue::literal(QuoteKind::Double, "btn btn-primary");
        assert!(!value.has_directive());
        assert!(!value.is_multiline());
    }

    #[test]
    fn attr_value_multiline() {
        let value = AttrValue::literal(QuoteKind::Double, "a\nb");
        assert!(value.is_multiline());
    }

    #[test]
    fn attr_value_with_directive() {
        let value = AttrValue {
            quote: QuoteKind::Double,
            parts: vec![
                ValuePart::Static("btn ".into()),
                ValuePart::Directive(NodeId::new(7)),
            ],
        };
        assert!(value.has_directive());
    }

    #[test]
    fn element_body_span() {
        let element = Element {
            tag_name: "div".into(),
            attrs: vec![],
            children: vec![],
            open_span: Span::new(0, 5),
            close_span: Some(Span::new(11, 17)),
            self_closing: false,
        };
        assert_eq!(element.body_span(), Some(Span::new(5, 11)));
    }

    #[test]
    fn directive_multiline() {
        let single = Directive {
            marker: DirectiveMarker::Expression,
            content: "  user.name  ".into(),
        };
        assert!(!single.is_multiline());

        let multi = Directive {
            marker: DirectiveMarker::Statement,
            content: "x = 1\ny = 2".into(),
        };
        assert!(multi.is_multiline());
    }
}
