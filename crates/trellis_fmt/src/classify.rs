//! Classification helpers.
//!
//! Pure predicates over node shape, consumed by every other part of the
//! engine. No state, no error conditions; these only return booleans and
//! indices.

use trellis_ir::{NodeArena, NodeId, NodeKind};

/// Elements rendered inline by default. Sorted for binary search.
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "button", "cite", "code", "data", "dfn", "em", "i",
    "img", "input", "kbd", "label", "mark", "output", "q", "rp", "rt", "ruby", "s", "samp",
    "small", "span", "strong", "sub", "sup", "time", "u", "var", "wbr",
];

/// Elements with no closing tag. Sorted for binary search.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose body must be reproduced byte-for-byte.
const CONTENT_PRESERVING_ELEMENTS: &[&str] = &["pre", "script", "style", "textarea"];

/// Attributes whose value is a space-separated token list.
const TOKEN_LIST_ATTRIBUTES: &[&str] = &["class", "rel"];

/// Check if a tag renders inline by default (phrasing content).
pub fn is_inline_element(tag_name: &str) -> bool {
    INLINE_ELEMENTS.binary_search(&tag_name).is_ok()
}

/// Check if a tag is a void element (no closing tag, ever).
pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.binary_search(&tag_name).is_ok()
}

/// Check if an element's body must be reproduced byte-for-byte.
pub fn is_content_preserving(tag_name: &str) -> bool {
    CONTENT_PRESERVING_ELEMENTS.contains(&tag_name)
}

/// Check if an attribute value is a space-separated token list.
pub fn is_token_list_attribute(name: &str) -> bool {
    TOKEN_LIST_ATTRIBUTES.contains(&name)
}

/// Check if a node carries no meaningful content: a whitespace run, or a
/// text node that is entirely whitespace.
pub fn is_whitespace_only(arena: &NodeArena, id: NodeId) -> bool {
    match &arena.get(id).kind {
        NodeKind::Whitespace { .. } => true,
        NodeKind::Text { content } => content.trim().is_empty(),
        _ => false,
    }
}

/// Check if a node is an embedded directive tag.
pub fn is_directive(arena: &NodeArena, id: NodeId) -> bool {
    matches!(arena.get(id).kind, NodeKind::Directive(_))
}

/// Check if a node is an embedded control-flow group.
pub fn is_control_flow(arena: &NodeArena, id: NodeId) -> bool {
    matches!(arena.get(id).kind, NodeKind::ControlFlow(_))
}

/// Check if a node can participate in text flow: text, a directive tag, or
/// an inline-level element. Control-flow groups and block elements cannot.
pub fn is_inline_node(arena: &NodeArena, id: NodeId) -> bool {
    match &arena.get(id).kind {
        NodeKind::Text { .. } | NodeKind::Whitespace { .. } | NodeKind::Directive(_) => true,
        NodeKind::Element(element) => is_inline_element(&element.tag_name),
        _ => false,
    }
}

/// Index of the nearest preceding sibling that is not whitespace-only.
pub fn previous_meaningful_sibling(
    arena: &NodeArena,
    siblings: &[NodeId],
    i: usize,
) -> Option<usize> {
    siblings[..i]
        .iter()
        .rposition(|&id| !is_whitespace_only(arena, id))
}

/// Check if every node in a subtree is inline-level, recursively.
///
/// Whitespace-only nodes are skipped; a single block-level descendant
/// makes the whole run non-inline.
pub fn all_children_inline(arena: &NodeArena, children: &[NodeId]) -> bool {
    children.iter().all(|&id| {
        if is_whitespace_only(arena, id) {
            return true;
        }
        is_inline_node(arena, id) && all_children_inline(arena, arena.get(id).children())
    })
}

/// Check if a sibling run mixes meaningful text with inline elements or
/// directive tags.
pub fn mixed_text_and_inline(arena: &NodeArena, children: &[NodeId]) -> bool {
    let mut has_text = false;
    let mut has_inline = false;
    for &id in children {
        match &arena.get(id).kind {
            NodeKind::Text { content } if !content.trim().is_empty() => has_text = true,
            NodeKind::Directive(_) => has_inline = true,
            NodeKind::Element(element) if is_inline_element(&element.tag_name) => {
                has_inline = true;
            }
            _ => {}
        }
    }
    has_text && has_inline
}
