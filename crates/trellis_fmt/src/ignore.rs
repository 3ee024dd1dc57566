//! Skip-directive predicate.
//!
//! A document can opt out of formatting with a leading
//! `trellis:disable` comment, either as a markup comment
//! (`<!-- trellis:disable -->`) or a directive comment
//! (`<%# trellis:disable %>`). The caller consults [`should_skip`] before
//! invoking the engine and returns the original source unchanged when it
//! holds; the engine itself never checks it.

use trellis_ir::{DirectiveMarker, NodeArena, NodeKind};

/// The in-document marker that disables formatting for a whole file.
pub const DISABLE_MARKER: &str = "trellis:disable";

/// Check whether a parsed document opts out of formatting.
///
/// Only comments before the first meaningful node count; a disable marker
/// further down the document does not suppress formatting.
pub fn should_skip(arena: &NodeArena) -> bool {
    let root = arena.root();
    if !root.is_valid() {
        return false;
    }

    for &child in arena.get(root).children() {
        match &arena.get(child).kind {
            NodeKind::Comment { content } => {
                if content.contains(DISABLE_MARKER) {
                    return true;
                }
                return false;
            }
            NodeKind::Directive(directive) => {
                if directive.marker == DirectiveMarker::Comment
                    && directive.content.contains(DISABLE_MARKER)
                {
                    return true;
                }
                return false;
            }
            NodeKind::Whitespace { .. } => continue,
            NodeKind::Text { content } if content.trim().is_empty() => continue,
            _ => return false,
        }
    }

    false
}
