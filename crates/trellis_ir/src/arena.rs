//! Flat node arena.
//!
//! All nodes of a parsed document live in one contiguous `Vec`; tree edges
//! are [`NodeId`] indices. The arena is append-only during parsing and
//! read-only afterwards.

use crate::node::{Node, NodeKind};
use crate::node_id::NodeId;
use crate::span::Span;

/// Arena holding every node of one parsed document.
#[derive(Debug, Default, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
    root: NodeId,
}

impl NodeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
            root: NodeId::INVALID,
        }
    }

    /// Allocate a node and return its ID.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node::new(kind, span));
        id
    }

    /// Get a node by ID.
    ///
    /// # Panics
    /// Panics if the ID was not allocated by this arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Get a node by ID, returning `None` for out-of-range IDs.
    #[inline]
    pub fn try_get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Set the document root.
    pub fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }

    /// The document root.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all `(id, node)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i as u32), node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_alloc_and_get() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(
            NodeKind::Text {
                content: "hello".into(),
            },
            Span::new(0, 5),
        );
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(id).span, Span::new(0, 5));
        assert!(matches!(arena.get(id).kind, NodeKind::Text { .. }));
    }

    #[test]
    fn arena_sequential_ids() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(NodeKind::Text { content: "a".into() }, Span::DUMMY);
        let b = arena.alloc(NodeKind::Text { content: "b".into() }, Span::DUMMY);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
    }

    #[test]
    fn arena_root() {
        let mut arena = NodeArena::new();
        assert!(!arena.root().is_valid());
        let root = arena.alloc(NodeKind::Document { children: vec![] }, Span::DUMMY);
        arena.set_root(root);
        assert_eq!(arena.root(), root);
    }

    #[test]
    fn arena_try_get_out_of_range() {
        let arena = NodeArena::new();
        assert!(arena.try_get(NodeId::new(0)).is_none());
        assert!(arena.try_get(NodeId::INVALID).is_none());
    }
}
