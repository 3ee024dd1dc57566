//! Node IDs for the flat syntax tree arena.
//!
//! `NodeId(u32)` indices into a contiguous arena instead of `Box<Node>`:
//! O(1) integer equality, cheap copies, and a stable key for memo tables
//! (formatting analyses are keyed by arena index, never by pointer identity).

use std::fmt;

/// Index into the node arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Invalid node ID (sentinel value).
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// Create a new `NodeId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a valid ID.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::INVALID")
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}
