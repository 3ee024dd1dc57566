//! Trellis IR
//!
//! Syntax tree types for the Trellis template formatter.
//!
//! A parsed document is a flat arena of nodes ([`NodeArena`]) indexed by
//! [`NodeId`]. The node kinds form a closed sum type ([`NodeKind`]) over
//! markup elements, text, whitespace, comments, doctypes, embedded directive
//! tags, and embedded control-flow groups. Every node carries a [`Span`]
//! into the original source; the [`VerbatimPrinter`] reconstructs any
//! region byte-for-byte from those spans.
//!
//! This crate owns no formatting policy. The formatter (`trellis_fmt`)
//! borrows the arena read-only and re-emits derived text.

pub mod arena;
pub mod node;
pub mod node_id;
pub mod span;
pub mod verbatim;

pub use arena::NodeArena;
pub use node::{
    AttrValue, Attribute, Clause, ControlFlow, ControlFlowKind, Directive, DirectiveMarker,
    Element, Node, NodeKind, QuoteKind, ValuePart,
};
pub use node_id::NodeId;
pub use span::{Span, SpanError};
pub use verbatim::VerbatimPrinter;
