//! Trellis Formatter
//!
//! Pretty-printer for template documents that mix markup with embedded
//! directive tags (`<% %>`, `<%= %>`, `<%# %>`).
//!
//! The engine consumes a parsed [`trellis_ir::NodeArena`] together with the
//! original source text and produces the document's canonical form:
//! elements inlined or expanded by measuring their rendering against the
//! column budget, attributes quote-normalized and wrapped, free text
//! re-flowed, and directive-tag whitespace normalized. Content-preserving
//! regions are reproduced byte-for-byte from the source spans.
//!
//! Parsing, configuration loading, and file discovery live outside this
//! crate. Callers check [`should_skip`] first and hand the rest to
//! [`format_document`]:
//!
//! ```
//! use trellis_fmt::{format_document, should_skip, FormatConfig};
//! use trellis_ir::{NodeArena, NodeKind, Span};
//!
//! let mut arena = NodeArena::new();
//! let text = arena.alloc(NodeKind::Text { content: "hi".into() }, Span::DUMMY);
//! let root = arena.alloc(NodeKind::Document { children: vec![text] }, Span::DUMMY);
//! arena.set_root(root);
//!
//! if !should_skip(&arena) {
//!     let formatted = format_document(&arena, "hi", FormatConfig::default());
//!     assert_eq!(formatted, "hi\n");
//! }
//! ```

pub mod classify;
pub mod context;
pub mod emitter;
pub mod ignore;
pub mod printer;

pub use context::{FormatConfig, FormatContext, INDENT_WIDTH, MAX_LINE_WIDTH};
pub use emitter::{Emitter, StringEmitter};
pub use ignore::{should_skip, DISABLE_MARKER};
pub use printer::{format_document, ElementAnalysis, Printer};
