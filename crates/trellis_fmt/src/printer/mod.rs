//! Orchestrating Printer
//!
//! The tree-walking driver: dispatches each node kind to the element,
//! attribute, text-flow, and embedded-tag sub-formatters, owns the output
//! buffer and indent level, and provides the capture pattern used to
//! measure sub-renders before committing to inline or block layout.
//!
//! Dispatch is an exhaustive match over the closed node sum type; node
//! kinds that appear in a position the printer does not reformat fall back
//! to the identity printer, so content is never dropped, only left
//! unformatted.
//!
//! # Modules
//!
//! - [`analysis`]: per-element inline/block analysis (memoized)
//! - [`attributes`]: opening-tag and attribute rendering
//! - [`flow`]: text flow, word wrap, and block-sibling spacing
//! - [`embedded`]: directive tags and control-flow groups

mod analysis;
mod attributes;
mod element;
mod embedded;
mod flow;

use rustc_hash::{FxHashMap, FxHashSet};
use trellis_ir::{Element, NodeArena, NodeId, NodeKind, VerbatimPrinter};

use crate::context::{CaptureState, FormatConfig, FormatContext};
use crate::emitter::StringEmitter;

pub use analysis::ElementAnalysis;

/// Formatter for template documents.
///
/// Borrows the node arena and original source read-only; all mutable state
/// (output buffer, indent, memo tables) lives for one invocation and is
/// discarded at return.
pub struct Printer<'a> {
    arena: &'a NodeArena,
    verbatim: VerbatimPrinter<'a>,
    /// Element analyses, keyed by arena index for the lifetime of one pass.
    analyses: FxHashMap<NodeId, ElementAnalysis>,
    /// Elements currently being analyzed; re-entry means a capture cycle.
    analyzing: FxHashSet<NodeId>,
    pub(crate) ctx: FormatContext<StringEmitter>,
}

impl<'a> Printer<'a> {
    /// Create a new printer with default config.
    pub fn new(arena: &'a NodeArena, source: &'a str) -> Self {
        Self::with_config(arena, source, FormatConfig::default())
    }

    /// Create a new printer with custom config.
    pub fn with_config(arena: &'a NodeArena, source: &'a str, config: FormatConfig) -> Self {
        Self {
            arena,
            verbatim: VerbatimPrinter::new(source),
            analyses: FxHashMap::default(),
            analyzing: FxHashSet::default(),
            ctx: FormatContext::with_config(config),
        }
    }

    /// Format the whole document and return the output.
    pub fn format(mut self) -> String {
        let root = self.arena.root();
        if root.is_valid() {
            self.print_node(root);
        }
        self.ctx.finalize()
    }

    /// Print one node at the current cursor position.
    ///
    /// Renderers never emit a trailing newline; line breaks between
    /// siblings belong to the caller.
    pub(crate) fn print_node(&mut self, id: NodeId) {
        let arena = self.arena;
        match &arena.get(id).kind {
            NodeKind::Document { children } => self.print_block_children(children),
            NodeKind::Element(_) => self.print_element(id),
            NodeKind::Text { .. } => {
                let lines = self.flow_run(&[id]);
                self.emit_flow_lines(&lines);
            }
            // Inter-sibling whitespace is a spacing input, not content.
            NodeKind::Whitespace { .. } => {}
            NodeKind::Comment { .. } => self.print_comment(id),
            NodeKind::Doctype { .. } => self.print_doctype(id),
            NodeKind::Directive(_) => self.print_directive(id),
            NodeKind::ControlFlow(_) => self.print_control_flow(id),
            // An attribute node outside an opening tag is not something the
            // printer reformats; reproduce it and move on.
            NodeKind::Attribute(_) => self.print_verbatim(id),
        }
    }

    /// Re-emit a node's original source bytes, fallback for anything the
    /// printer does not reformat.
    pub(crate) fn print_verbatim(&mut self, id: NodeId) {
        let text = self.verbatim.print(self.arena, id);
        self.ctx.emit_multiline(text);
    }

    /// Redirect output to an isolated buffer, run `f` against this printer,
    /// and return what it emitted. The outer buffer is restored on every
    /// exit path via a drop guard.
    pub(crate) fn capture<F>(&mut self, f: F) -> String
    where
        F: FnOnce(&mut Self),
    {
        struct Guard<'p, 'a> {
            printer: &'p mut Printer<'a>,
            state: Option<CaptureState>,
        }

        impl Drop for Guard<'_, '_> {
            fn drop(&mut self) {
                if let Some(state) = self.state.take() {
                    let _ = self.printer.ctx.end_capture(state);
                }
            }
        }

        let state = self.ctx.begin_capture();
        let mut guard = Guard {
            printer: self,
            state: Some(state),
        };
        f(&mut *guard.printer);
        match guard.state.take() {
            Some(state) => guard.printer.ctx.end_capture(state),
            None => String::new(),
        }
    }

    /// The element payload of a node, when it is one.
    pub(crate) fn element_ref(&self, id: NodeId) -> Option<&'a Element> {
        match &self.arena.get(id).kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Shared access to the arena (outlives `&self` borrows).
    pub(crate) fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    /// The identity printer over the original source.
    pub(crate) fn verbatim(&self) -> VerbatimPrinter<'a> {
        self.verbatim
    }

    /// Original source text of a node, via the identity printer.
    pub(crate) fn source_text(&self, id: NodeId) -> &'a str {
        self.verbatim.print(self.arena, id)
    }
}

/// Format a parsed document to its canonical textual form.
///
/// The sole externally callable operation of the engine: total over
/// well-formed input and deterministic (same tree and config always yield
/// identical output). Callers are expected to consult
/// [`crate::ignore::should_skip`] first and leave opted-out documents
/// untouched.
pub fn format_document(arena: &NodeArena, source: &str, config: FormatConfig) -> String {
    Printer::with_config(arena, source, config).format()
}
