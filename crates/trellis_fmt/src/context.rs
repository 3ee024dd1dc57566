//! Formatting Context
//!
//! Tracks mutable cursor state during one format invocation: column
//! position, indentation level, emitted-line count (boundary tracking),
//! inline-rendering mode, the attribute currently being rendered, and the
//! stack of enclosing element names.
//!
//! The context also owns the **capture** pattern: output is temporarily
//! redirected to a fresh buffer so a sub-render can be measured, and the
//! prior buffer is restored on every exit path, including unwinding.

use std::mem;

use crate::emitter::{Emitter, StringEmitter};

/// Default maximum line width before breaking.
pub const MAX_LINE_WIDTH: usize = 80;

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 2;

/// Configuration for the formatter.
///
/// Read-only for the duration of one `format` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Maximum line width before breaking to multiple lines.
    pub max_width: usize,

    /// Indentation size in spaces.
    pub indent_size: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max_width: MAX_LINE_WIDTH,
            indent_size: INDENT_WIDTH,
        }
    }
}

impl FormatConfig {
    /// Create a new config with the specified max width.
    pub fn with_max_width(max_width: usize) -> Self {
        Self {
            max_width,
            ..Default::default()
        }
    }

    /// Create a new config with the specified indent size.
    pub fn with_indent_size(indent_size: usize) -> Self {
        Self {
            indent_size,
            ..Default::default()
        }
    }
}

/// Formatting context that tracks cursor state during output.
///
/// Wraps an emitter and maintains the column position, indentation level,
/// and the mode flags the sub-formatters consult. Constructed once per
/// format invocation and discarded at return; never shared between
/// concurrent invocations.
pub struct FormatContext<E: Emitter = StringEmitter> {
    emitter: E,
    column: usize,
    indent_level: usize,
    config: FormatConfig,
    /// Newlines emitted so far. Snapshots of this counter give the
    /// boundary flag: did a subtree's render span more than one line?
    lines_emitted: usize,
    /// Set while rendering into a single-line (inline) position.
    inline_mode: bool,
    /// Name of the attribute whose value is currently being rendered.
    /// Needed to detect token-list attributes in nested directive tags.
    current_attribute: Option<String>,
    /// Names of the enclosing markup elements, outermost first.
    element_stack: Vec<String>,
}

impl FormatContext<StringEmitter> {
    /// Create a new format context with a string emitter and default config.
    pub fn new() -> Self {
        Self::with_emitter(StringEmitter::new())
    }

    /// Create a new format context with a string emitter and custom config.
    pub fn with_config(config: FormatConfig) -> Self {
        Self::with_emitter_and_config(StringEmitter::new(), config)
    }
}

impl Default for FormatContext<StringEmitter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Emitter> FormatContext<E> {
    /// Create a format context with a specific emitter and default config.
    pub fn with_emitter(emitter: E) -> Self {
        Self::with_emitter_and_config(emitter, FormatConfig::default())
    }

    /// Create a format context with a specific emitter and config.
    pub fn with_emitter_and_config(emitter: E, config: FormatConfig) -> Self {
        Self {
            emitter,
            column: 0,
            indent_level: 0,
            config,
            lines_emitted: 0,
            inline_mode: false,
            current_attribute: None,
            element_stack: Vec::new(),
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Get the maximum line width.
    pub fn max_width(&self) -> usize {
        self.config.max_width
    }

    /// Get the current column position (0-indexed).
    pub fn column(&self) -> usize {
        self.column
    }

    /// Get the current indentation level.
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Get the current indentation width in spaces.
    pub fn indent_width(&self) -> usize {
        self.indent_level * self.config.indent_size
    }

    /// Remaining width on the current line.
    pub fn remaining_width(&self) -> usize {
        self.config.max_width.saturating_sub(self.column)
    }

    /// Check if content of `width` would fit on the current line.
    pub fn fits(&self, width: usize) -> bool {
        self.column + width <= self.config.max_width
    }

    /// Number of newlines emitted so far.
    ///
    /// Callers snapshot this before a sub-render and compare after to learn
    /// whether the subtree spanned more than one line.
    pub fn lines_emitted(&self) -> usize {
        self.lines_emitted
    }

    /// Whether we are rendering into a single-line position.
    pub fn in_inline_mode(&self) -> bool {
        self.inline_mode
    }

    /// Set inline mode, returning the prior flag so callers can restore it.
    pub fn set_inline_mode(&mut self, on: bool) -> bool {
        mem::replace(&mut self.inline_mode, on)
    }

    /// Run a closure with inline mode enabled, restoring the prior flag.
    pub fn with_inline_mode<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        let saved = self.set_inline_mode(true);
        let result = f(self);
        self.inline_mode = saved;
        result
    }

    /// Name of the attribute currently being rendered, if any.
    pub fn current_attribute(&self) -> Option<&str> {
        self.current_attribute.as_deref()
    }

    /// Record the attribute being rendered, returning the prior value so
    /// callers can restore it.
    pub fn set_current_attribute(&mut self, name: Option<String>) -> Option<String> {
        mem::replace(&mut self.current_attribute, name)
    }

    /// Run a closure with `name` recorded as the attribute being rendered.
    pub fn with_attribute<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        let saved = self.set_current_attribute(Some(name.to_string()));
        let result = f(self);
        self.current_attribute = saved;
        result
    }

    /// The stack of enclosing element names, outermost first.
    pub fn element_stack(&self) -> &[String] {
        &self.element_stack
    }

    /// Push an element name onto the stack of enclosing elements.
    pub fn push_element(&mut self, tag_name: &str) {
        self.element_stack.push(tag_name.to_string());
    }

    /// Pop the innermost enclosing element name.
    pub fn pop_element(&mut self) {
        self.element_stack.pop();
    }

    /// Run a closure with `tag_name` pushed onto the element stack.
    pub fn with_element<F, R>(&mut self, tag_name: &str, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.push_element(tag_name);
        let result = f(self);
        self.pop_element();
        result
    }

    /// Emit a text fragment. Must not contain newlines; use
    /// [`Self::emit_multiline`] for captured fragments.
    pub fn emit(&mut self, text: &str) {
        self.emitter.emit(text);
        self.column += text.chars().count();
    }

    /// Emit a single space.
    pub fn emit_space(&mut self) {
        self.emitter.emit_space();
        self.column += 1;
    }

    /// Emit a newline and reset column to 0.
    pub fn emit_newline(&mut self) {
        self.emitter.emit_newline();
        self.column = 0;
        self.lines_emitted += 1;
    }

    /// Emit indentation at the current level and update column.
    pub fn emit_indent(&mut self) {
        self.emitter.emit_indent(self.indent_level, self.config.indent_size);
        self.column = self.indent_width();
    }

    /// Emit a newline followed by indentation.
    pub fn emit_newline_indent(&mut self) {
        self.emit_newline();
        self.emit_indent();
    }

    /// Emit a fragment that may contain newlines, keeping the column and
    /// line counters accurate. Used to splice captured sub-renders back
    /// into the main output.
    pub fn emit_multiline(&mut self, text: &str) {
        let mut first = true;
        for segment in text.split('\n') {
            if !first {
                self.emit_newline();
            }
            if !segment.is_empty() {
                self.emit(segment);
            }
            first = false;
        }
    }

    /// Increment indentation level.
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrement indentation level.
    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Execute a closure with increased indentation.
    ///
    /// Indentation is restored after the closure completes.
    pub fn with_indent<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.indent();
        let result = f(self);
        self.dedent();
        result
    }

    /// Get the underlying emitter.
    pub fn into_emitter(self) -> E {
        self.emitter
    }

    /// Get a reference to the underlying emitter.
    pub fn emitter(&self) -> &E {
        &self.emitter
    }
}

impl FormatContext<StringEmitter> {
    /// Get the formatted output.
    pub fn output(self) -> String {
        self.emitter.output()
    }

    /// Get the current output without consuming.
    pub fn as_str(&self) -> &str {
        self.emitter.as_str()
    }

    /// Finalize output: trim trailing blank lines and ensure exactly one
    /// trailing newline.
    pub fn finalize(mut self) -> String {
        self.emitter.trim_trailing_blank_lines();
        self.emitter.ensure_trailing_newline();
        self.emitter.output()
    }

    /// Start a capture: swap in a fresh buffer and return the saved cursor
    /// state. Column and line counters start from zero inside the capture.
    ///
    /// Callers that hold state beyond the context (the printer) pair this
    /// with [`Self::end_capture`] inside their own drop guard so the outer
    /// buffer is restored on every exit path.
    pub fn begin_capture(&mut self) -> CaptureState {
        let state = CaptureState {
            emitter: mem::take(&mut self.emitter),
            column: self.column,
            lines_emitted: self.lines_emitted,
        };
        self.column = 0;
        self.lines_emitted = 0;
        state
    }

    /// End a capture: restore the saved cursor state and return what the
    /// sub-render emitted.
    pub fn end_capture(&mut self, state: CaptureState) -> String {
        let captured = mem::replace(&mut self.emitter, state.emitter);
        self.column = state.column;
        self.lines_emitted = state.lines_emitted;
        captured.output()
    }

    /// Redirect output to an isolated buffer, run `f`, and return what it
    /// emitted.
    ///
    /// The outer buffer is restored on every exit path: the swap lives in a
    /// drop guard, so a panic during the sub-render cannot leave the outer
    /// buffer replaced.
    pub fn capture<F>(&mut self, f: F) -> String
    where
        F: FnOnce(&mut Self),
    {
        struct Guard<'c> {
            ctx: &'c mut FormatContext<StringEmitter>,
            state: Option<CaptureState>,
        }

        impl Drop for Guard<'_> {
            fn drop(&mut self) {
                if let Some(state) = self.state.take() {
                    let _ = self.ctx.end_capture(state);
                }
            }
        }

        let state = self.begin_capture();
        let mut guard = Guard {
            ctx: self,
            state: Some(state),
        };
        f(&mut *guard.ctx);
        match guard.state.take() {
            Some(state) => guard.ctx.end_capture(state),
            None => String::new(),
        }
    }
}

/// Saved cursor state for one in-flight capture.
pub struct CaptureState {
    emitter: StringEmitter,
    column: usize,
    lines_emitted: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_basic_emit() {
        let mut ctx = FormatContext::new();
        ctx.emit("hello");
        assert_eq!(ctx.column(), 5);
        ctx.emit_space();
        ctx.emit("world");
        assert_eq!(ctx.column(), 11);
        assert_eq!(ctx.output(), "hello world");
    }

    #[test]
    fn context_newline_resets_column() {
        let mut ctx = FormatContext::new();
        ctx.emit("line1");
        ctx.emit_newline();
        assert_eq!(ctx.column(), 0);
        assert_eq!(ctx.lines_emitted(), 1);
    }

    #[test]
    fn context_indentation() {
        let mut ctx = FormatContext::new();
        ctx.emit("<div>");
        ctx.with_indent(|ctx| {
            ctx.emit_newline_indent();
            assert_eq!(ctx.column(), 2);
            ctx.emit("<p>hi</p>");
        });
        ctx.emit_newline_indent();
        ctx.emit("</div>");
        assert_eq!(ctx.output(), "<div>\n  <p>hi</p>\n</div>");
    }

    #[test]
    fn context_fits_check() {
        let mut ctx = FormatContext::new();
        ctx.emit("x".repeat(70).as_str());
        assert!(ctx.fits(10));
        assert!(!ctx.fits(11));
    }

    #[test]
    fn context_capture_isolates_output() {
        let mut ctx = FormatContext::new();
        ctx.emit("outer");
        let captured = ctx.capture(|ctx| {
            assert_eq!(ctx.column(), 0);
            ctx.emit("inner");
        });
        assert_eq!(captured, "inner");
        assert_eq!(ctx.column(), 5);
        ctx.emit("!");
        assert_eq!(ctx.output(), "outer!");
    }

    #[test]
    fn context_capture_restores_line_counter() {
        let mut ctx = FormatContext::new();
        ctx.emit("a");
        ctx.emit_newline();
        let captured = ctx.capture(|ctx| {
            ctx.emit("x");
            ctx.emit_newline();
            ctx.emit("y");
        });
        assert_eq!(captured, "x\ny");
        assert_eq!(ctx.lines_emitted(), 1);
    }

    #[test]
    fn context_nested_capture() {
        let mut ctx = FormatContext::new();
        let outer = ctx.capture(|ctx| {
            ctx.emit("a");
            let inner = ctx.capture(|ctx| ctx.emit("b"));
            assert_eq!(inner, "b");
            ctx.emit("c");
        });
        assert_eq!(outer, "ac");
    }

    #[test]
    fn context_inline_mode_scoped() {
        let mut ctx = FormatContext::new();
        assert!(!ctx.in_inline_mode());
        ctx.with_inline_mode(|ctx| {
            assert!(ctx.in_inline_mode());
            ctx.with_inline_mode(|ctx| assert!(ctx.in_inline_mode()));
            assert!(ctx.in_inline_mode());
        });
        assert!(!ctx.in_inline_mode());
    }

    #[test]
    fn context_attribute_scoped() {
        let mut ctx = FormatContext::new();
        ctx.with_attribute("class", |ctx| {
            assert_eq!(ctx.current_attribute(), Some("class"));
        });
        assert_eq!(ctx.current_attribute(), None);
    }

    #[test]
    fn context_element_stack() {
        let mut ctx = FormatContext::new();
        ctx.with_element("div", |ctx| {
            ctx.with_element("span", |ctx| {
                assert_eq!(ctx.element_stack(), ["div", "span"]);
            });
        });
        assert!(ctx.element_stack().is_empty());
    }

    #[test]
    fn context_emit_multiline_tracks_column() {
        let mut ctx = FormatContext::new();
        ctx.emit_multiline("ab\ncde");
        assert_eq!(ctx.column(), 3);
        assert_eq!(ctx.lines_emitted(), 1);
        assert_eq!(ctx.output(), "ab\ncde");
    }

    #[test]
    fn context_finalize() {
        let mut ctx = FormatContext::new();
        ctx.emit("content");
        ctx.emit_newline();
        ctx.emit_newline();
        assert_eq!(ctx.finalize(), "content\n");
    }
}
