//! Output Emitter
//!
//! Abstraction for output production during formatting. The engine itself
//! only ever formats in memory (the string emitter); the trait keeps the
//! output destination swappable at the seam.

/// Trait for emitting formatted output.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation: `level * width` spaces.
    fn emit_indent(&mut self, level: usize, width: usize);

    /// Emit a single space.
    fn emit_space(&mut self);
}

/// String-based emitter for in-memory formatting.
///
/// Builds the output incrementally; the buffer can be swapped out wholesale,
/// which is what the capture pattern relies on.
#[derive(Debug, Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    /// Create a new string emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the formatted output.
    pub fn output(self) -> String {
        self.buffer
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Get the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Ensure the output ends with a single newline.
    pub fn ensure_trailing_newline(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }

    /// Remove trailing blank lines, leaving content followed by one newline.
    pub fn trim_trailing_blank_lines(&mut self) {
        while self.buffer.ends_with("\n\n") || self.buffer.ends_with(" \n") {
            self.buffer.pop();
        }
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize, width: usize) {
        for _ in 0..level * width {
            self.buffer.push(' ');
        }
    }

    fn emit_space(&mut self) {
        self.buffer.push(' ');
    }
}
