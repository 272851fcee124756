//! Code builder utility for writing properly indented source.

use super::{CodeFragment, Indent, Renderable};
use crate::emit::EmitContext;

/// Fluent API for building code with proper indentation.
///
/// Supports both consuming methods (returning `Self`) for chaining and
/// mutable methods (returning `&mut Self`) for fragment emission.
///
/// # Example (Consuming API)
///
/// ```
/// use spindle_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::kotlin()
///     .line("fun main() {")
///     .indent()
///     .line("println(\"Hello, world!\")")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "fun main() {\n    println(\"Hello, world!\")\n}\n");
/// ```
///
/// # Example (Mutable API)
///
/// ```
/// use spindle_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::kotlin();
/// builder
///     .push_doc("Entry point.")
///     .push_line("fun main() {")
///     .push_line("}");
/// assert_eq!(builder.build(), "/**\n * Entry point.\n */\nfun main() {\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 4-space indentation.
    pub fn kotlin() -> Self {
        Self::new(Indent::KOTLIN)
    }

    // =========================================================================
    // Mutable API - methods prefixed with `push_`
    // =========================================================================

    /// Add a line of code with current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline (mutable).
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a KDoc comment, one ` * ` line per line of `text` (mutable).
    pub fn push_doc(&mut self, text: &str) -> &mut Self {
        self.push_line("/**");
        for line in text.lines() {
            if line.is_empty() {
                self.push_line(" *");
            } else {
                self.push_line(&format!(" * {}", line));
            }
        }
        self.push_line(" */")
    }

    /// Emit a Renderable node within `ctx` (mutable).
    pub fn emit(&mut self, node: &impl Renderable, ctx: &EmitContext) -> &mut Self {
        for fragment in node.to_fragments(ctx) {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Raw(s) => {
                self.push_raw(&s);
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.push_indent();
                for f in body {
                    self.apply_fragment(f);
                }
                self.push_dedent();
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::Indent(fragments) => {
                self.push_indent();
                for f in fragments {
                    self.apply_fragment(f);
                }
                self.push_dedent();
            }
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply_fragment(f);
                }
            }
            CodeFragment::Doc(text) => {
                self.push_doc(&text);
            }
        }
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    /// Add raw text without indentation or newline.
    pub fn raw(mut self, s: &str) -> Self {
        self.push_raw(s);
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Add a KDoc comment.
    pub fn doc(mut self, text: &str) -> Self {
        self.push_doc(text);
        self
    }

    /// Add a block closed by `close`.
    ///
    /// # Example
    ///
    /// ```
    /// use spindle_codegen::builder::CodeBuilder;
    ///
    /// let code = CodeBuilder::kotlin()
    ///     .block_with_close("class Foo {", "}", |b: CodeBuilder| {
    ///         b.line("val bar: Int = 1")
    ///     })
    ///     .build();
    /// assert_eq!(code, "class Foo {\n    val bar: Int = 1\n}\n");
    /// ```
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::kotlin()
    }
}
