//! Renderable trait and CodeFragment for decoupled code generation.
//!
//! Declaration specs are lowered to fragments first and only then written
//! through a [`CodeBuilder`](super::CodeBuilder), so indentation is decided
//! in one place.

use crate::emit::EmitContext;

/// Represents a fragment of generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code (will have newline appended).
    Line(String),
    /// A blank line.
    Blank,
    /// Raw text without newline.
    Raw(String),
    /// A block with header, body fragments, and optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// Indent the contained fragments.
    Indent(Vec<CodeFragment>),
    /// A sequence of fragments.
    Sequence(Vec<CodeFragment>),
    /// A KDoc comment, possibly spanning several lines.
    Doc(String),
}

impl CodeFragment {
    /// Create a line fragment.
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// Create a blank line fragment.
    pub fn blank() -> Self {
        Self::Blank
    }

    /// Create a raw text fragment.
    pub fn raw(s: impl Into<String>) -> Self {
        Self::Raw(s.into())
    }

    /// Create a block fragment closed by `}`.
    pub fn braced(header: impl Into<String>, body: Vec<CodeFragment>) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close: Some("}".to_string()),
        }
    }

    /// Create a block fragment.
    pub fn block(
        header: impl Into<String>,
        body: Vec<CodeFragment>,
        close: Option<String>,
    ) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }

    /// Create an indented fragment sequence.
    pub fn indent(fragments: Vec<CodeFragment>) -> Self {
        Self::Indent(fragments)
    }

    /// Create a sequence of fragments.
    pub fn sequence(fragments: Vec<CodeFragment>) -> Self {
        Self::Sequence(fragments)
    }

    /// Create a KDoc comment fragment.
    pub fn doc(s: impl Into<String>) -> Self {
        Self::Doc(s.into())
    }
}

/// Trait for nodes that can be rendered to code fragments.
///
/// Type references inside a node print through the display-name table held
/// by `ctx`, the context of the file being emitted.
pub trait Renderable {
    /// Convert this node to a sequence of code fragments.
    fn to_fragments(&self, ctx: &EmitContext) -> Vec<CodeFragment>;
}

/// Blanket implementation for references.
impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self, ctx: &EmitContext) -> Vec<CodeFragment> {
        (*self).to_fragments(ctx)
    }
}

/// Blanket implementation for Box.
impl<T: Renderable + ?Sized> Renderable for Box<T> {
    fn to_fragments(&self, ctx: &EmitContext) -> Vec<CodeFragment> {
        self.as_ref().to_fragments(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_fragment_constructors() {
        assert_eq!(
            CodeFragment::line("test"),
            CodeFragment::Line("test".to_string())
        );
        assert_eq!(CodeFragment::blank(), CodeFragment::Blank);
        assert_eq!(
            CodeFragment::raw("raw"),
            CodeFragment::Raw("raw".to_string())
        );
    }

    #[test]
    fn test_braced_block() {
        let block = CodeFragment::braced("if (ready) {", vec![CodeFragment::line("start()")]);
        match block {
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                assert_eq!(header, "if (ready) {");
                assert_eq!(body.len(), 1);
                assert_eq!(close, Some("}".to_string()));
            }
            _ => panic!("Expected Block variant"),
        }
    }
}
