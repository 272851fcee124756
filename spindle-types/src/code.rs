//! Code blocks: text interleaved with type references.
//!
//! Type parts are resolved to display names only when the block is
//! rendered, so the same block prints `List` in a file that imports it and
//! `kotlin.collections.List` in one that does not.

use std::fmt;

use crate::{Canonical, ClassName, NameLookup, TypeRef};

/// A fragment of a [`CodeBlock`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodePart {
    /// Literal source text.
    Text(String),
    /// A type reference, printed through the file's name table.
    Type(TypeRef),
}

/// An ordered sequence of code parts.
///
/// # Example
///
/// ```
/// use spindle_types::{ClassName, CodeBlock, TypeRef};
///
/// let block = CodeBlock::of("val names = ")
///     .add_type(TypeRef::class(ClassName::new("kotlin.collections", "ArrayList")))
///     .add_text("()");
/// assert_eq!(block.to_string(), "val names = kotlin.collections.ArrayList()");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CodeBlock {
    parts: Vec<CodePart>,
}

impl CodeBlock {
    /// Create an empty code block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a code block holding a single piece of text.
    pub fn of(text: impl Into<String>) -> Self {
        Self::new().add_text(text)
    }

    /// Create a code block holding a single type reference.
    pub fn of_type(ty: TypeRef) -> Self {
        Self::new().add_type(ty)
    }

    /// Append text.
    pub fn add_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Append a type reference.
    pub fn add_type(mut self, ty: TypeRef) -> Self {
        self.push_type(ty);
        self
    }

    /// Append another block.
    pub fn add_block(mut self, block: CodeBlock) -> Self {
        self.push_block(block);
        self
    }

    /// Append text (mutable).
    pub fn push_text(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if text.is_empty() {
            return self;
        }
        // Adjacent text parts are merged to keep blocks comparable.
        if let Some(CodePart::Text(last)) = self.parts.last_mut() {
            last.push_str(&text);
        } else {
            self.parts.push(CodePart::Text(text));
        }
        self
    }

    /// Append a type reference (mutable).
    pub fn push_type(&mut self, ty: TypeRef) -> &mut Self {
        self.parts.push(CodePart::Type(ty));
        self
    }

    /// Append another block (mutable).
    pub fn push_block(&mut self, block: CodeBlock) -> &mut Self {
        for part in block.parts {
            match part {
                CodePart::Text(text) => self.push_text(text),
                CodePart::Type(ty) => self.push_type(ty),
            };
        }
        self
    }

    /// Join blocks with a separator, wrapped in a prefix and suffix.
    pub fn join(
        blocks: impl IntoIterator<Item = CodeBlock>,
        separator: &str,
        prefix: &str,
        suffix: &str,
    ) -> Self {
        let mut joined = Self::of(prefix);
        for (i, block) in blocks.into_iter().enumerate() {
            if i > 0 {
                joined.push_text(separator);
            }
            joined.push_block(block);
        }
        joined.push_text(suffix);
        joined
    }

    /// The parts of this block.
    pub fn parts(&self) -> &[CodePart] {
        &self.parts
    }

    /// Check if the block holds nothing.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Collect every class printed by this block.
    pub fn collect_classes(&self, out: &mut Vec<ClassName>) {
        for part in &self.parts {
            if let CodePart::Type(ty) = part {
                ty.collect_classes(out);
            }
        }
    }

    /// Render the block using `names` for class display names.
    pub fn render(&self, names: &dyn NameLookup) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                CodePart::Text(text) => text.clone(),
                CodePart::Type(ty) => ty.render(names),
            })
            .collect()
    }
}

impl fmt::Display for CodeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Canonical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_text_is_merged() {
        let block = CodeBlock::of("a").add_text("b").add_text("");
        assert_eq!(block.parts(), &[CodePart::Text("ab".into())]);
    }

    #[test]
    fn test_join() {
        let blocks = ["1", "2", "3"].map(CodeBlock::of);
        assert_eq!(CodeBlock::join(blocks, ", ", "[", "]").to_string(), "[1, 2, 3]");
        assert_eq!(
            CodeBlock::join(Vec::new(), ", ", "[", "]").to_string(),
            "[]"
        );
    }

    #[test]
    fn test_collect_classes() {
        let string = ClassName::new("kotlin", "String");
        let block = CodeBlock::of("x: ").add_type(TypeRef::class(string.clone()));
        let mut out = Vec::new();
        block.collect_classes(&mut out);
        assert_eq!(out, vec![string]);
    }
}
