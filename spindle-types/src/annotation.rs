//! Annotation references.

use std::fmt;

use crate::{Canonical, ClassName, CodeBlock, NameLookup, TypeRef, escape_if_necessary};

/// A named annotation argument whose value is already rendered as code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationMember {
    pub name: String,
    pub value: CodeBlock,
}

/// An annotation: its type plus named arguments in declaration order.
///
/// # Example
///
/// ```
/// use spindle_types::{AnnotationRef, ClassName, CodeBlock};
///
/// let annotation = AnnotationRef::new(ClassName::new("kotlin", "Deprecated"))
///     .member("message", CodeBlock::of("\"old\""));
/// assert_eq!(annotation.to_string(), "@kotlin.Deprecated(message = \"old\")");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationRef {
    class: ClassName,
    members: Vec<AnnotationMember>,
}

impl AnnotationRef {
    /// Create an annotation without arguments.
    pub fn new(class: ClassName) -> Self {
        Self {
            class,
            members: Vec::new(),
        }
    }

    /// Add a named argument.
    pub fn member(mut self, name: impl Into<String>, value: CodeBlock) -> Self {
        self.members.push(AnnotationMember {
            name: name.into(),
            value,
        });
        self
    }

    /// The annotation type.
    pub fn class(&self) -> &ClassName {
        &self.class
    }

    /// Named arguments, in order.
    pub fn members(&self) -> &[AnnotationMember] {
        &self.members
    }

    /// This annotation as an argument expression (no leading `@`), used when
    /// it is nested inside another annotation.
    pub fn to_code_block(&self) -> CodeBlock {
        let block = CodeBlock::of_type(TypeRef::class(self.class.clone()));
        if self.members.is_empty() {
            return block;
        }
        let members = self.members.iter().map(|member| {
            CodeBlock::of(format!("{} = ", escape_if_necessary(&member.name)))
                .add_block(member.value.clone())
        });
        block.add_block(CodeBlock::join(members, ", ", "(", ")"))
    }

    /// Collect every class printed by this annotation.
    pub fn collect_classes(&self, out: &mut Vec<ClassName>) {
        out.push(self.class.clone());
        for member in &self.members {
            member.value.collect_classes(out);
        }
    }

    /// Render as `@Type(name = value, ...)`.
    pub fn render(&self, names: &dyn NameLookup) -> String {
        format!("@{}", self.to_code_block().render(names))
    }
}

impl fmt::Display for AnnotationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Canonical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_members() {
        let annotation = AnnotationRef::new(ClassName::new("kotlin.jvm", "JvmStatic"));
        assert_eq!(annotation.to_string(), "@kotlin.jvm.JvmStatic");
    }

    #[test]
    fn test_nested_annotation_block() {
        let inner = AnnotationRef::new(ClassName::new("com.example", "Inner"))
            .member("value", CodeBlock::of("1"));
        let outer = AnnotationRef::new(ClassName::new("com.example", "Outer"))
            .member("inner", inner.to_code_block());
        assert_eq!(
            outer.to_string(),
            "@com.example.Outer(inner = com.example.Inner(value = 1))"
        );
    }

    #[test]
    fn test_keyword_member_names_are_escaped() {
        let annotation = AnnotationRef::new(ClassName::new("com.example", "Flag"))
            .member("in", CodeBlock::of("true"));
        assert_eq!(annotation.to_string(), "@com.example.Flag(`in` = true)");
    }
}
