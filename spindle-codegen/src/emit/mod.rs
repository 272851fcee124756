//! Rendering of declaration specs to code fragments.
//!
//! Every spec implements [`Renderable`](crate::Renderable); the helpers here
//! hold the pieces of syntax several declarations share.

mod declarations;
mod file;

use std::collections::BTreeSet;

use spindle_types::{
    AnnotationRef, ClassName, CodeBlock, NameLookup, TypeRef, TypeShape, TypeVariable,
    escape_if_necessary,
};

use crate::{CodeFragment, KModifier, NameTable, spec::modifier_prefix};

/// Everything a spec needs to know about the file it is rendered into.
#[derive(Debug, Clone, Default)]
pub struct EmitContext {
    names: NameTable,
    explicit_public: bool,
}

impl EmitContext {
    /// Create a context printing classes through `names`.
    pub fn new(names: NameTable) -> Self {
        Self {
            names,
            explicit_public: false,
        }
    }

    /// Write `public` on declarations that declare no visibility.
    pub fn explicit_public(mut self, explicit_public: bool) -> Self {
        self.explicit_public = explicit_public;
        self
    }

    /// The display-name table.
    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub(crate) fn ty(&self, ty: &TypeRef) -> String {
        ty.render(&self.names)
    }

    pub(crate) fn code(&self, code: &CodeBlock) -> String {
        code.render(&self.names)
    }

    /// Modifiers followed by a space. `declaration` marks positions where an
    /// implicit visibility may be spelled out.
    pub(crate) fn modifiers(&self, modifiers: &BTreeSet<KModifier>, declaration: bool) -> String {
        let implicit = declaration
            && self.explicit_public
            && !modifiers.contains(&KModifier::Override)
            && !modifiers.iter().any(KModifier::is_visibility);
        if implicit {
            let mut with_public = modifiers.clone();
            with_public.insert(KModifier::Public);
            modifier_prefix(&with_public)
        } else {
            modifier_prefix(modifiers)
        }
    }

    /// One line per annotation.
    pub(crate) fn annotation_lines(&self, annotations: &[AnnotationRef]) -> Vec<CodeFragment> {
        annotations
            .iter()
            .map(|annotation| CodeFragment::line(annotation.render(&self.names)))
            .collect()
    }

    /// Annotations on one line, each followed by a space.
    pub(crate) fn inline_annotations(&self, annotations: &[AnnotationRef]) -> String {
        annotations
            .iter()
            .map(|annotation| format!("{} ", annotation.render(&self.names)))
            .collect()
    }

    /// `<out T : Bound, R>`, or nothing.
    pub(crate) fn type_variables(&self, variables: &[TypeVariable]) -> String {
        if variables.is_empty() {
            return String::new();
        }
        let declared: Vec<_> = variables
            .iter()
            .map(|variable| {
                let mut out = self.inline_annotations(&variable.annotations);
                if let Some(keyword) = variable.variance.keyword() {
                    out.push_str(keyword);
                    out.push(' ');
                }
                if variable.reified {
                    out.push_str("reified ");
                }
                out.push_str(&escape_if_necessary(&variable.name));
                if let [bound] = variable.bounds.as_slice() {
                    out.push_str(" : ");
                    out.push_str(&self.ty(bound));
                }
                out
            })
            .collect();
        format!("<{}>", declared.join(", "))
    }

    /// ` where T : A, T : B` for variables with several bounds, or nothing.
    pub(crate) fn where_clause(&self, variables: &[TypeVariable]) -> String {
        let constraints: Vec<_> = variables
            .iter()
            .filter(|variable| variable.bounds.len() > 1)
            .flat_map(|variable| {
                let name = escape_if_necessary(&variable.name);
                variable
                    .bounds
                    .iter()
                    .map(move |bound| format!("{} : {}", name, self.ty(bound)))
            })
            .collect();
        if constraints.is_empty() {
            String::new()
        } else {
            format!(" where {}", constraints.join(", "))
        }
    }

    /// `Receiver.` for extension declarations.
    pub(crate) fn receiver(&self, receiver: Option<&TypeRef>) -> String {
        match receiver {
            None => String::new(),
            Some(ty) if matches!(ty.shape(), TypeShape::Function(_)) && !ty.is_nullable() => {
                format!("({}).", self.ty(ty))
            }
            Some(ty) => format!("{}.", self.ty(ty)),
        }
    }
}

impl NameLookup for EmitContext {
    fn lookup(&self, class: &ClassName) -> String {
        self.names.lookup(class)
    }
}

/// Split rendered text into lines so continuation lines keep the current
/// indentation.
pub(crate) fn lines_of(text: &str) -> Vec<CodeFragment> {
    text.split('\n').map(CodeFragment::line).collect()
}

/// Join groups of fragments with a blank line between groups.
pub(crate) fn separated(groups: Vec<Vec<CodeFragment>>) -> Vec<CodeFragment> {
    let mut out = Vec::new();
    for group in groups.into_iter().filter(|group| !group.is_empty()) {
        if !out.is_empty() {
            out.push(CodeFragment::blank());
        }
        out.extend(group);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImportResolver;

    fn int() -> TypeRef {
        TypeRef::class(ClassName::new("kotlin", "Int"))
    }

    #[test]
    fn test_explicit_public() {
        let ctx = EmitContext::default().explicit_public(true);
        let none = BTreeSet::new();
        assert_eq!(ctx.modifiers(&none, true), "public ");
        assert_eq!(ctx.modifiers(&none, false), "");

        let overriding = BTreeSet::from([KModifier::Override]);
        assert_eq!(ctx.modifiers(&overriding, true), "override ");

        let private = BTreeSet::from([KModifier::Private]);
        assert_eq!(ctx.modifiers(&private, true), "private ");
    }

    #[test]
    fn test_type_variables_and_where_clause() {
        let comparable = ClassName::new("kotlin", "Comparable");
        let names = ImportResolver::new("com.example")
            .resolve([comparable.clone(), ClassName::new("kotlin", "Int")]);
        let ctx = EmitContext::new(names);
        let variables = vec![
            TypeVariable::new("T").bound(comparable.parameterized_by([TypeRef::variable("T")])),
            TypeVariable::new("R").bounds([int(), TypeRef::variable("T")]),
            TypeVariable::new("E").variance(spindle_types::Variance::Out),
        ];
        assert_eq!(
            ctx.type_variables(&variables),
            "<T : Comparable<T>, R, out E>"
        );
        assert_eq!(ctx.where_clause(&variables), " where R : Int, R : T");
    }

    #[test]
    fn test_function_receivers_are_parenthesized() {
        let ctx = EmitContext::default();
        let function = TypeRef::function(spindle_types::FunctionType::new([], int()));
        assert_eq!(ctx.receiver(Some(&function)), "(() -> kotlin.Int).");
        assert_eq!(ctx.receiver(Some(&int())), "kotlin.Int.");
        assert_eq!(ctx.receiver(None), "");
    }

    #[test]
    fn test_separated_skips_empty_groups() {
        let groups = vec![
            vec![CodeFragment::line("a")],
            vec![],
            vec![CodeFragment::line("b")],
        ];
        assert_eq!(
            separated(groups),
            vec![
                CodeFragment::line("a"),
                CodeFragment::blank(),
                CodeFragment::line("b")
            ]
        );
    }
}
