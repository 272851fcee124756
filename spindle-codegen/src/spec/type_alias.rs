//! Type aliases.

use std::collections::BTreeSet;

use spindle_types::{AnnotationRef, ClassName, Result, TypeRef, TypeVariable};

use super::{KModifier, insert_modifier};

/// A `typealias` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasSpec {
    pub(crate) name: String,
    pub(crate) ty: TypeRef,
    pub(crate) doc: Option<String>,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) modifiers: BTreeSet<KModifier>,
    pub(crate) type_variables: Vec<TypeVariable>,
}

impl TypeAliasSpec {
    /// Start an alias for `ty`.
    pub fn builder(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            doc: None,
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            type_variables: Vec::new(),
        }
    }

    /// Set documentation comment.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add an annotation.
    pub fn annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Add a modifier.
    pub fn modifier(mut self, modifier: KModifier) -> Result<Self> {
        let declaration = format!("typealias '{}'", self.name);
        insert_modifier(&mut self.modifiers, modifier, &declaration)?;
        Ok(self)
    }

    /// Add a type variable.
    pub fn type_variable(mut self, variable: TypeVariable) -> Self {
        self.type_variables.push(variable);
        self
    }

    /// The alias name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn collect_classes(&self, out: &mut Vec<ClassName>) {
        for annotation in &self.annotations {
            annotation.collect_classes(out);
        }
        for variable in &self.type_variables {
            variable.collect_classes(out);
        }
        self.ty.collect_classes(out);
    }
}
