//! Function and constructor parameters.

use std::collections::BTreeSet;

use spindle_types::{AnnotationRef, ClassName, CodeBlock, Error, Result, TypeRef};

use super::KModifier;

/// A parameter of a function or constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub(crate) name: String,
    pub(crate) ty: TypeRef,
    pub(crate) modifiers: BTreeSet<KModifier>,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) default: Option<CodeBlock>,
}

impl ParameterSpec {
    /// Create a new required parameter.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            default: None,
        }
    }

    /// Add a modifier. Only `vararg`, `noinline` and `crossinline` apply to
    /// parameters.
    pub fn modifier(mut self, modifier: KModifier) -> Result<Self> {
        if !matches!(
            modifier,
            KModifier::Vararg | KModifier::Noinline | KModifier::Crossinline
        ) {
            return Err(Error::illegal(format!(
                "parameter '{}' cannot be {}",
                self.name,
                modifier.keyword()
            )));
        }
        self.modifiers.insert(modifier);
        Ok(self)
    }

    /// Mark as `vararg`.
    pub fn vararg(mut self) -> Self {
        self.modifiers.insert(KModifier::Vararg);
        self
    }

    /// Add an annotation.
    pub fn annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Set a default value.
    pub fn default_value(mut self, value: CodeBlock) -> Self {
        self.default = Some(value);
        self
    }

    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter type.
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    pub(crate) fn collect_classes(&self, out: &mut Vec<ClassName>) {
        for annotation in &self.annotations {
            annotation.collect_classes(out);
        }
        self.ty.collect_classes(out);
        if let Some(default) = &self.default {
            default.collect_classes(out);
        }
    }
}
