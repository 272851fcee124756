//! Properties.

use std::collections::BTreeSet;

use spindle_types::{AnnotationRef, ClassName, CodeBlock, Error, Result, TypeRef, TypeVariable};

use super::{KModifier, insert_modifier};

/// A `val` or `var` declaration.
///
/// # Example
///
/// ```
/// use spindle_codegen::{KModifier, PropertySpec};
/// use spindle_types::{ClassName, CodeBlock, TypeRef};
///
/// let name = PropertySpec::builder("name", TypeRef::class(ClassName::new("kotlin", "String")))
///     .mutable()
///     .modifier(KModifier::Private)
///     .unwrap()
///     .initializer(CodeBlock::of("\"\""));
/// assert!(name.is_mutable());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    pub(crate) name: String,
    pub(crate) ty: TypeRef,
    pub(crate) mutable: bool,
    pub(crate) doc: Option<String>,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) modifiers: BTreeSet<KModifier>,
    pub(crate) type_variables: Vec<TypeVariable>,
    pub(crate) receiver: Option<TypeRef>,
    pub(crate) initializer: Option<CodeBlock>,
    pub(crate) getter: Option<CodeBlock>,
    pub(crate) setter: Option<CodeBlock>,
}

impl PropertySpec {
    /// Start a read-only property.
    pub fn builder(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            mutable: false,
            doc: None,
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            type_variables: Vec::new(),
            receiver: None,
            initializer: None,
            getter: None,
            setter: None,
        }
    }

    /// Make this a `var`.
    pub fn mutable(mut self) -> Self {
        self.mutable = true;
        self
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
        if modifier == KModifier::Abstract && self.has_implementation() {
            return Err(Error::illegal(format!(
                "abstract property '{}' cannot have an initializer or accessors",
                self.name
            )));
        }
        let declaration = format!("property '{}'", self.name);
        insert_modifier(&mut self.modifiers, modifier, &declaration)?;
        Ok(self)
    }

    /// Add multiple modifiers.
    pub fn modifiers(self, modifiers: impl IntoIterator<Item = KModifier>) -> Result<Self> {
        modifiers.into_iter().try_fold(self, Self::modifier)
    }

    /// Add a type variable (extension properties only use these).
    pub fn type_variable(mut self, variable: TypeVariable) -> Self {
        self.type_variables.push(variable);
        self
    }

    /// Set the extension receiver.
    pub fn receiver(mut self, receiver: TypeRef) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// Set the initializer expression.
    pub fn initializer(mut self, initializer: CodeBlock) -> Self {
        self.initializer = Some(initializer);
        self
    }

    /// Set the getter's expression body.
    pub fn getter(mut self, body: CodeBlock) -> Self {
        self.getter = Some(body);
        self
    }

    /// Set the setter's expression body; the setter parameter is `value`.
    pub fn setter(mut self, body: CodeBlock) -> Self {
        self.setter = Some(body);
        self
    }

    /// Property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Property type.
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// Check if this is a `var`.
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Check if this property is abstract.
    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(&KModifier::Abstract)
    }

    fn has_implementation(&self) -> bool {
        self.initializer.is_some() || self.getter.is_some() || self.setter.is_some()
    }

    /// Check if this property can be declared as a primary-constructor
    /// parameter named `parameter`: its initializer is exactly that name.
    pub(crate) fn is_constructor_property(&self, parameter: &str, ty: &TypeRef) -> bool {
        self.name == parameter
            && &self.ty == ty
            && self.receiver.is_none()
            && self.type_variables.is_empty()
            && self.getter.is_none()
            && self.setter.is_none()
            && self.initializer.as_ref().map(|init| init.to_string()).as_deref()
                == Some(parameter)
    }

    pub(crate) fn collect_classes(&self, out: &mut Vec<ClassName>) {
        for annotation in &self.annotations {
            annotation.collect_classes(out);
        }
        for variable in &self.type_variables {
            variable.collect_classes(out);
        }
        if let Some(receiver) = &self.receiver {
            receiver.collect_classes(out);
        }
        self.ty.collect_classes(out);
        for code in [&self.initializer, &self.getter, &self.setter]
            .into_iter()
            .flatten()
        {
            code.collect_classes(out);
        }
    }
}
