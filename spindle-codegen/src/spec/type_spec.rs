//! Classes, interfaces, objects, enums and annotation classes.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use spindle_types::{AnnotationRef, ClassName, CodeBlock, Error, Result, TypeRef, TypeVariable};

use super::{FunSpec, KModifier, PropertySpec, insert_modifier};

/// The kind of type a [`TypeSpec`] declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Object,
    Enum,
    Annotation,
}

impl TypeKind {
    /// The declaration keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Object => "object",
            Self::Enum => "enum class",
            Self::Annotation => "annotation class",
        }
    }

    /// Check if this kind can declare a primary constructor.
    pub fn has_constructors(&self) -> bool {
        matches!(self, Self::Class | Self::Enum | Self::Annotation)
    }
}

/// One entry of an enum class.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumConstant {
    pub(crate) doc: Option<String>,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) arguments: Vec<CodeBlock>,
    pub(crate) functions: Vec<FunSpec>,
}

impl EnumConstant {
    /// Create an entry without arguments or body.
    pub fn new() -> Self {
        Self::default()
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

    /// Add a constructor argument.
    pub fn argument(mut self, argument: CodeBlock) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Add a member function to the entry's body.
    pub fn function(mut self, function: FunSpec) -> Self {
        self.functions.push(function);
        self
    }

    fn collect_classes(&self, out: &mut Vec<ClassName>) {
        for annotation in &self.annotations {
            annotation.collect_classes(out);
        }
        for argument in &self.arguments {
            argument.collect_classes(out);
        }
        for function in &self.functions {
            function.collect_classes(out);
        }
    }
}

/// A type declaration.
///
/// # Example
///
/// ```
/// use spindle_codegen::{EnumConstant, TypeSpec};
///
/// let color = TypeSpec::enum_builder("Color")
///     .enum_constant("RED", EnumConstant::new())
///     .unwrap();
/// assert_eq!(color.name(), "Color");
///
/// assert!(TypeSpec::class_builder("Point").enum_constant("X", EnumConstant::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub(crate) kind: TypeKind,
    pub(crate) name: String,
    pub(crate) doc: Option<String>,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) modifiers: BTreeSet<KModifier>,
    pub(crate) type_variables: Vec<TypeVariable>,
    pub(crate) primary_constructor: Option<FunSpec>,
    pub(crate) superclass: Option<TypeRef>,
    pub(crate) superclass_arguments: Vec<CodeBlock>,
    pub(crate) superinterfaces: Vec<TypeRef>,
    pub(crate) enum_constants: IndexMap<String, EnumConstant>,
    pub(crate) properties: Vec<PropertySpec>,
    pub(crate) functions: Vec<FunSpec>,
    pub(crate) types: Vec<TypeSpec>,
}

impl TypeSpec {
    fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            doc: None,
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            type_variables: Vec::new(),
            primary_constructor: None,
            superclass: None,
            superclass_arguments: Vec::new(),
            superinterfaces: Vec::new(),
            enum_constants: IndexMap::new(),
            properties: Vec::new(),
            functions: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Start a type declaration of the given kind.
    pub fn builder(kind: TypeKind, name: impl Into<String>) -> Self {
        Self::new(kind, name)
    }

    /// Start a class.
    pub fn class_builder(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    /// Start an interface.
    pub fn interface_builder(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    /// Start an object.
    pub fn object_builder(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Object, name)
    }

    /// Start a companion object named `Companion`.
    pub fn companion_object_builder() -> Self {
        Self::named_companion_object_builder("Companion")
    }

    /// Start a companion object with its own name.
    pub fn named_companion_object_builder(name: impl Into<String>) -> Self {
        let mut companion = Self::new(TypeKind::Object, name);
        companion.modifiers.insert(KModifier::Companion);
        companion
    }

    /// Start an enum class.
    pub fn enum_builder(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Enum, name)
    }

    /// Start an annotation class.
    pub fn annotation_builder(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Annotation, name)
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
        if modifier == KModifier::Companion && self.kind != TypeKind::Object {
            return Err(Error::illegal(format!(
                "only objects can be companions, not '{}'",
                self.name
            )));
        }
        let declaration = format!("{} '{}'", self.kind.keyword(), self.name);
        insert_modifier(&mut self.modifiers, modifier, &declaration)?;
        Ok(self)
    }

    /// Add multiple modifiers.
    pub fn modifiers(self, modifiers: impl IntoIterator<Item = KModifier>) -> Result<Self> {
        modifiers.into_iter().try_fold(self, Self::modifier)
    }

    /// Add a type variable.
    pub fn type_variable(mut self, variable: TypeVariable) -> Self {
        self.type_variables.push(variable);
        self
    }

    /// Set the primary constructor.
    pub fn primary_constructor(mut self, constructor: FunSpec) -> Result<Self> {
        if !self.kind.has_constructors() {
            return Err(Error::illegal(format!(
                "{} '{}' cannot have a primary constructor",
                self.kind.keyword(),
                self.name
            )));
        }
        if !constructor.is_constructor() {
            return Err(Error::illegal(format!(
                "primary constructor of '{}' must be a constructor",
                self.name
            )));
        }
        if constructor.body.is_some() || constructor.delegation.is_some() {
            return Err(Error::illegal(format!(
                "primary constructor of '{}' cannot have a body or delegation call",
                self.name
            )));
        }
        self.primary_constructor = Some(constructor);
        Ok(self)
    }

    /// Set the superclass and its constructor arguments.
    pub fn superclass(
        mut self,
        superclass: TypeRef,
        arguments: impl IntoIterator<Item = CodeBlock>,
    ) -> Result<Self> {
        if matches!(self.kind, TypeKind::Interface | TypeKind::Enum | TypeKind::Annotation) {
            return Err(Error::illegal(format!(
                "{} '{}' cannot extend a class",
                self.kind.keyword(),
                self.name
            )));
        }
        self.superclass = Some(superclass);
        self.superclass_arguments = arguments.into_iter().collect();
        Ok(self)
    }

    /// Add a superinterface.
    pub fn superinterface(mut self, interface: TypeRef) -> Self {
        self.superinterfaces.push(interface);
        self
    }

    /// Add an enum entry.
    pub fn enum_constant(mut self, name: impl Into<String>, constant: EnumConstant) -> Result<Self> {
        let name = name.into();
        if self.kind != TypeKind::Enum {
            return Err(Error::illegal(format!(
                "enum constant '{}' requires an enum class, but '{}' is declared as {}",
                name,
                self.name,
                self.kind.keyword()
            )));
        }
        self.enum_constants.insert(name, constant);
        Ok(self)
    }

    /// Add a property. Abstract properties need an abstract container.
    pub fn property(mut self, property: PropertySpec) -> Result<Self> {
        if property.is_abstract() && !self.allows_abstract_members() {
            return Err(Error::illegal(format!(
                "abstract property '{}' requires '{}' to be abstract, sealed or an interface",
                property.name, self.name
            )));
        }
        self.properties.push(property);
        Ok(self)
    }

    /// Add a function or secondary constructor. Abstract functions need an
    /// abstract container.
    pub fn function(mut self, function: FunSpec) -> Result<Self> {
        if function.is_abstract() && !self.allows_abstract_members() {
            return Err(Error::illegal(format!(
                "abstract function '{}' requires '{}' to be abstract, sealed or an interface",
                function.name().unwrap_or("constructor"),
                self.name
            )));
        }
        if function.is_constructor() && !self.kind.has_constructors() {
            return Err(Error::illegal(format!(
                "{} '{}' cannot have constructors",
                self.kind.keyword(),
                self.name
            )));
        }
        self.functions.push(function);
        Ok(self)
    }

    /// Add a nested type.
    pub fn nested(mut self, ty: TypeSpec) -> Self {
        self.types.push(ty);
        self
    }

    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared kind.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Check if this is a companion object.
    pub fn is_companion(&self) -> bool {
        self.modifiers.contains(&KModifier::Companion)
    }

    /// Simple names of every type nested in this one, at any depth.
    pub(crate) fn collect_nested_names<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        for ty in &self.types {
            out.insert(ty.name());
            ty.collect_nested_names(out);
        }
    }

    fn allows_abstract_members(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Enum)
            || self.modifiers.contains(&KModifier::Abstract)
            || self.modifiers.contains(&KModifier::Sealed)
    }

    pub(crate) fn collect_classes(&self, out: &mut Vec<ClassName>) {
        for annotation in &self.annotations {
            annotation.collect_classes(out);
        }
        for variable in &self.type_variables {
            variable.collect_classes(out);
        }
        if let Some(constructor) = &self.primary_constructor {
            constructor.collect_classes(out);
        }
        if let Some(superclass) = &self.superclass {
            superclass.collect_classes(out);
        }
        for argument in &self.superclass_arguments {
            argument.collect_classes(out);
        }
        for interface in &self.superinterfaces {
            interface.collect_classes(out);
        }
        for constant in self.enum_constants.values() {
            constant.collect_classes(out);
        }
        for property in &self.properties {
            property.collect_classes(out);
        }
        for function in &self.functions {
            function.collect_classes(out);
        }
        for ty in &self.types {
            ty.collect_classes(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParameterSpec;

    fn int() -> TypeRef {
        TypeRef::class(ClassName::new("kotlin", "Int"))
    }

    #[test]
    fn test_primary_constructor_only_on_classes() {
        let constructor = FunSpec::constructor().parameter(ParameterSpec::new("x", int()));
        assert!(
            TypeSpec::class_builder("Point")
                .primary_constructor(constructor.clone())
                .is_ok()
        );
        let err = TypeSpec::interface_builder("Shape")
            .primary_constructor(constructor)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "interface 'Shape' cannot have a primary constructor"
        );
        assert!(
            TypeSpec::class_builder("Point")
                .primary_constructor(FunSpec::builder("init"))
                .is_err()
        );
    }

    #[test]
    fn test_abstract_members_need_abstract_container() {
        let area = FunSpec::builder("area")
            .modifier(KModifier::Abstract)
            .unwrap();
        assert!(TypeSpec::class_builder("Shape").function(area.clone()).is_err());
        assert!(
            TypeSpec::class_builder("Shape")
                .modifier(KModifier::Abstract)
                .unwrap()
                .function(area.clone())
                .is_ok()
        );
        assert!(TypeSpec::interface_builder("Shape").function(area).is_ok());

        let size = PropertySpec::builder("size", int())
            .modifier(KModifier::Abstract)
            .unwrap();
        assert!(TypeSpec::object_builder("Registry").property(size.clone()).is_err());
        assert!(
            TypeSpec::class_builder("Registry")
                .modifier(KModifier::Sealed)
                .unwrap()
                .property(size)
                .is_ok()
        );
    }

    #[test]
    fn test_enum_constants_only_on_enums() {
        let err = TypeSpec::object_builder("Colors")
            .enum_constant("RED", EnumConstant::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "enum constant 'RED' requires an enum class, but 'Colors' is declared as object"
        );
    }

    #[test]
    fn test_companion_modifier_only_on_objects() {
        assert!(TypeSpec::companion_object_builder().is_companion());
        assert!(
            TypeSpec::class_builder("Foo")
                .modifier(KModifier::Companion)
                .is_err()
        );
    }
}
