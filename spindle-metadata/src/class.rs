//! Translation of raw declarations into specs.

use spindle_codegen::{
    EnumConstant, FileSpec, FunSpec, KModifier, ParameterSpec, PropertySpec, Statement,
    TypeAliasSpec, TypeSpec,
};
use spindle_types::{ClassName, CodeBlock, Result, TypeRef, TypeShape};

use crate::annotations::{annotation_set, literal};
use crate::names::class_name_from_path;
use crate::raw::{
    RawClass, RawClassKind, RawClassifier, RawConstructor, RawFile, RawFunction, RawModality,
    RawProperty, RawTypeAlias, RawValueParameter, RawVisibility,
};
use crate::resolver::TypeParameterResolver;
use crate::types::type_ref;

/// Where a member is declared; decides which modifiers are implicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    File,
    Class,
    Interface,
}

/// Translate a whole file: classes, then type aliases, properties and
/// functions, each in declaration order.
#[tracing::instrument(skip_all, fields(package = %raw.package, file = %raw.name))]
pub fn file_spec(raw: &RawFile) -> Result<FileSpec> {
    let resolver = TypeParameterResolver::empty(format!("file {}", raw.name));
    let mut file = FileSpec::builder(raw.package.replace('/', "."), &raw.name);
    for annotation in annotation_set(&raw.annotations)? {
        file = file.annotation(annotation);
    }
    for class in &raw.classes {
        file = file.add_type(class_spec(class, None)?);
    }
    for alias in &raw.type_aliases {
        file = file.add_type_alias(type_alias_spec(alias, &resolver)?);
    }
    for property in &raw.properties {
        file = file.add_property(property_spec(property, &resolver, Container::File, &[])?)?;
    }
    for function in &raw.functions {
        file = file.add_function(fun_spec(function, &resolver, Container::File)?)?;
    }
    tracing::debug!(members = file.members().len(), "translated file");
    Ok(file)
}

/// Translate a top-level class with its members, companion and nested
/// classes.
pub fn type_spec(raw: &RawClass) -> Result<TypeSpec> {
    class_spec(raw, None)
}

#[tracing::instrument(skip_all, fields(class = %raw.name))]
fn class_spec(raw: &RawClass, parent: Option<&TypeParameterResolver<'_>>) -> Result<TypeSpec> {
    let class_name = class_name_from_path(&raw.name)?;
    let name = class_name.simple_name();
    let resolver = TypeParameterResolver::new(
        format!("class {}", class_name.canonical_name()),
        &raw.type_parameters,
        parent,
    )?;
    let is_interface = raw.kind == RawClassKind::Interface;

    let mut spec = match raw.kind {
        RawClassKind::Class => TypeSpec::class_builder(name),
        RawClassKind::Interface => TypeSpec::interface_builder(name),
        RawClassKind::EnumClass => TypeSpec::enum_builder(name),
        RawClassKind::AnnotationClass => TypeSpec::annotation_builder(name),
        RawClassKind::Object => TypeSpec::object_builder(name),
        RawClassKind::CompanionObject if name == "Companion" => {
            TypeSpec::companion_object_builder()
        }
        RawClassKind::CompanionObject => TypeSpec::named_companion_object_builder(name),
    };
    for annotation in annotation_set(&raw.annotations)? {
        spec = spec.annotation(annotation);
    }

    if let Some(visibility) = visibility(raw.visibility) {
        spec = spec.modifier(visibility)?;
    }
    let implicit_modality =
        raw.modality == RawModality::Final || (is_interface && raw.modality == RawModality::Abstract);
    if !implicit_modality {
        spec = spec.modifier(modality(raw.modality))?;
    }
    for (flag, modifier) in [
        (raw.is_data, KModifier::Data),
        (raw.is_inner, KModifier::Inner),
        (raw.is_value, KModifier::Value),
        (raw.is_external, KModifier::External),
    ] {
        if flag {
            spec = spec.modifier(modifier)?;
        }
    }
    for variable in resolver.variables() {
        spec = spec.type_variable(variable.clone());
    }

    let superclass = raw.supertypes.iter().position(|supertype| {
        supertype.is_class && matches!(supertype.ty.classifier, RawClassifier::Class(_))
    });
    let extends_classes = matches!(
        raw.kind,
        RawClassKind::Class | RawClassKind::Object | RawClassKind::CompanionObject
    );
    for (index, supertype) in raw.supertypes.iter().enumerate() {
        let ty = type_ref(&supertype.ty, &resolver)?;
        if superclass == Some(index) {
            if extends_classes && !is_any(&ty) {
                spec = spec.superclass(ty, [])?;
            }
        } else if !is_any(&ty) {
            spec = spec.superinterface(ty);
        }
    }

    let mut constructor_parameters = Vec::new();
    for constructor in &raw.constructors {
        if constructor.is_primary {
            let is_enum = raw.kind == RawClassKind::EnumClass;
            let primary = constructor_spec(constructor, &resolver, is_enum)?;
            constructor_parameters = primary.parameter_specs().to_vec();
            if !is_implicit_constructor(&primary) {
                spec = spec.primary_constructor(primary)?;
            }
        } else {
            spec = spec.function(constructor_spec(constructor, &resolver, false)?)?;
        }
    }

    for entry in &raw.enum_entries {
        spec = spec.enum_constant(entry, EnumConstant::new())?;
    }

    let container = if is_interface {
        Container::Interface
    } else {
        Container::Class
    };
    for property in &raw.properties {
        let property = property_spec(property, &resolver, container, &constructor_parameters)?;
        spec = spec.property(property)?;
    }
    for function in &raw.functions {
        spec = spec.function(fun_spec(function, &resolver, container)?)?;
    }

    if let Some(companion) = &raw.companion {
        spec = spec.nested(class_spec(companion, Some(&resolver))?);
    }
    for nested in &raw.nested_classes {
        spec = spec.nested(class_spec(nested, Some(&resolver))?);
    }
    Ok(spec)
}

/// A primary constructor with nothing to print is left out so the header
/// reads `class Foo` instead of `class Foo()`.
fn is_implicit_constructor(spec: &FunSpec) -> bool {
    spec.annotation_refs().is_empty()
        && spec.parameter_specs().is_empty()
        && spec.modifier_set().is_empty()
}

fn constructor_spec(
    raw: &RawConstructor,
    resolver: &TypeParameterResolver<'_>,
    drop_private: bool,
) -> Result<FunSpec> {
    let mut constructor = FunSpec::constructor();
    for annotation in annotation_set(&raw.annotations)? {
        constructor = constructor.annotation(annotation);
    }
    // Enum constructors are always private.
    let visibility = match raw.visibility {
        RawVisibility::Private if drop_private => None,
        other => visibility(other),
    };
    if let Some(visibility) = visibility {
        constructor = constructor.modifier(visibility)?;
    }
    for parameter in &raw.value_parameters {
        constructor = constructor.parameter(parameter_spec(parameter, resolver)?);
    }
    Ok(constructor)
}

#[tracing::instrument(skip_all, fields(function = %raw.name))]
fn fun_spec(
    raw: &RawFunction,
    parent: &TypeParameterResolver<'_>,
    container: Container,
) -> Result<FunSpec> {
    let hint = format!("fun {}", raw.name);
    let resolver = TypeParameterResolver::new(hint, &raw.type_parameters, Some(parent))?;
    let mut function = FunSpec::builder(&raw.name);
    for annotation in annotation_set(&raw.annotations)? {
        function = function.annotation(annotation);
    }

    if let Some(visibility) = visibility(raw.visibility) {
        function = function.modifier(visibility)?;
    }
    if let Some(modality) = member_modality(raw.modality, raw.is_override, container) {
        function = function.modifier(modality)?;
    }
    for (flag, modifier) in [
        (raw.is_override, KModifier::Override),
        (raw.is_external, KModifier::External),
        (raw.is_tailrec, KModifier::Tailrec),
        (raw.is_suspend, KModifier::Suspend),
        (raw.is_inline, KModifier::Inline),
        (raw.is_infix, KModifier::Infix),
        (raw.is_operator, KModifier::Operator),
    ] {
        if flag {
            function = function.modifier(modifier)?;
        }
    }

    for variable in resolver.variables() {
        function = function.type_variable(variable.clone())?;
    }
    if let Some(receiver) = &raw.receiver_type {
        function = function.receiver(type_ref(receiver, &resolver)?)?;
    }
    for parameter in &raw.value_parameters {
        function = function.parameter(parameter_spec(parameter, &resolver)?);
    }
    function = function.returns(type_ref(&raw.return_type, &resolver)?)?;

    if raw.modality != RawModality::Abstract && !raw.is_external {
        function = function.statement(Statement::not_implemented())?;
    }
    Ok(function)
}

fn parameter_spec(
    raw: &RawValueParameter,
    resolver: &TypeParameterResolver<'_>,
) -> Result<ParameterSpec> {
    let element = raw.vararg_element_type.as_ref().unwrap_or(&raw.ty);
    let mut parameter = ParameterSpec::new(&raw.name, type_ref(element, resolver)?);
    for annotation in annotation_set(&raw.annotations)? {
        parameter = parameter.annotation(annotation);
    }
    if raw.vararg_element_type.is_some() {
        parameter = parameter.vararg();
    }
    if raw.is_crossinline {
        parameter = parameter.modifier(KModifier::Crossinline)?;
    }
    if raw.is_noinline {
        parameter = parameter.modifier(KModifier::Noinline)?;
    }
    if raw.declares_default {
        parameter = parameter.default_value(not_implemented());
    }
    Ok(parameter)
}

#[tracing::instrument(skip_all, fields(property = %raw.name))]
fn property_spec(
    raw: &RawProperty,
    parent: &TypeParameterResolver<'_>,
    container: Container,
    constructor_parameters: &[ParameterSpec],
) -> Result<PropertySpec> {
    let hint = format!("val {}", raw.name);
    let resolver = TypeParameterResolver::new(hint, &raw.type_parameters, Some(parent))?;
    let ty = type_ref(&raw.return_type, &resolver)?;
    let mut property = PropertySpec::builder(&raw.name, ty.clone());
    if raw.is_var {
        property = property.mutable();
    }
    for annotation in annotation_set(&raw.annotations)? {
        property = property.annotation(annotation);
    }

    if let Some(visibility) = visibility(raw.visibility) {
        property = property.modifier(visibility)?;
    }
    if let Some(modality) = member_modality(raw.modality, raw.is_override, container) {
        property = property.modifier(modality)?;
    }
    for (flag, modifier) in [
        (raw.is_override, KModifier::Override),
        (raw.is_const, KModifier::Const),
        (raw.is_lateinit, KModifier::Lateinit),
    ] {
        if flag {
            property = property.modifier(modifier)?;
        }
    }

    for variable in resolver.variables() {
        property = property.type_variable(variable.clone());
    }
    if let Some(receiver) = &raw.receiver_type {
        property = property.receiver(type_ref(receiver, &resolver)?);
    }

    let from_constructor = constructor_parameters
        .iter()
        .any(|parameter| parameter.name() == raw.name && parameter.ty() == &ty);
    // Extension properties and interface members have no backing field.
    let needs_accessors = raw.receiver_type.is_some() || container == Container::Interface;

    let has_value = raw.modality != RawModality::Abstract && !raw.is_lateinit;
    if let Some(constant) = &raw.constant {
        property = property.initializer(literal(constant)?);
    } else if from_constructor {
        property = property.initializer(CodeBlock::of(&raw.name));
    } else if has_value && needs_accessors {
        property = property.getter(not_implemented());
        if raw.is_var {
            property = property.setter(not_implemented());
        }
    } else if has_value && ty.is_nullable() {
        property = property.initializer(CodeBlock::of("null"));
    } else if has_value {
        property = property.initializer(not_implemented());
    }
    Ok(property)
}

fn type_alias_spec(
    raw: &RawTypeAlias,
    parent: &TypeParameterResolver<'_>,
) -> Result<TypeAliasSpec> {
    let hint = format!("typealias {}", raw.name);
    let resolver = TypeParameterResolver::new(hint, &raw.type_parameters, Some(parent))?;
    let mut alias = TypeAliasSpec::builder(&raw.name, type_ref(&raw.underlying_type, &resolver)?);
    for annotation in annotation_set(&raw.annotations)? {
        alias = alias.annotation(annotation);
    }
    if let Some(visibility) = visibility(raw.visibility) {
        alias = alias.modifier(visibility)?;
    }
    for variable in resolver.variables() {
        alias = alias.type_variable(variable.clone());
    }
    Ok(alias)
}

fn visibility(visibility: RawVisibility) -> Option<KModifier> {
    match visibility {
        RawVisibility::Public => None,
        RawVisibility::Internal => Some(KModifier::Internal),
        RawVisibility::Protected => Some(KModifier::Protected),
        RawVisibility::Private => Some(KModifier::Private),
    }
}

fn modality(modality: RawModality) -> KModifier {
    match modality {
        RawModality::Final => KModifier::Final,
        RawModality::Open => KModifier::Open,
        RawModality::Abstract => KModifier::Abstract,
        RawModality::Sealed => KModifier::Sealed,
    }
}

/// The modality keyword a member needs, or `None` when the container
/// already implies it: `final` unless overriding, `open` when overriding
/// or inside an interface, and `abstract` inside an interface.
fn member_modality(raw: RawModality, is_override: bool, container: Container) -> Option<KModifier> {
    let in_interface = container == Container::Interface;
    let implicit = match raw {
        RawModality::Final => !is_override,
        RawModality::Open => is_override || in_interface,
        RawModality::Abstract => in_interface,
        RawModality::Sealed => false,
    };
    (!implicit).then(|| modality(raw))
}

fn not_implemented() -> CodeBlock {
    CodeBlock::of("throw ")
        .add_type(ClassName::new("kotlin", "NotImplementedError").into())
        .add_text("()")
}

fn is_any(ty: &TypeRef) -> bool {
    matches!(ty.shape(), TypeShape::Named { class, .. } if *class == ClassName::new("kotlin", "Any"))
}
