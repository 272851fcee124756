//! TypeRef construction from raw metadata types.

use spindle_types::{
    ClassName, Error, FunctionType, Result, TypeRef, TypeShape, TypeVariable, union_annotations,
};

use crate::annotations::annotation_set;
use crate::names::class_name_from_path;
use crate::raw::{RawClassifier, RawProjection, RawType, RawTypeParameter, RawVariance};
use crate::resolver::TypeParameterResolver;

const EXTENSION_FUNCTION_TYPE: &str = "kotlin/ExtensionFunctionType";

/// Build the source-level reference for a metadata type.
///
/// Function classes (`kotlin.Function2<A, B, R>`) become function types,
/// suspending ones drop their trailing continuation and `Any?` arguments,
/// and a type written through a type alias comes back as the alias with
/// its expansion attached.
///
/// # Example
///
/// ```
/// use spindle_metadata::{RawType, TypeParameterResolver, type_ref};
///
/// let raw = RawType::class("kotlin/Function1")
///     .argument(RawType::class("kotlin/String"))
///     .argument(RawType::class("kotlin/Unit"));
/// let resolver = TypeParameterResolver::empty("example");
/// assert_eq!(
///     type_ref(&raw, &resolver).unwrap().to_string(),
///     "(kotlin.String) -> kotlin.Unit"
/// );
/// ```
pub fn type_ref(raw: &RawType, resolver: &TypeParameterResolver<'_>) -> Result<TypeRef> {
    if let Some(upper_bound) = &raw.flexible_upper_bound {
        return Ok(TypeRef::producer_of(type_ref(upper_bound, resolver)?));
    }
    if let Some(outer) = &raw.outer_type {
        return type_ref(outer, resolver);
    }

    let arguments = raw
        .arguments
        .iter()
        .map(|argument| projection(argument, resolver))
        .collect::<Result<Vec<_>>>()?;

    let ty = match &raw.classifier {
        RawClassifier::TypeParameter(id) => TypeRef::type_variable(resolver.get(id)?),
        RawClassifier::TypeAlias(path) => parameterized(class_name_from_path(path)?, arguments),
        RawClassifier::Class(path) => {
            let class = class_name_from_path(path)?;
            match function_arity(&class)? {
                Some(_) if !arguments.is_empty() => function_type(raw, arguments)?,
                _ => parameterized(class, arguments),
            }
        }
    };

    let expansion = ty
        .with_nullable(raw.nullable)
        .with_annotations(annotation_set(&raw.annotations)?);

    let Some(abbreviated) = &raw.abbreviated_type else {
        return Ok(expansion);
    };
    let alias = type_ref(abbreviated, resolver)?;
    let nullable = alias.is_nullable() || expansion.is_nullable();
    let annotations = union_annotations(alias.annotations(), expansion.annotations());
    alias
        .with_nullable(nullable)
        .with_annotations(annotations)
        .with_alias(expansion)
}

/// Build the declaration of a type parameter; bounds resolve through
/// `resolver`. A lone `Any?` bound is the implicit default and is dropped.
pub fn type_variable(
    raw: &RawTypeParameter,
    resolver: &TypeParameterResolver<'_>,
) -> Result<TypeVariable> {
    let mut variable = TypeVariable::new(&raw.name).variance(raw.variance.into());
    for bound in &raw.upper_bounds {
        let bound = type_ref(bound, resolver)?;
        if !is_nullable_any(&bound) {
            variable = variable.bound(bound);
        }
    }
    for annotation in annotation_set(&raw.annotations)? {
        variable = variable.annotated(annotation);
    }
    if raw.reified {
        variable = variable.reified();
    }
    Ok(variable)
}

fn projection(raw: &RawProjection, resolver: &TypeParameterResolver<'_>) -> Result<TypeRef> {
    match raw {
        RawProjection::Star => Ok(TypeRef::star()),
        RawProjection::Type { variance, ty } => {
            let ty = type_ref(ty, resolver)?;
            Ok(match variance {
                RawVariance::Invariant => ty,
                RawVariance::In => TypeRef::consumer_of(ty),
                RawVariance::Out => TypeRef::producer_of(ty),
            })
        }
    }
}

fn parameterized(class: ClassName, arguments: Vec<TypeRef>) -> TypeRef {
    if arguments.is_empty() {
        TypeRef::class(class)
    } else {
        TypeRef::parameterized(class, arguments)
    }
}

/// The arity of `kotlin.FunctionN` classes, `None` for other classes.
fn function_arity(class: &ClassName) -> Result<Option<usize>> {
    if class.package() != "kotlin" || !class.is_top_level() {
        return Ok(None);
    }
    let Some(suffix) = class.simple_name().strip_prefix("Function") else {
        return Ok(None);
    };
    if suffix == "N" {
        return Err(Error::unimplemented_arity(class.canonical_name()));
    }
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    Ok(suffix.parse().ok())
}

fn function_type(raw: &RawType, mut arguments: Vec<TypeRef>) -> Result<TypeRef> {
    let returns = if raw.suspend {
        // (P1, ..., Continuation<R>, Any?)
        if arguments.len() < 2 {
            return Err(Error::unsupported_shape(
                "suspending function type is missing its continuation argument",
            ));
        }
        arguments.pop();
        match arguments.pop().map(|continuation| continuation.shape().clone()) {
            Some(TypeShape::Parameterized { mut args, .. }) if args.len() == 1 => args.remove(0),
            _ => {
                return Err(Error::unsupported_shape(
                    "continuation of a suspending function type must have exactly one type argument",
                ));
            }
        }
    } else {
        match arguments.pop() {
            Some(returns) => returns,
            None => return Err(Error::unsupported_shape("function type has no return type")),
        }
    };

    let is_extension = raw.extension
        || raw
            .annotations
            .iter()
            .any(|annotation| annotation.class_name == EXTENSION_FUNCTION_TYPE);

    let function = if is_extension {
        if arguments.is_empty() {
            return Err(Error::unsupported_shape(
                "extension function type has no receiver argument",
            ));
        }
        let receiver = arguments.remove(0);
        FunctionType::new(arguments, returns).receiver(receiver)
    } else {
        FunctionType::new(arguments, returns)
    };
    Ok(TypeRef::function(function.suspending(raw.suspend)))
}

fn is_nullable_any(ty: &TypeRef) -> bool {
    ty.is_nullable()
        && ty.annotations().is_empty()
        && matches!(ty.shape(), TypeShape::Named { class, alias: None } if *class == ClassName::new("kotlin", "Any"))
}
