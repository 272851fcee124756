//! Type parameter resolution.

use indexmap::IndexMap;
use spindle_types::{Error, Result, TypeVariable};

use crate::raw::{RawTypeParameter, TypeParameterId};
use crate::types::type_variable;

/// Maps the type parameter ids of one declaration to type variables,
/// falling back to the enclosing declaration's resolver.
///
/// Built in two passes so that bounds can mention the parameter itself or
/// a sibling: every id first maps to a bare variable, then each entry is
/// replaced, in declaration order, by the variable with resolved bounds.
///
/// # Example
///
/// ```
/// use spindle_metadata::{RawType, RawTypeParameter, TypeParameterId, TypeParameterResolver};
///
/// // class Node<T : Comparable<T>>
/// let t = RawTypeParameter::new(0, "T")
///     .bound(RawType::class("kotlin/Comparable").argument(RawType::parameter(0)));
/// let resolver = TypeParameterResolver::new("class Node", &[t], None).unwrap();
///
/// let variable = resolver.get(&TypeParameterId::Index(0)).unwrap();
/// assert_eq!(variable.bounds[0].to_string(), "kotlin.Comparable<T>");
/// ```
#[derive(Debug)]
pub struct TypeParameterResolver<'p> {
    hint: String,
    parameters: IndexMap<TypeParameterId, TypeVariable>,
    parent: Option<&'p TypeParameterResolver<'p>>,
}

impl TypeParameterResolver<'static> {
    /// A resolver that knows no parameters.
    pub fn empty(hint: impl Into<String>) -> Self {
        Self {
            hint: hint.into(),
            parameters: IndexMap::new(),
            parent: None,
        }
    }
}

impl<'p> TypeParameterResolver<'p> {
    /// Build the resolver for a declaration named by `hint`.
    pub fn new(
        hint: impl Into<String>,
        parameters: &[RawTypeParameter],
        parent: Option<&'p TypeParameterResolver<'p>>,
    ) -> Result<Self> {
        let mut resolver = Self {
            hint: hint.into(),
            parameters: IndexMap::new(),
            parent,
        };
        for parameter in parameters {
            resolver
                .parameters
                .insert(parameter.id.clone(), TypeVariable::new(&parameter.name));
        }
        for parameter in parameters {
            let variable = type_variable(parameter, &resolver)?;
            resolver.parameters.insert(parameter.id.clone(), variable);
        }
        Ok(resolver)
    }

    /// Look up `id` here, then in the enclosing declarations.
    pub fn get(&self, id: &TypeParameterId) -> Result<TypeVariable> {
        match self.lookup(id) {
            Some(variable) => {
                tracing::trace!(%id, name = %variable.name, "resolved type parameter");
                Ok(variable.clone())
            }
            None => Err(Error::MissingTypeArgument {
                id: id.to_string(),
                hint: self.hint.clone(),
                known: self.known_ids().join(", "),
            }),
        }
    }

    /// Variables declared by this declaration, in order.
    pub fn variables(&self) -> impl Iterator<Item = &TypeVariable> {
        self.parameters.values()
    }

    fn lookup(&self, id: &TypeParameterId) -> Option<&TypeVariable> {
        self.parameters
            .get(id)
            .or_else(|| self.parent.and_then(|parent| parent.lookup(id)))
    }

    fn known_ids(&self) -> Vec<String> {
        let mut known: Vec<String> = self.parameters.keys().map(ToString::to_string).collect();
        if let Some(parent) = self.parent {
            known.extend(parent.known_ids());
        }
        known
    }
}

#[cfg(test)]
mod tests {
    use spindle_types::TypeShape;

    use super::*;
    use crate::raw::RawType;

    #[test]
    fn test_sibling_bounds() {
        // <K : V, V : Any>
        let parameters = [
            RawTypeParameter::new(0, "K").bound(RawType::parameter(1)),
            RawTypeParameter::new(1, "V").bound(RawType::class("kotlin/Any")),
        ];
        let resolver = TypeParameterResolver::new("fun pick", &parameters, None).unwrap();
        let names: Vec<_> = resolver.variables().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["K", "V"]);

        let k = resolver.get(&TypeParameterId::Index(0)).unwrap();
        assert!(matches!(
            k.bounds[0].shape(),
            TypeShape::Variable(v) if v.name == "V" && v.bounds.is_empty()
        ));
    }

    #[test]
    fn test_parent_fallback() {
        let class = TypeParameterResolver::new(
            "class Box",
            &[RawTypeParameter::new(0, "T")],
            None,
        )
        .unwrap();
        let function = TypeParameterResolver::new(
            "fun map",
            &[RawTypeParameter::new(1, "R").bound(RawType::parameter(0))],
            Some(&class),
        )
        .unwrap();
        assert_eq!(function.get(&TypeParameterId::Index(0)).unwrap().name, "T");
        assert_eq!(function.get(&TypeParameterId::Index(1)).unwrap().bounds[0].to_string(), "T");
    }

    #[test]
    fn test_missing_parameter_names_known_ids() {
        let class = TypeParameterResolver::new(
            "class Box",
            &[RawTypeParameter::new(0, "T")],
            None,
        )
        .unwrap();
        let function = TypeParameterResolver::new(
            "fun map",
            &[RawTypeParameter::new(1, "R")],
            Some(&class),
        )
        .unwrap();
        let err = function.get(&TypeParameterId::Index(7)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "no type argument found for 7! Analyzed fun map with known parameters [1, 0]"
        );
    }

    #[test]
    fn test_empty_resolver() {
        let resolver = TypeParameterResolver::empty("file Main");
        assert!(resolver.get(&TypeParameterId::Name("T".into())).is_err());
        assert_eq!(resolver.variables().count(), 0);
    }
}
