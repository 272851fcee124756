//! Type alias unwrapping.

use std::collections::BTreeMap;

use crate::{AnnotationRef, TypeRef, TypeShape, TypeVariable};

/// Union two annotation lists, dropping duplicates.
///
/// The result is sorted by rendered text so that the same set of
/// annotations always prints in the same order.
pub fn union_annotations(a: &[AnnotationRef], b: &[AnnotationRef]) -> Vec<AnnotationRef> {
    let mut union = BTreeMap::new();
    for annotation in a.iter().chain(b) {
        union
            .entry(annotation.to_string())
            .or_insert_with(|| annotation.clone());
    }
    union.into_values().collect()
}

impl TypeRef {
    /// Replace a type alias reference with the type it stands for.
    ///
    /// Nullability and annotations accumulate across every alias layer: the
    /// result is nullable if any layer is, and carries the union of all
    /// layers' annotations. Type variables unwrap their bounds instead.
    /// References that are not aliases are returned unchanged, so
    /// `t.unwrap_alias().unwrap_alias() == t.unwrap_alias()`.
    ///
    /// # Example
    ///
    /// ```
    /// use spindle_types::{ClassName, TypeRef};
    ///
    /// let string = TypeRef::class(ClassName::new("kotlin", "String")).nullable();
    /// let alias = TypeRef::class(ClassName::new("com.example", "Name"))
    ///     .with_alias(string.clone())
    ///     .unwrap();
    ///
    /// assert_eq!(alias.unwrap_alias(), string);
    /// ```
    pub fn unwrap_alias(&self) -> TypeRef {
        if let TypeShape::Variable(variable) = self.shape() {
            let unwrapped = TypeVariable {
                bounds: variable.bounds.iter().map(TypeRef::unwrap_alias).collect(),
                ..variable.clone()
            };
            return TypeRef::type_variable(unwrapped)
                .with_nullable(self.is_nullable())
                .with_annotations(self.annotations().to_vec());
        }

        match self.alias_expansion() {
            Some(expansion) => {
                let nested = expansion.unwrap_alias();
                let nullable = self.is_nullable() || nested.is_nullable();
                let annotations = union_annotations(self.annotations(), nested.annotations());
                nested
                    .with_nullable(nullable)
                    .with_annotations(annotations)
            }
            None => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClassName, CodeBlock};

    fn class(package: &str, name: &str) -> TypeRef {
        TypeRef::class(ClassName::new(package, name))
    }

    fn annotation(name: &str) -> AnnotationRef {
        AnnotationRef::new(ClassName::new("com.example", name))
    }

    fn alias(name: &str, expansion: TypeRef) -> TypeRef {
        class("com.example", name).with_alias(expansion).unwrap()
    }

    #[test]
    fn test_non_alias_is_identity() {
        let list = ClassName::new("kotlin.collections", "List")
            .parameterized_by([class("kotlin", "String")]);
        assert_eq!(list.unwrap_alias(), list);
        assert_eq!(TypeRef::star().unwrap_alias(), TypeRef::star());
    }

    #[test]
    fn test_nullability_is_monotonic() {
        let nullable_alias = alias("A", class("kotlin", "String")).nullable();
        assert!(nullable_alias.unwrap_alias().is_nullable());

        let nullable_expansion = alias("B", class("kotlin", "String").nullable());
        assert!(nullable_expansion.unwrap_alias().is_nullable());

        let neither = alias("C", class("kotlin", "String"));
        assert!(!neither.unwrap_alias().is_nullable());
    }

    #[test]
    fn test_nullability_through_multiple_layers() {
        let inner = alias("Inner", class("kotlin", "String").nullable());
        let outer = alias("Outer", inner);
        let unwrapped = outer.unwrap_alias();
        assert!(unwrapped.is_nullable());
        assert_eq!(unwrapped.class_name(), Some(&ClassName::new("kotlin", "String")));
    }

    #[test]
    fn test_annotations_are_a_sorted_union() {
        let expansion = class("kotlin", "String")
            .annotated(annotation("Zeta"))
            .annotated(annotation("Alpha"));
        let reference = alias("Name", expansion)
            .annotated(annotation("Alpha"))
            .annotated(annotation("Mid"));

        let unwrapped = reference.unwrap_alias();
        let names: Vec<_> = unwrapped
            .annotations()
            .iter()
            .map(|a| a.class().simple_name().to_string())
            .collect();
        assert_eq!(names, ["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_unwrap_is_idempotent() {
        let inner = alias("Inner", class("kotlin", "Int").annotated(annotation("B")));
        let outer = alias("Outer", inner).nullable().annotated(annotation("A"));
        let once = outer.unwrap_alias();
        assert_eq!(once.unwrap_alias(), once);
    }

    #[test]
    fn test_type_variable_unwraps_bounds() {
        let bound = alias("Name", class("kotlin", "String"));
        let variable = TypeRef::type_variable(TypeVariable::new("T").bound(bound)).nullable();
        let unwrapped = variable.unwrap_alias();

        match unwrapped.shape() {
            TypeShape::Variable(v) => {
                assert_eq!(v.bounds, vec![class("kotlin", "String")]);
            }
            other => panic!("expected a type variable, got {:?}", other),
        }
        assert!(unwrapped.is_nullable());
        assert_eq!(unwrapped.unwrap_alias(), unwrapped);
    }

    #[test]
    fn test_union_deduplicates_by_rendered_text() {
        let a = annotation("A").member("value", CodeBlock::of("1"));
        let same = annotation("A").member("value", CodeBlock::of("1"));
        let different = annotation("A").member("value", CodeBlock::of("2"));
        let union = union_annotations(&[a.clone()], &[same, different.clone()]);
        assert_eq!(union, vec![a, different]);
    }
}
