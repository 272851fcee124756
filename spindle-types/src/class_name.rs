//! Fully-qualified class names.

use std::fmt;

use crate::{Canonical, Error, NameLookup, Result, TypeRef};

/// A fully-qualified class name: a package plus a chain of simple names.
///
/// The chain always holds at least one name, and no name is empty. Nested
/// classes extend the chain (`Map.Entry` is `["Map", "Entry"]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    /// Create a top-level class name.
    ///
    /// `simple_name` must not be empty; names from untrusted input go
    /// through [`ClassName::from_parts`].
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        let simple_name = simple_name.into();
        debug_assert!(!simple_name.is_empty(), "class simple name must not be empty");
        Self {
            package: package.into(),
            simple_names: vec![simple_name],
        }
    }

    /// Create a class name from a package and a full simple-name chain.
    ///
    /// Returns `None` when the chain is empty or contains an empty name.
    pub fn from_parts(
        package: impl Into<String>,
        simple_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Option<Self> {
        let simple_names: Vec<String> = simple_names.into_iter().map(Into::into).collect();
        if simple_names.is_empty() || simple_names.iter().any(String::is_empty) {
            return None;
        }
        Some(Self {
            package: package.into(),
            simple_names,
        })
    }

    /// Create the class name of a class nested in this one.
    ///
    /// `name` must not be empty; see [`ClassName::try_nested`].
    pub fn nested(&self, name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "nested class name must not be empty");
        let mut simple_names = self.simple_names.clone();
        simple_names.push(name);
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    /// Create the class name of a nested class, rejecting an empty name.
    pub fn try_nested(&self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::unsupported_shape(format!(
                "nested class name in '{}' must not be empty",
                self.canonical_name()
            )));
        }
        Ok(self.nested(name))
    }

    /// The package, dot-separated. Empty for the default package.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The simple-name chain, outermost first.
    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    /// The innermost simple name.
    pub fn simple_name(&self) -> &str {
        // The chain is never empty.
        self.simple_names.last().map(String::as_str).unwrap_or_default()
    }

    /// The enclosing class, if this is a nested class.
    pub fn enclosing(&self) -> Option<Self> {
        if self.simple_names.len() < 2 {
            return None;
        }
        Some(Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..self.simple_names.len() - 1].to_vec(),
        })
    }

    /// The outermost class of this name.
    pub fn top_level(&self) -> Self {
        Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..1].to_vec(),
        }
    }

    /// Check if this is a top-level class.
    pub fn is_top_level(&self) -> bool {
        self.simple_names.len() == 1
    }

    /// The dotted canonical name (`com.example.Outer.Inner`).
    pub fn canonical_name(&self) -> String {
        if self.package.is_empty() {
            self.simple_names.join(".")
        } else {
            format!("{}.{}", self.package, self.simple_names.join("."))
        }
    }

    /// Parameterize this class with type arguments.
    pub fn parameterized_by(&self, args: impl IntoIterator<Item = TypeRef>) -> TypeRef {
        TypeRef::parameterized(self.clone(), args.into_iter().collect())
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Canonical.lookup(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_names_are_rejected() {
        assert!(ClassName::from_parts("com.example", [""]).is_none());
        assert!(ClassName::from_parts("com.example", Vec::<String>::new()).is_none());

        let outer = ClassName::new("com.example", "Outer");
        let err = outer.try_nested("").unwrap_err();
        assert!(matches!(err, Error::UnsupportedShape { .. }));
        assert_eq!(
            outer.try_nested("Inner").unwrap(),
            ClassName::from_parts("com.example", ["Outer", "Inner"]).unwrap()
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "class simple name must not be empty")]
    fn test_new_with_empty_name_panics_in_debug() {
        let _ = ClassName::new("com.example", "");
    }

    #[test]
    fn test_canonical_name() {
        let entry = ClassName::new("kotlin.collections", "Map").nested("Entry");
        assert_eq!(entry.canonical_name(), "kotlin.collections.Map.Entry");
        assert_eq!(entry.simple_name(), "Entry");
        assert_eq!(entry.top_level(), ClassName::new("kotlin.collections", "Map"));
        assert!(!entry.is_top_level());
    }

    #[test]
    fn test_enclosing() {
        let entry = ClassName::new("kotlin.collections", "Map").nested("Entry");
        assert_eq!(
            entry.enclosing(),
            Some(ClassName::new("kotlin.collections", "Map"))
        );
        assert_eq!(ClassName::new("a", "B").enclosing(), None);
    }

    #[test]
    fn test_from_parts_rejects_empty_names() {
        assert!(ClassName::from_parts("a", Vec::<String>::new()).is_none());
        assert!(ClassName::from_parts("a", ["Foo", ""]).is_none());
        let name = ClassName::from_parts("a.b", ["Foo", "Bar"]).unwrap();
        assert_eq!(name.canonical_name(), "a.b.Foo.Bar");
    }

    #[test]
    fn test_default_package() {
        let name = ClassName::new("", "NoPackage");
        assert_eq!(name.canonical_name(), "NoPackage");
        assert_eq!(name.to_string(), "NoPackage");
    }
}
