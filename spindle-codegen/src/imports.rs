//! Import and display-name resolution for one output file.
//!
//! Every class a file prints is reduced to its top-level class and given
//! exactly one display form: a simple name, an import alias, or the
//! fully-qualified name. Nested classes print as `<display>.Nested`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use indexmap::IndexMap;
use spindle_types::{Canonical, ClassName, NameLookup, escape_if_necessary};

/// One `import` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub class: ClassName,
    pub alias: Option<String>,
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import {}", self.class)?;
        if let Some(alias) = &self.alias {
            write!(f, " as {}", escape_if_necessary(alias))?;
        }
        Ok(())
    }
}

/// Display names for the classes of one file, plus its imports.
///
/// Classes the table does not know print fully qualified, so an empty
/// table behaves like [`Canonical`].
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    /// Top-level class -> display text (already escaped).
    names: IndexMap<ClassName, String>,
    imports: Vec<Import>,
}

impl NameTable {
    /// Imports sorted by canonical name.
    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// The display text chosen for a top-level class, if any.
    pub fn display_name(&self, class: &ClassName) -> Option<&str> {
        self.names.get(class).map(String::as_str)
    }
}

impl NameLookup for NameTable {
    fn lookup(&self, class: &ClassName) -> String {
        let Some(top) = self.names.get(&class.top_level()) else {
            return Canonical.lookup(class);
        };
        let mut display = top.clone();
        for nested in &class.simple_names()[1..] {
            display.push('.');
            display.push_str(&escape_if_necessary(nested));
        }
        display
    }
}

/// Decides how each referenced class is written in a file.
///
/// # Example
///
/// ```
/// use spindle_codegen::ImportResolver;
/// use spindle_types::{ClassName, NameLookup};
///
/// let a = ClassName::new("a.b", "Foo");
/// let c = ClassName::new("c.d", "Foo");
/// let names = ImportResolver::new("com.example").resolve([a.clone(), c.clone()]);
///
/// assert_eq!(names.lookup(&a), "BFoo");
/// assert_eq!(names.lookup(&c), "DFoo");
/// assert_eq!(names.imports()[0].to_string(), "import a.b.Foo as BFoo");
/// ```
#[derive(Debug, Clone)]
pub struct ImportResolver {
    package: String,
    default_packages: Vec<String>,
    local_names: BTreeSet<String>,
    nested_names: BTreeSet<String>,
}

impl ImportResolver {
    /// Create a resolver for a file in `package`, with `kotlin` as the only
    /// default-import package.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            default_packages: vec!["kotlin".to_string()],
            local_names: BTreeSet::new(),
            nested_names: BTreeSet::new(),
        }
    }

    /// Replace the packages visible without an import.
    pub fn default_packages(mut self, packages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.default_packages = packages.into_iter().map(Into::into).collect();
        self
    }

    /// Register a simple name declared by the file itself.
    pub fn local_name(mut self, name: impl Into<String>) -> Self {
        self.local_names.insert(name.into());
        self
    }

    /// Register simple names declared by the file itself.
    pub fn local_names(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.local_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Register simple names of types nested inside the file's declarations.
    ///
    /// Inside the enclosing type such a name means the nested type, so any
    /// top-level class sharing it prints fully qualified.
    pub fn nested_names(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.nested_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Build the name table for every class in `referenced`.
    pub fn resolve(&self, referenced: impl IntoIterator<Item = ClassName>) -> NameTable {
        let tops: BTreeSet<ClassName> = referenced.into_iter().map(|c| c.top_level()).collect();

        let mut by_simple_name: BTreeMap<String, Vec<ClassName>> = BTreeMap::new();
        for class in tops {
            by_simple_name
                .entry(class.simple_name().to_string())
                .or_default()
                .push(class);
        }

        // Aliases must not shadow any simple name the file can see.
        let mut taken: BTreeSet<String> = self.local_names.clone();
        taken.extend(self.nested_names.iter().cloned());
        taken.extend(by_simple_name.keys().cloned());

        let mut table = NameTable::default();
        for (simple_name, classes) in &by_simple_name {
            if self.nested_names.contains(simple_name) {
                for class in classes {
                    table.names.insert(class.clone(), Canonical.lookup(class));
                }
                continue;
            }

            if self.local_names.contains(simple_name) {
                for class in classes {
                    let display = if class.package() == self.package {
                        escape_if_necessary(simple_name)
                    } else {
                        Canonical.lookup(class)
                    };
                    table.names.insert(class.clone(), display);
                }
                continue;
            }

            if let [class] = classes.as_slice() {
                if !self.is_implicitly_visible(class) {
                    table.imports.push(Import {
                        class: class.clone(),
                        alias: None,
                    });
                }
                table
                    .names
                    .insert(class.clone(), escape_if_necessary(simple_name));
                continue;
            }

            match generate_aliases(classes, &taken) {
                Some(aliases) => {
                    for (class, alias) in classes.iter().zip(aliases) {
                        tracing::debug!(class = %class, alias = %alias, "aliasing conflicting import");
                        taken.insert(alias.clone());
                        table.names.insert(class.clone(), escape_if_necessary(&alias));
                        table.imports.push(Import {
                            class: class.clone(),
                            alias: Some(alias),
                        });
                    }
                }
                None => {
                    tracing::debug!(
                        simple_name = %simple_name,
                        "no import alias disambiguates, using qualified names"
                    );
                    for class in classes {
                        table.names.insert(class.clone(), Canonical.lookup(class));
                    }
                }
            }
        }

        table
            .imports
            .sort_by_key(|import| import.class.canonical_name());
        table
    }

    fn is_implicitly_visible(&self, class: &ClassName) -> bool {
        class.package().is_empty()
            || class.package() == self.package
            || self.default_packages.iter().any(|p| p == class.package())
    }
}

/// Build one alias per class from its trailing package segments, using the
/// shortest suffix length that makes all aliases distinct and unused.
fn generate_aliases(classes: &[ClassName], taken: &BTreeSet<String>) -> Option<Vec<String>> {
    let segments: Vec<Vec<String>> = classes
        .iter()
        .map(|class| {
            class
                .package()
                .split('.')
                .filter(|s| !s.is_empty() && *s != "Companion")
                .map(capitalize)
                .collect()
        })
        .collect();
    let longest = segments.iter().map(Vec::len).max().unwrap_or(0);

    for length in 1..=longest {
        let aliases: Vec<String> = classes
            .iter()
            .zip(&segments)
            .map(|(class, segments)| {
                let start = segments.len().saturating_sub(length);
                let mut alias = segments[start..].concat();
                alias.push_str(&capitalize(class.simple_name()));
                alias
            })
            .collect();

        let distinct: BTreeSet<&String> = aliases.iter().collect();
        if distinct.len() == aliases.len() && aliases.iter().all(|a| !taken.contains(a)) {
            return Some(aliases);
        }
    }
    None
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(table: &NameTable) -> Vec<String> {
        table.imports().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_unique_name_is_imported() {
        let list = ClassName::new("kotlin.collections", "List");
        let table = ImportResolver::new("com.example").resolve([list.clone(), list.clone()]);
        assert_eq!(table.lookup(&list), "List");
        assert_eq!(lines(&table), ["import kotlin.collections.List"]);
    }

    #[test]
    fn test_same_and_default_package_need_no_import() {
        let string = ClassName::new("kotlin", "String");
        let sibling = ClassName::new("com.example", "User");
        let table = ImportResolver::new("com.example").resolve([string.clone(), sibling.clone()]);
        assert_eq!(table.lookup(&string), "String");
        assert_eq!(table.lookup(&sibling), "User");
        assert!(table.imports().is_empty());
    }

    #[test]
    fn test_nested_classes_print_through_their_top_level() {
        let entry = ClassName::new("kotlin.collections", "Map").nested("Entry");
        let table = ImportResolver::new("com.example").resolve([entry.clone()]);
        assert_eq!(table.lookup(&entry), "Map.Entry");
        assert_eq!(lines(&table), ["import kotlin.collections.Map"]);
    }

    #[test]
    fn test_conflicting_names_get_aliases() {
        let a = ClassName::new("a.b", "Foo");
        let c = ClassName::new("c.d", "Foo");
        let table = ImportResolver::new("com.example").resolve([c.clone(), a.clone()]);
        assert_eq!(table.lookup(&a), "BFoo");
        assert_eq!(table.lookup(&c), "DFoo");
        assert_eq!(
            lines(&table),
            ["import a.b.Foo as BFoo", "import c.d.Foo as DFoo"]
        );
    }

    #[test]
    fn test_alias_suffix_grows_until_unique() {
        let a = ClassName::new("x.model", "Foo");
        let b = ClassName::new("y.model", "Foo");
        let table = ImportResolver::new("com.example").resolve([a.clone(), b.clone()]);
        assert_eq!(table.lookup(&a), "XModelFoo");
        assert_eq!(table.lookup(&b), "YModelFoo");
    }

    #[test]
    fn test_undecidable_conflict_falls_back_to_qualified_names() {
        let root = ClassName::new("", "Foo");
        let other = ClassName::new("Foo", "Foo");
        let table = ImportResolver::new("com.example").resolve([root.clone(), other.clone()]);
        assert_eq!(table.lookup(&root), "Foo");
        assert_eq!(table.lookup(&other), "Foo.Foo");
        assert!(table.imports().is_empty());
    }

    #[test]
    fn test_local_names_win() {
        let local = ClassName::new("com.example", "Result");
        let stdlib = ClassName::new("kotlin", "Result");
        let table = ImportResolver::new("com.example")
            .local_name("Result")
            .resolve([local.clone(), stdlib.clone()]);
        assert_eq!(table.lookup(&local), "Result");
        assert_eq!(table.lookup(&stdlib), "kotlin.Result");
        assert!(table.imports().is_empty());
    }

    #[test]
    fn test_nested_names_force_qualified_names() {
        let builder = ClassName::new("com.other", "Builder");
        let sibling = ClassName::new("com.example", "Builder");
        let own = ClassName::new("com.example", "Outer").nested("Builder");
        let table = ImportResolver::new("com.example")
            .local_name("Outer")
            .nested_names(["Builder"])
            .resolve([builder.clone(), sibling.clone(), own.clone()]);
        assert_eq!(table.lookup(&builder), "com.other.Builder");
        assert_eq!(table.lookup(&sibling), "com.example.Builder");
        assert_eq!(table.lookup(&own), "Outer.Builder");
        assert!(table.imports().is_empty());
    }

    #[test]
    fn test_alias_never_matches_nested_name() {
        let a = ClassName::new("a.b", "Foo");
        let c = ClassName::new("c.d", "Foo");
        let table = ImportResolver::new("com.example")
            .nested_names(["BFoo"])
            .resolve([a.clone(), c.clone()]);
        assert_eq!(table.lookup(&a), "ABFoo");
        assert_eq!(table.lookup(&c), "CDFoo");
    }

    #[test]
    fn test_alias_avoids_names_in_use() {
        let a = ClassName::new("a.b", "Foo");
        let c = ClassName::new("c.b", "Foo");
        let existing = ClassName::new("com.example", "BFoo");
        let table =
            ImportResolver::new("com.example").resolve([a.clone(), c.clone(), existing.clone()]);
        assert_eq!(table.lookup(&existing), "BFoo");
        assert_eq!(table.lookup(&a), "ABFoo");
        assert_eq!(table.lookup(&c), "CBFoo");
    }

    #[test]
    fn test_empty_table_is_canonical() {
        let class = ClassName::new("com.example", "Foo").nested("Bar");
        assert_eq!(NameTable::default().lookup(&class), "com.example.Foo.Bar");
    }
}
