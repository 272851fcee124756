//! Source files.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use spindle_types::{AnnotationRef, ClassName, Error, Result};

use super::{FunSpec, PropertySpec, TypeAliasSpec, TypeSpec};
use crate::{CodeBuilder, EmitConfig, EmitContext, ImportResolver};

/// A top-level declaration of a file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileMember {
    Type(TypeSpec),
    Function(FunSpec),
    Property(PropertySpec),
    TypeAlias(TypeAliasSpec),
}

impl FileMember {
    fn declared_type_name(&self) -> Option<&str> {
        match self {
            Self::Type(ty) => Some(ty.name()),
            Self::TypeAlias(alias) => Some(alias.name()),
            Self::Function(_) | Self::Property(_) => None,
        }
    }

    fn collect_classes(&self, out: &mut Vec<ClassName>) {
        match self {
            Self::Type(ty) => ty.collect_classes(out),
            Self::Function(function) => function.collect_classes(out),
            Self::Property(property) => property.collect_classes(out),
            Self::TypeAlias(alias) => alias.collect_classes(out),
        }
    }
}

/// One output file: a package, its imports and its declarations.
///
/// Rendering happens entirely in memory; sinks receive either the whole
/// file or nothing.
///
/// # Example
///
/// ```
/// use spindle_codegen::{FileSpec, TypeSpec};
///
/// let file = FileSpec::builder("com.example", "Empty")
///     .add_type(TypeSpec::object_builder("Empty"));
/// assert_eq!(file.render().unwrap(), "package com.example\n\nobject Empty\n");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FileSpec {
    pub(crate) package: String,
    pub(crate) name: String,
    pub(crate) comment: Option<String>,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) members: Vec<FileMember>,
    pub(crate) config: EmitConfig,
}

impl FileSpec {
    /// Start a file named `name` (without extension) in `package`.
    pub fn builder(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            comment: None,
            annotations: Vec::new(),
            members: Vec::new(),
            config: EmitConfig::default(),
        }
    }

    /// Add a `//` comment under the configured header.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Add a file annotation (`@file:...`).
    pub fn annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Use `config` when rendering.
    pub fn config(mut self, config: EmitConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a top-level type.
    pub fn add_type(self, ty: TypeSpec) -> Self {
        self.member(FileMember::Type(ty))
    }

    /// Add a top-level function.
    pub fn add_function(self, function: FunSpec) -> Result<Self> {
        if function.is_constructor() || function.is_abstract() {
            return Err(Error::illegal(format!(
                "top-level function '{}' cannot be a constructor or abstract",
                function.name().unwrap_or("constructor")
            )));
        }
        Ok(self.member(FileMember::Function(function)))
    }

    /// Add a top-level property.
    pub fn add_property(self, property: PropertySpec) -> Result<Self> {
        if property.is_abstract() {
            return Err(Error::illegal(format!(
                "top-level property '{}' cannot be abstract",
                property.name()
            )));
        }
        Ok(self.member(FileMember::Property(property)))
    }

    /// Add a type alias.
    pub fn add_type_alias(self, alias: TypeAliasSpec) -> Self {
        self.member(FileMember::TypeAlias(alias))
    }

    fn member(mut self, member: FileMember) -> Self {
        self.members.push(member);
        self
    }

    /// The package.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The file name without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level declarations, in order.
    pub fn members(&self) -> &[FileMember] {
        &self.members
    }

    /// Path of this file relative to a source root: package directories
    /// followed by `Name.kt`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(format!("{}.kt", self.name));
        path
    }

    /// Every class the file prints.
    pub fn referenced_classes(&self) -> Vec<ClassName> {
        let mut out = Vec::new();
        for annotation in &self.annotations {
            annotation.collect_classes(&mut out);
        }
        for member in &self.members {
            member.collect_classes(&mut out);
        }
        out
    }

    /// Render the whole file.
    #[tracing::instrument(skip_all, fields(package = %self.package, file = %self.name))]
    pub fn render(&self) -> Result<String> {
        if self.name.is_empty() {
            return Err(Error::illegal("file name must not be empty"));
        }

        let mut declared = BTreeSet::new();
        for name in self.members.iter().filter_map(FileMember::declared_type_name) {
            if !declared.insert(name) {
                return Err(Error::illegal(format!(
                    "'{}' is declared more than once in file '{}'",
                    name, self.name
                )));
            }
        }

        let mut nested = BTreeSet::new();
        for member in &self.members {
            if let FileMember::Type(ty) = member {
                ty.collect_nested_names(&mut nested);
            }
        }

        let names = ImportResolver::new(self.package.clone())
            .default_packages(self.config.default_imports.iter().cloned())
            .local_names(declared)
            .nested_names(nested)
            .resolve(self.referenced_classes());
        tracing::debug!(imports = names.imports().len(), "resolved imports");

        let ctx = EmitContext::new(names).explicit_public(self.config.explicit_public);
        let mut builder = CodeBuilder::new(self.config.indent());
        builder.emit(self, &ctx);
        Ok(builder.build())
    }

    /// Render and write the file to `out`.
    pub fn write_to(&self, out: &mut impl Write) -> Result<()> {
        let source = self.render()?;
        out.write_all(source.as_bytes())
            .map_err(|e| Error::io(self.relative_path(), e))
    }

    /// Render and write the file under `root`, creating package directories.
    /// Returns the path written.
    pub fn write_to_dir(&self, root: impl AsRef<Path>) -> Result<PathBuf> {
        let source = self.render()?;
        let path = root.as_ref().join(self.relative_path());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        std::fs::write(&path, source).map_err(|e| Error::io(&path, e))?;
        tracing::debug!(path = %path.display(), "wrote file");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        let file = FileSpec::builder("com.example.model", "User");
        assert_eq!(
            file.relative_path(),
            PathBuf::from("com").join("example").join("model").join("User.kt")
        );
        assert_eq!(
            FileSpec::builder("", "Main").relative_path(),
            PathBuf::from("Main.kt")
        );
    }

    #[test]
    fn test_duplicate_declarations_are_rejected() {
        let file = FileSpec::builder("com.example", "Dup")
            .add_type(TypeSpec::class_builder("A"))
            .add_type_alias(TypeAliasSpec::builder(
                "A",
                ClassName::new("kotlin", "Int").into(),
            ));
        let err = file.render().unwrap_err();
        assert_eq!(
            err.to_string(),
            "'A' is declared more than once in file 'Dup'"
        );
    }

    #[test]
    fn test_top_level_constructor_is_rejected() {
        assert!(
            FileSpec::builder("com.example", "F")
                .add_function(FunSpec::constructor())
                .is_err()
        );
    }
}
