//! Raw compiler metadata and its translation into Spindle specs.
//!
//! Metadata arrives as plain data (usually JSON written by a reflection or
//! metadata reader) and is turned into [`TypeRef`](spindle_types::TypeRef)s
//! and declaration specs ready for emission.
//!
//! # Module Organization
//!
//! - [`raw`] - Serde descriptors for types, declarations and files
//! - [`names`] - Class names from internal `pkg/Outer.Inner` paths
//! - [`resolver`] - Type parameter resolution with parent fallback
//! - [`types`] - TypeRef and TypeVariable construction
//! - [`annotations`] - Annotations and constant literals
//! - [`class`] - Class and file translation

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod annotations;
pub mod class;
mod error;
pub mod names;
pub mod raw;
pub mod resolver;
pub mod types;

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use spindle_codegen::FileSpec;

pub use annotations::{annotation_ref, literal};
pub use class::{file_spec, type_spec};
pub use error::{LoadError, Result};
pub use names::class_name_from_path;
pub use raw::*;
pub use resolver::TypeParameterResolver;
pub use types::{type_ref, type_variable};

/// Root of a metadata document: the files to generate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub files: Vec<RawFile>,
}

impl Metadata {
    /// Translate every file, stopping at the first failure.
    pub fn file_specs(&self) -> spindle_types::Result<Vec<FileSpec>> {
        self.files.iter().map(file_spec).collect()
    }

    /// Validate the document after parsing.
    pub fn validate(&self, src: &str, filename: &str) -> Result<()> {
        let mut seen = BTreeSet::new();
        for file in &self.files {
            if file.name.is_empty() {
                return Err(LoadError::validation(
                    "file name must not be empty",
                    src,
                    filename,
                    Some("\"name\": \"\""),
                ));
            }
            let package = file.package.replace('/', ".");
            if !seen.insert((package.clone(), file.name.as_str())) {
                let qualified = if package.is_empty() {
                    file.name.clone()
                } else {
                    format!("{}.{}", package, file.name)
                };
                return Err(LoadError::validation(
                    format!("file '{}' is declared more than once", qualified),
                    src,
                    filename,
                    Some(&format!("\"{}\"", file.name)),
                ));
            }
        }
        Ok(())
    }
}

/// Parse a metadata document from the given path
pub fn parse_file(path: impl AsRef<Path>) -> Result<Metadata> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    let filename = path.display().to_string();
    parse_str_with_filename(&content, &filename)
}

/// Parse a metadata document from a string (uses "metadata.json" as default filename)
pub fn parse_str(content: &str) -> Result<Metadata> {
    parse_str_with_filename(content, "metadata.json")
}

/// Parse a metadata document from a string with a custom filename for error reporting
#[tracing::instrument(skip(content))]
pub fn parse_str_with_filename(content: &str, filename: &str) -> Result<Metadata> {
    let metadata: Metadata =
        serde_json::from_str(content).map_err(|e| LoadError::parse(e, content, filename))?;
    metadata.validate(content, filename)?;
    tracing::debug!(files = metadata.files.len(), "parsed metadata");
    Ok(metadata)
}
