//! Type-name model for the Spindle source generator.
//!
//! This crate holds the immutable value types every other Spindle crate
//! speaks in: class names, type references, annotations and code blocks.
//!
//! # Architecture
//!
//! ```text
//! raw metadata → spindle-metadata (construction) → spindle-types (model) → spindle-codegen (emission)
//! ```
//!
//! The model is designed to be:
//! - Closed: [`TypeShape`] is an exhaustive sum type
//! - Immutable: "mutation" is always copy-with-modified-field
//! - Render-agnostic: display names are supplied through [`NameLookup`]

mod alias;
mod annotation;
mod class_name;
mod code;
mod error;
mod names;
mod type_ref;

pub use alias::union_annotations;
pub use annotation::{AnnotationMember, AnnotationRef};
pub use class_name::ClassName;
pub use code::{CodeBlock, CodePart};
pub use error::{Error, Result};
pub use names::{Canonical, NameLookup, escape_if_necessary, is_keyword};
pub use type_ref::{FunctionType, Projection, TypeRef, TypeShape, TypeVariable, Variance};
