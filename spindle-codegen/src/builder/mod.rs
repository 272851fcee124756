//! Output primitives.
//!
//! This module provides the lowest layer of source emission:
//! - [`CodeBuilder`] - Fluent API for building indented text
//! - [`CodeFragment`] - Intermediate representation for code pieces
//! - [`Renderable`] - Trait for nodes that can be converted to code fragments
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
