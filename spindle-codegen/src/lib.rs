//! Declaration builders and source emission for Spindle.
//!
//! This crate turns a tree of declaration specs into formatted source text.
//!
//! # Module Organization
//!
//! - [`builder`] - Output primitives (CodeBuilder, CodeFragment, Indent)
//! - [`spec`] - Declaration specs (FileSpec, TypeSpec, FunSpec, PropertySpec, etc.)
//! - [`imports`] - Import and display-name resolution for one output file
//! - [`emit`] - Rendering of specs to code fragments
//! - [`config`] - Emission settings

pub mod builder;
pub mod config;
pub mod emit;
pub mod imports;
pub mod spec;

pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
pub use config::{ConfigError, EmitConfig};
pub use emit::EmitContext;
pub use imports::{Import, ImportResolver, NameTable};
pub use spec::{
    EnumConstant, FileMember, FileSpec, FunSpec, KModifier, ParameterSpec, PropertySpec,
    Statement, TypeAliasSpec, TypeKind, TypeSpec,
};
