//! Core operations.
//!
//! This module contains the business logic for spindle commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod render;

pub use check::check;
pub use render::{RenderedFile, render, write};
