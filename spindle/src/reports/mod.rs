//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod output;
mod render;

pub use check::{CheckReport, FileSummary};
pub use output::{Report, TerminalOutput};
pub use render::{PreviewReport, WrittenReport};
