//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from metadata validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the metadata document.
    pub input: PathBuf,
    /// Files the document would produce.
    pub files: Vec<FileSummary>,
}

/// One file the document would produce.
#[derive(Debug)]
pub struct FileSummary {
    pub path: PathBuf,
    pub declarations: usize,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.input.display()));
        if self.files.is_empty() {
            return;
        }
        out.newline();
        out.section(&format!(
            "{} file{}",
            self.files.len(),
            if self.files.len() == 1 { "" } else { "s" }
        ));
        for file in &self.files {
            out.list_item(&format!(
                "{} ({} declaration{})",
                file.path.display(),
                file.declarations,
                if file.declarations == 1 { "" } else { "s" }
            ));
        }
    }
}
