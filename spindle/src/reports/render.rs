//! Render command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};
use crate::ops::RenderedFile;

/// Rendered files printed instead of written.
#[derive(Debug)]
pub struct PreviewReport {
    pub files: Vec<RenderedFile>,
}

impl Report for PreviewReport {
    fn render(&self, out: &mut dyn Output) {
        // A single file is printed bare so it can be piped.
        if let [file] = self.files.as_slice() {
            out.preformatted(&file.source);
            return;
        }
        for (i, file) in self.files.iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            out.divider(&file.path.display().to_string());
            out.preformatted(&file.source);
        }
    }
}

/// Files written below an output directory.
#[derive(Debug)]
pub struct WrittenReport {
    pub out_dir: PathBuf,
    /// Paths relative to `out_dir`.
    pub written: Vec<PathBuf>,
}

impl Report for WrittenReport {
    fn render(&self, out: &mut dyn Output) {
        let count = self.written.len();
        out.section(&format!(
            "Wrote {} file{} to {}",
            count,
            if count == 1 { "" } else { "s" },
            self.out_dir.display()
        ));
        for path in &self.written {
            out.added_item(&path.display().to_string());
        }
    }
}
