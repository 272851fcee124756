//! Render operation - metadata to source text.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use spindle_codegen::EmitConfig;
use spindle_metadata::Metadata;

use crate::reports::WrittenReport;

/// One rendered file, relative to the output root.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub source: String,
}

/// Translate and render every file of `metadata` in memory.
///
/// Nothing is returned unless every file renders.
#[tracing::instrument(skip_all, fields(files = metadata.files.len()))]
pub fn render(metadata: &Metadata, config: &EmitConfig) -> spindle_types::Result<Vec<RenderedFile>> {
    metadata
        .file_specs()?
        .into_iter()
        .map(|spec| {
            let spec = spec.config(config.clone());
            Ok(RenderedFile {
                path: spec.relative_path(),
                source: spec.render()?,
            })
        })
        .collect()
}

/// Write rendered files under `out_dir`, creating package directories.
pub fn write(files: &[RenderedFile], out_dir: &Path) -> Result<WrittenReport> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, &file.source)
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote file");
        written.push(file.path.clone());
    }
    Ok(WrittenReport {
        out_dir: out_dir.to_path_buf(),
        written,
    })
}
