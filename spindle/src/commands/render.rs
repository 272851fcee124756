use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{UnwrapOrExit, load_config};
use crate::{
    ops,
    reports::{PreviewReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct RenderCommand {
    /// Metadata document to render
    pub input: PathBuf,

    /// Output directory; files are printed to stdout when absent
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Emission settings (defaults to ./spindle.toml when it exists)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl RenderCommand {
    /// Run the render command
    pub fn run(&self) -> Result<()> {
        let metadata = spindle_metadata::parse_file(&self.input).unwrap_or_exit();
        let config = load_config(self.config.as_deref());
        let files = ops::render(&metadata, &config).unwrap_or_exit();

        let mut out = TerminalOutput::new();
        match &self.out {
            Some(dir) => ops::write(&files, dir)?.render(&mut out),
            None => PreviewReport { files }.render(&mut out),
        }
        Ok(())
    }
}
