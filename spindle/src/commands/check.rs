use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{UnwrapOrExit, load_config};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Metadata document to validate
    pub input: PathBuf,

    /// Emission settings (defaults to ./spindle.toml when it exists)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let metadata = spindle_metadata::parse_file(&self.input).unwrap_or_exit();
        let config = load_config(self.config.as_deref());
        let report = ops::check(&metadata, &config, &self.input).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
