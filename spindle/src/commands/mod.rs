mod check;
mod completions;
mod render;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use miette::Diagnostic;
use render::RenderCommand;
use spindle_codegen::EmitConfig;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "spindle.toml";

/// Extension trait for exiting on diagnostics with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T, E> UnwrapOrExit<T> for std::result::Result<T, Box<E>>
where
    E: Diagnostic + Send + Sync + 'static,
{
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => exit_with(miette::Report::new(*e)),
        }
    }
}

impl<T> UnwrapOrExit<T> for spindle_types::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => exit_with(miette::Report::new(e)),
        }
    }
}

fn exit_with(report: miette::Report) -> ! {
    eprintln!("{:?}", report);
    std::process::exit(1);
}

/// Emission settings from `path`, from `./spindle.toml` when present, or
/// the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> EmitConfig {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG);
            if !fallback.is_file() {
                return EmitConfig::default();
            }
            fallback
        }
    };
    tracing::debug!(path = %path.display(), "loading emit config");
    EmitConfig::from_file(&path).unwrap_or_exit()
}

#[derive(Parser)]
#[command(name = "spindle")]
#[command(version)]
#[command(about = "Render compiler metadata into formatted source files")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Render(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a metadata document to source files
    Render(RenderCommand),

    /// Validate a metadata document without writing anything
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
