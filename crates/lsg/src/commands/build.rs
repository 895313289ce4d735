//! `lsg build` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use super::RenderArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub render: RenderArgs,

    /// Output file for the page (default: stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut engine = self.render.engine()?;

        let Some(path) = &self.output else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(engine.render()?.as_bytes())?;
            stdout.flush()?;
            return Ok(());
        };

        output.info(&format!("Title: {}", engine.options().title));
        output.info(&format!("Input: {}", self.render.input.display()));
        output.info(&format!("Output: {}", path.display()));

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, engine.render()?)?;

        let files = engine.files()?;
        for file in files {
            output.detail(&format!("  {}", file.display()));
        }
        output.success(&format!(
            "Style guide built from {} files to {}",
            files.len(),
            path.display()
        ));
        Ok(())
    }
}
