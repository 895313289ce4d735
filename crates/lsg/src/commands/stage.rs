//! `lsg files|markdown|css|html` command implementation.

use std::io::Write;

use super::RenderArgs;
use crate::error::CliError;

/// Pipeline stage printed to stdout.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Stage {
    Files,
    Markdown,
    Css,
    Html,
}

impl Stage {
    pub(crate) fn execute(self, args: &RenderArgs) -> Result<(), CliError> {
        let mut engine = args.engine()?;
        let mut stdout = std::io::stdout().lock();

        match self {
            Self::Files => {
                for path in engine.files()? {
                    writeln!(stdout, "{}", path.display())?;
                }
            }
            Self::Markdown => stdout.write_all(engine.markdown()?.as_bytes())?,
            Self::Css => stdout.write_all(engine.css()?.as_bytes())?,
            Self::Html => stdout.write_all(engine.html()?.as_bytes())?,
        }

        stdout.flush()?;
        Ok(())
    }
}
