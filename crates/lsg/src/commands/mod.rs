//! CLI command implementations.

mod build;
mod stage;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use lsg_config::{CliSettings, Config, OptionOverrides, OutputStyle};
use lsg_engine::{Engine, Template};

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use stage::Stage;

/// Arguments shared by every command that renders a style guide.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Root stylesheet of the style guide.
    pub input: PathBuf,

    /// Path to configuration file (default: auto-discover lsg.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page title (overrides config).
    #[arg(long)]
    pub title: Option<String>,

    /// Additional directory to search for imports (repeatable).
    #[arg(short = 'I', long = "load-path", value_name = "DIR")]
    pub load_paths: Vec<PathBuf>,

    /// Page template (overrides config).
    #[arg(long)]
    template: Option<PathBuf>,

    /// CSS output style (overrides config).
    #[arg(long, value_enum)]
    style: Option<StyleArg>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Expanded,
    Compressed,
}

impl From<StyleArg> for OutputStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Expanded => Self::Expanded,
            StyleArg::Compressed => Self::Compressed,
        }
    }
}

impl RenderArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            options: OptionOverrides {
                title: self.title.clone(),
                ..OptionOverrides::default()
            },
            load_paths: self.load_paths.clone(),
            template: self.template.clone(),
            style: self.style.map(Into::into),
        }
    }

    /// Load configuration and create the engine for the input stylesheet.
    pub(crate) fn engine(&self) -> Result<Engine, CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let template = match &config.template_path {
            Some(path) => Template::from_file(path)?,
            None => Template::builtin(),
        };

        let engine = Engine::from_path(&self.input, config.options_resolved.clone())?
            .with_sass(config.sass_resolved.clone())
            .with_template(template);
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(input: PathBuf) -> RenderArgs {
        RenderArgs {
            input,
            config: None,
            title: None,
            load_paths: Vec::new(),
            template: None,
            style: None,
            verbose: false,
        }
    }

    #[test]
    fn test_cli_settings() {
        let mut args = args(PathBuf::from("styleguide.scss"));
        args.title = Some("Acme".to_owned());
        args.load_paths = vec![PathBuf::from("vendor")];
        args.style = Some(StyleArg::Compressed);

        let settings = args.cli_settings();
        assert_eq!(settings.options.title.as_deref(), Some("Acme"));
        assert_eq!(settings.options.footer, None);
        assert_eq!(settings.load_paths, vec![PathBuf::from("vendor")]);
        assert_eq!(settings.style, Some(OutputStyle::Compressed));
    }

    #[test]
    fn test_engine_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("lsg.toml");
        std::fs::write(
            &config,
            "template = \"layout.html\"\n\n[options]\ntitle = \"From file\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("layout.html"), "{{ title }}:{{ html }}").unwrap();
        let input = dir.path().join("styleguide.scss");
        std::fs::write(&input, ".a { color: red; }\n").unwrap();
        std::fs::write(dir.path().join("styleguide.md"), "Hello").unwrap();

        let mut args = args(input);
        args.config = Some(config);
        let mut engine = args.engine().unwrap();

        assert_eq!(
            engine.render().unwrap(),
            "From file:<p class=\"livingstyleguide--paragraph\">Hello</p>\n"
        );
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("lsg.toml");
        std::fs::write(&config, "").unwrap();

        let mut args = args(dir.path().join("missing.scss"));
        args.config = Some(config);
        assert!(matches!(args.engine(), Err(CliError::Engine(_))));
    }
}
