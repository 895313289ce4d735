//! LSG CLI - Living style guide generator.
//!
//! Provides commands for:
//! - `build`: Render the style guide page
//! - `files`: List the stylesheets and fragments a style guide uses
//! - `markdown`, `css`, `html`: Print an intermediate stage

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, RenderArgs, Stage};
use output::Output;

/// LSG - Living style guide generator.
#[derive(Parser)]
#[command(name = "lsg", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the style guide page.
    Build(BuildArgs),
    /// List stylesheet and documentation files in use.
    Files(RenderArgs),
    /// Print the concatenated documentation.
    Markdown(RenderArgs),
    /// Print the compiled CSS.
    Css(RenderArgs),
    /// Print the documentation as HTML, without the page layout.
    Html(RenderArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Build(args) => args.render.verbose,
            Self::Files(args) | Self::Markdown(args) | Self::Css(args) | Self::Html(args) => {
                args.verbose
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Files(args) => Stage::Files.execute(&args),
        Commands::Markdown(args) => Stage::Markdown.execute(&args),
        Commands::Css(args) => Stage::Css.execute(&args),
        Commands::Html(args) => Stage::Html.execute(&args),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from([
            "lsg",
            "build",
            "scss/styleguide.scss",
            "-o",
            "public/index.html",
            "--title",
            "Acme",
            "-I",
            "vendor",
            "-I",
            "shared",
            "--verbose",
        ])
        .unwrap();

        let Commands::Build(args) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(args.output, Some(PathBuf::from("public/index.html")));
        assert_eq!(args.render.input, PathBuf::from("scss/styleguide.scss"));
        assert_eq!(args.render.title.as_deref(), Some("Acme"));
        assert_eq!(
            args.render.load_paths,
            vec![PathBuf::from("vendor"), PathBuf::from("shared")]
        );
        assert!(args.render.verbose);
    }

    #[test]
    fn test_parse_stage_commands() {
        for name in ["files", "markdown", "css", "html"] {
            let cli = Cli::try_parse_from(["lsg", name, "styleguide.scss"]).unwrap();
            assert!(!cli.command.verbose());
        }
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["lsg", "css"]).is_err());
    }
}
