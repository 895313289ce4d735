//! Stylesheet compilation.
//!
//! [`GrassCompiler`] compiles SCSS/Sass with the `grass` crate and pairs the
//! CSS with the import tree discovered by [`ImportScanner`].

use std::path::{Path, PathBuf};

use lsg_config::{Options, OutputStyle, SassConfig};

use crate::CompileError;
use crate::scanner::{ImportScanner, Syntax};
use crate::tree::ImportNode;

/// Render-time context handed to a [`StylesheetCompiler`].
///
/// Carries what a compiler may need to know about the render it is part of,
/// without giving it access to the render itself.
#[derive(Clone, Copy, Debug)]
pub struct CompileContext<'a> {
    /// Merged render options.
    pub options: &'a Options,
    /// Compiler configuration.
    pub sass: &'a SassConfig,
    /// File the source was read from, if any.
    pub filename: Option<&'a Path>,
    /// Directory relative imports resolve against when `filename` is unset.
    pub base_dir: &'a Path,
}

impl<'a> CompileContext<'a> {
    /// Directory relative imports resolve against.
    pub fn import_dir(&self) -> &'a Path {
        self.filename
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(self.base_dir)
    }

    /// Syntax of the source, implied by its filename.
    pub fn syntax(&self) -> Syntax {
        self.filename.map_or(Syntax::Scss, Syntax::from_path)
    }
}

/// Output of a successful compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledStylesheet {
    /// Compiled CSS.
    pub css: String,
    /// Import tree of the compiled source.
    pub tree: ImportNode,
}

/// Compiles stylesheet source into CSS and an import tree.
pub trait StylesheetCompiler {
    /// Compile `source`.
    fn compile(
        &self,
        source: &str,
        ctx: &CompileContext<'_>,
    ) -> Result<CompiledStylesheet, CompileError>;
}

/// [`StylesheetCompiler`] backed by `grass`.
#[derive(Debug)]
pub struct GrassCompiler<F: grass::Fs = grass::StdFs> {
    fs: F,
}

impl GrassCompiler {
    /// Create a compiler reading from the real filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self { fs: grass::StdFs }
    }
}

impl Default for GrassCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: grass::Fs> GrassCompiler<F> {
    /// Create a compiler reading files through `fs`.
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }
}

impl<F: grass::Fs> StylesheetCompiler for GrassCompiler<F> {
    fn compile(
        &self,
        source: &str,
        ctx: &CompileContext<'_>,
    ) -> Result<CompiledStylesheet, CompileError> {
        let import_dir = ctx.import_dir();
        let load_paths: Vec<PathBuf> = std::iter::once(import_dir.to_path_buf())
            .chain(ctx.sass.load_paths.iter().cloned())
            .collect();

        let style = match ctx.sass.style {
            OutputStyle::Expanded => grass::OutputStyle::Expanded,
            OutputStyle::Compressed => grass::OutputStyle::Compressed,
        };
        let syntax = match ctx.syntax() {
            Syntax::Scss => grass::InputSyntax::Scss,
            Syntax::Sass => grass::InputSyntax::Sass,
        };

        let options = grass::Options::default()
            .fs(&self.fs)
            .load_paths(&load_paths)
            .style(style)
            .input_syntax(syntax);

        let css = grass::from_string(source.to_owned(), &options)
            .map_err(|e| CompileError::Sass(e.to_string()))?;

        let scanner = ImportScanner::new(&self.fs, &ctx.sass.load_paths);
        let tree = scanner.scan_source(source, ctx.filename, import_dir)?;

        tracing::debug!(
            css_len = css.len(),
            imports = tree.children.iter().filter(|c| c.is_import()).count(),
            "Compiled stylesheet"
        );

        Ok(CompiledStylesheet { css, tree })
    }
}
