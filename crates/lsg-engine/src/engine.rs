//! Memoized render pipeline.

use std::path::{Path, PathBuf};

use lsg_config::{Options, SassConfig};
use lsg_sass::{CompileContext, CompiledStylesheet, GrassCompiler, StylesheetCompiler};

use crate::EngineError;
use crate::aggregator::aggregate;
use crate::converter::{LivingStyleGuideConverter, MarkupConverter};
use crate::resolver::{FileList, FragmentResolver, GlobFragmentResolver};
use crate::template::{self, PageBindings, Template};
use crate::walker::flatten;

/// Render context for one style guide.
///
/// Each stage is computed on first access and kept for the lifetime of the
/// engine:
///
/// ```text
/// source -> css + import tree -> files -> markdown -> html -> document
/// ```
///
/// Nothing is shared between engines. A failed stage is not cached, and the
/// error is returned to the caller unchanged.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use lsg_config::Options;
/// use lsg_engine::Engine;
///
/// let mut engine = Engine::from_path(Path::new("scss/styleguide.scss"), Options::default())?;
/// let document = engine.render()?.to_owned();
/// println!("{} files", engine.files()?.len());
/// # Ok::<(), lsg_engine::EngineError>(())
/// ```
pub struct Engine {
    source: String,
    filename: Option<PathBuf>,
    base_dir: PathBuf,
    options: Options,
    sass: SassConfig,
    compiler: Box<dyn StylesheetCompiler>,
    resolver: Box<dyn FragmentResolver>,
    converter: Box<dyn MarkupConverter>,
    template: Template,

    compiled: Option<CompiledStylesheet>,
    files: Option<FileList>,
    markdown: Option<String>,
    html: Option<String>,
    document: Option<String>,
}

impl Engine {
    /// Create an engine for inline stylesheet source.
    ///
    /// Relative imports resolve against the current directory until
    /// [`Engine::with_base_dir`] says otherwise.
    #[must_use]
    pub fn new(source: impl Into<String>, options: Options) -> Self {
        Self {
            source: source.into(),
            filename: None,
            base_dir: PathBuf::from("."),
            options,
            sass: SassConfig::default(),
            compiler: Box::new(GrassCompiler::new()),
            resolver: Box::new(GlobFragmentResolver),
            converter: Box::new(LivingStyleGuideConverter),
            template: Template::builtin(),
            compiled: None,
            files: None,
            markdown: None,
            html: None,
            document: None,
        }
    }

    /// Create an engine for a stylesheet file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Source`] if the file cannot be read.
    pub fn from_path(path: &Path, options: Options) -> Result<Self, EngineError> {
        let source = std::fs::read_to_string(path).map_err(|source| EngineError::Source {
            path: path.to_path_buf(),
            source,
        })?;
        let mut engine = Self::new(source, options);
        engine.base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        engine.filename = Some(path.to_path_buf());
        Ok(engine)
    }

    /// Set the directory relative imports of inline source resolve against.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Set the compiler configuration.
    #[must_use]
    pub fn with_sass(mut self, sass: SassConfig) -> Self {
        self.sass = sass;
        self
    }

    /// Replace the stylesheet compiler.
    #[must_use]
    pub fn with_compiler<C: StylesheetCompiler + 'static>(mut self, compiler: C) -> Self {
        self.compiler = Box::new(compiler);
        self
    }

    /// Replace the fragment resolver.
    #[must_use]
    pub fn with_resolver<R: FragmentResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Replace the markup converter.
    #[must_use]
    pub fn with_converter<M: MarkupConverter + 'static>(mut self, converter: M) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// Replace the page template.
    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Render options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Compiled CSS.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Compilation`] if the stylesheet fails to compile.
    pub fn css(&mut self) -> Result<&str, EngineError> {
        Ok(&self.compiled()?.css)
    }

    /// Stylesheet files in import order, followed by their fragments.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Compilation`] if the stylesheet fails to compile.
    pub fn files(&mut self) -> Result<&[PathBuf], EngineError> {
        Ok(self.file_list()?.paths())
    }

    /// Concatenated documentation fragments.
    ///
    /// # Errors
    ///
    /// Fails if compilation fails or a fragment cannot be read.
    pub fn markdown(&mut self) -> Result<&str, EngineError> {
        let markdown = match self.markdown.take() {
            Some(markdown) => markdown,
            None => {
                let markdown = aggregate(self.file_list()?.fragments())?;
                tracing::debug!(markdown_len = markdown.len(), "Aggregated fragments");
                markdown
            }
        };
        Ok(self.markdown.insert(markdown).as_str())
    }

    /// Documentation converted to HTML, before templating.
    ///
    /// # Errors
    ///
    /// Fails if any earlier stage fails or conversion fails.
    pub fn html(&mut self) -> Result<&str, EngineError> {
        let html = match self.html.take() {
            Some(html) => html,
            None => {
                self.markdown()?;
                let markdown = self.markdown.as_deref().unwrap_or_default();
                self.converter.convert(markdown, &self.options)?
            }
        };
        Ok(self.html.insert(html).as_str())
    }

    /// The complete style guide page.
    ///
    /// # Errors
    ///
    /// Fails if any stage fails. No document is produced in that case.
    pub fn render(&mut self) -> Result<&str, EngineError> {
        let document = match self.document.take() {
            Some(document) => document,
            None => {
                self.css()?;
                self.html()?;

                let head = template::head(&self.options);
                let header = template::header(&self.options);
                let footer = template::footer(&self.options);
                let bindings = PageBindings {
                    title: &self.options.title,
                    css: self.compiled.as_ref().map_or("", |c| c.css.as_str()),
                    html: self.html.as_deref().unwrap_or_default(),
                    head: &head,
                    header: &header,
                    footer: &footer,
                };
                let document = self.template.render(&bindings)?;
                tracing::info!(
                    template = self.template.name(),
                    document_len = document.len(),
                    "Rendered style guide"
                );
                document
            }
        };
        Ok(self.document.insert(document).as_str())
    }

    fn compiled(&mut self) -> Result<&CompiledStylesheet, EngineError> {
        let compiled = match self.compiled.take() {
            Some(compiled) => compiled,
            None => {
                let ctx = CompileContext {
                    options: &self.options,
                    sass: &self.sass,
                    filename: self.filename.as_deref(),
                    base_dir: &self.base_dir,
                };
                self.compiler.compile(&self.source, &ctx)?
            }
        };
        Ok(&*self.compiled.insert(compiled))
    }

    fn file_list(&mut self) -> Result<&FileList, EngineError> {
        let files = match self.files.take() {
            Some(files) => files,
            None => {
                let stylesheets = flatten(&self.compiled()?.tree);
                FileList::resolve(stylesheets, self.resolver.as_ref())
            }
        };
        Ok(&*self.files.insert(files))
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("filename", &self.filename)
            .field("base_dir", &self.base_dir)
            .field("options", &self.options)
            .field("template", &self.template.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_from_path_sets_filename_and_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styleguide.scss");
        fs::write(&path, ".a { color: red; }\n").unwrap();

        let options = Options {
            title: "Acme".to_owned(),
            ..Options::default()
        };
        let engine = Engine::from_path(&path, options).unwrap();
        assert_eq!(engine.filename.as_deref(), Some(path.as_path()));
        assert_eq!(engine.base_dir, dir.path());
        assert_eq!(engine.options().title, "Acme");
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Engine::from_path(Path::new("missing-styleguide.scss"), Options::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::Source { .. }));
    }

    #[test]
    fn test_root_file_is_listed_with_its_fragment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styleguide.scss");
        fs::write(&path, "@import \"colors\";\n").unwrap();
        fs::write(dir.path().join("_colors.scss"), "$red: #f00;\n").unwrap();
        fs::write(dir.path().join("styleguide.md"), "# Intro\n").unwrap();
        fs::write(dir.path().join("_colors.md"), "## Colors\n").unwrap();

        let mut engine = Engine::from_path(&path, Options::default()).unwrap();
        assert_eq!(
            engine.files().unwrap(),
            [
                path.clone(),
                dir.path().join("_colors.scss"),
                dir.path().join("styleguide.md"),
                dir.path().join("_colors.md"),
            ]
        );
        assert_eq!(engine.markdown().unwrap(), "# Intro\n## Colors\n");
    }

    #[test]
    fn test_plain_css_import_is_compiled_but_not_listed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vendor.css"), ".vendor { color: blue; }\n").unwrap();
        fs::write(dir.path().join("vendor.md"), "Vendor\n").unwrap();
        fs::write(dir.path().join("_buttons.scss"), ".btn { color: red; }\n").unwrap();
        fs::write(dir.path().join("_buttons.md"), "Buttons\n").unwrap();

        let mut engine = Engine::new("@import \"vendor\", \"buttons\";", Options::default())
            .with_base_dir(dir.path());

        assert!(engine.css().unwrap().contains(".vendor"));
        assert_eq!(
            engine.files().unwrap(),
            [
                dir.path().join("_buttons.scss"),
                dir.path().join("_buttons.md"),
            ]
        );
        assert_eq!(engine.markdown().unwrap(), "Buttons\n");
    }

    #[test]
    fn test_compile_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = Engine::new("@import \"nope\";", Options::default())
            .with_base_dir(dir.path());

        assert!(matches!(
            engine.render().unwrap_err(),
            EngineError::Compilation(_)
        ));
        assert!(matches!(
            engine.files().unwrap_err(),
            EngineError::Compilation(_)
        ));
    }
}
