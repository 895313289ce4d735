//! `@import` discovery.
//!
//! Builds the [`ImportNode`] tree of a stylesheet by scanning its `@import`
//! rules and resolving each target the way Sass does: relative to the
//! importing file first, then through every load path, trying partials
//! (`_name`), both syntaxes (`.scss`, `.sass`), plain `.css` files and
//! directory index files. A resolved `.css` file is a leaf: it is not
//! scanned for further imports.
//!
//! Only top-level imports become direct children of a root node. Imports
//! nested inside a rule block are children of a [`NodeKind::Rule`] node.
//!
//! [`NodeKind::Rule`]: crate::NodeKind::Rule

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::CompileError;
use crate::tree::ImportNode;

const IMPORT: &str = "@import";

/// Stylesheet file extensions, in resolution order.
const EXTENSIONS: [&str; 2] = ["scss", "sass"];

/// Extensions tried for an import target without one, in resolution order.
const IMPORTABLE: [&str; 3] = ["scss", "sass", "css"];

/// Import arguments that Sass passes through as plain CSS imports.
static PLAIN_CSS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:url\(|https?://|//)|\.css$").expect("invalid plain CSS import regex")
});

/// Stylesheet syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Syntax {
    /// Brace-delimited SCSS.
    Scss,
    /// Indentation-based Sass.
    Sass,
}

impl Syntax {
    /// Syntax implied by a file extension. Anything but `.sass` is SCSS.
    pub fn from_path(path: &Path) -> Self {
        if path.extension().is_some_and(|e| e == "sass") {
            Self::Sass
        } else {
            Self::Scss
        }
    }
}

/// Top-level statement relevant to import discovery.
#[derive(Debug, PartialEq, Eq)]
enum Statement {
    /// Top-level `@import` with its comma-separated arguments.
    Import(Vec<String>),
    /// Rule block with the arguments of every import nested inside it.
    Rule(Vec<String>),
}

/// Classified import argument.
#[derive(Debug, PartialEq, Eq)]
enum Target<'a> {
    Sass(&'a str),
    Css,
}

/// Builds import trees by scanning stylesheet sources.
pub struct ImportScanner<'a> {
    fs: &'a dyn grass::Fs,
    load_paths: &'a [PathBuf],
}

impl<'a> ImportScanner<'a> {
    /// Create a scanner reading files through `fs`.
    pub fn new(fs: &'a dyn grass::Fs, load_paths: &'a [PathBuf]) -> Self {
        Self { fs, load_paths }
    }

    /// Scan a stylesheet file.
    pub fn scan_file(&self, path: &Path) -> Result<ImportNode, CompileError> {
        let source = self.read(path)?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        self.scan_source(&source, Some(path), base_dir)
    }

    /// Scan stylesheet source text.
    ///
    /// `filename` becomes the root node's filename and selects the syntax;
    /// relative imports are resolved against `base_dir`.
    pub fn scan_source(
        &self,
        source: &str,
        filename: Option<&Path>,
        base_dir: &Path,
    ) -> Result<ImportNode, CompileError> {
        let mut ancestors: Vec<PathBuf> = filename.map(Path::to_path_buf).into_iter().collect();
        let syntax = filename.map_or(Syntax::Scss, Syntax::from_path);
        self.build(source, filename, base_dir, syntax, &mut ancestors)
    }

    /// Resolve an import target to a stylesheet file.
    pub fn resolve(&self, target: &str, base_dir: &Path) -> Option<PathBuf> {
        std::iter::once(base_dir)
            .chain(self.load_paths.iter().map(PathBuf::as_path))
            .flat_map(|dir| candidates(&strip_cur_dir(dir).join(target)))
            .find(|candidate| self.fs.is_file(candidate))
    }

    fn read(&self, path: &Path) -> Result<String, CompileError> {
        let bytes = self.fs.read(path).map_err(|source| CompileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn build(
        &self,
        source: &str,
        filename: Option<&Path>,
        base_dir: &Path,
        syntax: Syntax,
        ancestors: &mut Vec<PathBuf>,
    ) -> Result<ImportNode, CompileError> {
        let stripped = strip_comments(source);
        let statements = match syntax {
            Syntax::Scss => parse_scss(&stripped),
            Syntax::Sass => parse_sass(&stripped),
        };

        let mut children = Vec::new();
        for statement in statements {
            match statement {
                Statement::Import(args) => {
                    for arg in &args {
                        children.push(self.import_node(arg, base_dir, filename, ancestors)?);
                    }
                }
                Statement::Rule(args) => {
                    let nested = args
                        .iter()
                        .map(|arg| self.import_node(arg, base_dir, filename, ancestors))
                        .collect::<Result<Vec<_>, _>>()?;
                    children.push(ImportNode::rule(nested));
                }
            }
        }

        Ok(ImportNode::root(filename.map(Path::to_path_buf), children))
    }

    fn import_node(
        &self,
        arg: &str,
        base_dir: &Path,
        importer: Option<&Path>,
        ancestors: &mut Vec<PathBuf>,
    ) -> Result<ImportNode, CompileError> {
        let target = match classify(arg) {
            Target::Css => return Ok(ImportNode::css_import(arg)),
            Target::Sass(target) => target,
        };

        let path = self
            .resolve(target, base_dir)
            .ok_or_else(|| CompileError::NotFound {
                target: target.to_owned(),
                importer: importer.map(Path::to_path_buf),
            })?;

        if path.extension().is_some_and(|e| e == "css") {
            let leaf = ImportNode::root(Some(path), Vec::new());
            return Ok(ImportNode::import(target, leaf));
        }
        if ancestors.contains(&path) {
            return Err(CompileError::ImportLoop { path });
        }

        let source = self.read(&path)?;
        let dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        ancestors.push(path.clone());
        let tree = self.build(&source, Some(&path), &dir, Syntax::from_path(&path), ancestors);
        ancestors.pop();

        Ok(ImportNode::import(target, tree?))
    }
}

/// Candidate files for an import target, in Sass resolution order.
fn candidates(path: &Path) -> Vec<PathBuf> {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return Vec::new();
    };
    let partial = |file: &str| path.with_file_name(format!("_{file}"));

    if path
        .extension()
        .is_some_and(|e| EXTENSIONS.iter().any(|ext| e == *ext))
    {
        return vec![path.to_path_buf(), partial(name)];
    }

    let mut found = Vec::with_capacity(4 * IMPORTABLE.len());
    for ext in IMPORTABLE {
        let file = format!("{name}.{ext}");
        found.push(path.with_file_name(&file));
        found.push(partial(&file));
    }
    for ext in IMPORTABLE {
        found.push(path.join(format!("_index.{ext}")));
        found.push(path.join(format!("index.{ext}")));
    }
    found
}

/// Drop a leading `.` so files under the current directory are spelled
/// the same way whether or not a base directory was given.
fn strip_cur_dir(dir: &Path) -> &Path {
    dir.strip_prefix(".").unwrap_or(dir)
}

/// Decide whether an import argument names a stylesheet or a plain CSS import.
fn classify(arg: &str) -> Target<'_> {
    let path = match arg.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = &arg[1..];
            let Some(close) = inner.find(quote) else {
                return Target::Css;
            };
            // Trailing media queries make it a CSS import.
            if !inner[close + 1..].trim().is_empty() {
                return Target::Css;
            }
            &inner[..close]
        }
        _ => arg,
    };

    if PLAIN_CSS.is_match(path) {
        Target::Css
    } else {
        Target::Sass(path)
    }
}

/// Blank out `//` and `/* */` comments, keeping line structure intact.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q || c == '\n' {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => {
                quote = Some(c);
                out.push(c);
            }
            // Unquoted url() may contain `//`.
            '(' if out.ends_with("url") => {
                out.push(c);
                for next in chars.by_ref() {
                    out.push(next);
                    if next == ')' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = ' ';
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

fn starts_import(text: &str) -> bool {
    text.strip_prefix(IMPORT)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_whitespace() || c == '"' || c == '\'')
}

/// Extract import statements from comment-free SCSS.
fn parse_scss(src: &str) -> Vec<Statement> {
    let bytes = src.as_bytes();
    let mut statements = Vec::new();
    let mut nested = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        if let Some(q) = quote {
            if c == b'\\' {
                i += 2;
                continue;
            }
            if c == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match c {
            b'"' | b'\'' => quote = Some(c),
            b'#' if bytes.get(i + 1) == Some(&b'{') => {
                i = skip_interpolation(bytes, i + 1);
                continue;
            }
            b'{' => depth += 1,
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    statements.push(Statement::Rule(std::mem::take(&mut nested)));
                }
            }
            b'@' if starts_import(&src[i..]) => {
                let start = i + IMPORT.len();
                let end = statement_end(bytes, start);
                let args = split_args(&src[start..end]);
                if depth == 0 {
                    statements.push(Statement::Import(args));
                } else {
                    nested.extend(args);
                }
                i = end;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    statements
}

/// Extract import statements from comment-free indented Sass.
fn parse_sass(src: &str) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut rule: Option<Vec<String>> = None;

    for line in src.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            continue;
        }
        let top_level = trimmed.len() == line.len();

        if starts_import(trimmed) {
            let args = split_args(trimmed[IMPORT.len()..].trim_end().trim_end_matches(';'));
            if top_level {
                if let Some(done) = rule.take() {
                    statements.push(Statement::Rule(done));
                }
                statements.push(Statement::Import(args));
            } else {
                rule.get_or_insert_with(Vec::new).extend(args);
            }
        } else if top_level && let Some(done) = rule.replace(Vec::new()) {
            statements.push(Statement::Rule(done));
        }
    }

    if let Some(done) = rule {
        statements.push(Statement::Rule(done));
    }
    statements
}

/// Index just past the `}` closing the interpolation opened at `open`.
fn skip_interpolation(bytes: &[u8], open: usize) -> usize {
    let mut depth = 0usize;
    for (offset, &c) in bytes[open..].iter().enumerate() {
        match c {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return open + offset + 1;
                }
            }
            _ => {}
        }
    }
    bytes.len()
}

/// Index of the `;`, `{` or `}` terminating the statement starting at `start`.
fn statement_end(bytes: &[u8], start: usize) -> usize {
    let mut quote: Option<u8> = None;
    let mut parens = 0usize;
    let mut i = start;
    while i < bytes.len() {
        let c = bytes[i];
        match quote {
            Some(_) if c == b'\\' => i += 1,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                b'"' | b'\'' => quote = Some(c),
                b'(' => parens += 1,
                b')' => parens = parens.saturating_sub(1),
                b';' | b'{' | b'}' if parens == 0 => return i,
                _ => {}
            },
        }
        i += 1;
    }
    bytes.len()
}

/// Split an import argument list on top-level commas.
fn split_args(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut parens = 0usize;

    for c in text.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                current.push(c);
            }
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    current.push(c);
                }
                '(' => {
                    parens += 1;
                    current.push(c);
                }
                ')' => {
                    parens = parens.saturating_sub(1);
                    current.push(c);
                }
                ',' if parens == 0 => args.push(std::mem::take(&mut current)),
                _ => current.push(c),
            },
        }
    }
    args.push(current);

    args.into_iter()
        .map(|arg| arg.trim().to_owned())
        .filter(|arg| !arg.is_empty())
        .collect()
}
