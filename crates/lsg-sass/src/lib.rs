//! Stylesheet compilation and import tree discovery.
//!
//! The engine consumes two things from a stylesheet compiler: the compiled
//! CSS and a traversable import tree. [`StylesheetCompiler`] is that seam;
//! [`GrassCompiler`] is the default implementation.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use lsg_config::{Options, SassConfig};
//! use lsg_sass::{CompileContext, GrassCompiler, StylesheetCompiler};
//!
//! let options = Options::default();
//! let sass = SassConfig::default();
//! let ctx = CompileContext {
//!     options: &options,
//!     sass: &sass,
//!     filename: None,
//!     base_dir: Path::new("scss"),
//! };
//! let compiled = GrassCompiler::new().compile("@import \"buttons\";", &ctx)?;
//! println!("{}", compiled.css);
//! # Ok::<(), lsg_sass::CompileError>(())
//! ```

mod compiler;
mod scanner;
#[cfg(test)]
mod testing;
mod tree;

use std::path::PathBuf;

pub use compiler::{CompileContext, CompiledStylesheet, GrassCompiler, StylesheetCompiler};
pub use scanner::{ImportScanner, Syntax};
pub use tree::{ImportNode, NodeKind};

/// Error returned when a stylesheet fails to compile.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The preprocessor rejected the source.
    #[error("Sass error: {0}")]
    Sass(String),
    /// An import target could not be resolved to a file.
    #[error("Cannot find stylesheet to import: {target}{}", importer_suffix(.importer.as_ref()))]
    NotFound {
        /// Target as written in the `@import` rule.
        target: String,
        /// File containing the import, if any.
        importer: Option<PathBuf>,
    },
    /// A file imports itself, directly or through other imports.
    #[error("Import loop detected at {}", .path.display())]
    ImportLoop {
        /// File that was imported again while still being imported.
        path: PathBuf,
    },
    /// An imported file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

fn importer_suffix(importer: Option<&PathBuf>) -> String {
    importer.map_or_else(String::new, |p| format!(" (imported from {})", p.display()))
}
