//! Render errors.

use std::path::PathBuf;

use lsg_sass::CompileError;

use crate::converter::ConversionError;
use crate::template::TemplateError;

/// Error returned when a render fails.
///
/// Every stage failure aborts the render. No partial document is produced.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The stylesheet source could not be read.
    #[error("Failed to read stylesheet {}: {source}", .path.display())]
    Source {
        /// Stylesheet path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The stylesheet failed to compile.
    #[error(transparent)]
    Compilation(#[from] CompileError),
    /// A discovered fragment could not be read.
    #[error("Failed to read fragment {}: {source}", .path.display())]
    MissingFragment {
        /// Fragment path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Markup conversion failed.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    /// The page template failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
}
