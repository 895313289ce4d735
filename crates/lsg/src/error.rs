//! CLI error types.

use lsg_config::ConfigError;
use lsg_engine::{EngineError, TemplateError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Template(#[from] TemplateError),
}
