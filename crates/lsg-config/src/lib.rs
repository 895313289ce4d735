//! Configuration management for the living style guide.
//!
//! Parses `lsg.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! template = "layouts/guide.html"
//!
//! [options]
//! title = "Acme Components"
//! javascript_after = ["js/app.js"]
//!
//! [sass]
//! load_paths = ["vendor/scss", "~/shared/scss"]
//! style = "compressed"
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].
//! `template` and `sass.load_paths` support `~`, `${VAR}` and
//! `${VAR:-default}` expansion and are resolved relative to the config file.

mod expand;
mod options;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use options::{DEFAULT_FOOTER, DEFAULT_HEADER, DEFAULT_TITLE, OptionOverrides, Options};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "lsg.toml";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Option values given on the command line.
    pub options: OptionOverrides,
    /// Extra load paths, searched after those from the config file.
    pub load_paths: Vec<PathBuf>,
    /// Override page template path.
    pub template: Option<PathBuf>,
    /// Override CSS output style.
    pub style: Option<OutputStyle>,
}

/// CSS output style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// One declaration per line.
    #[default]
    Expanded,
    /// Minified.
    Compressed,
}

/// Raw sass configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SassConfigRaw {
    load_paths: Vec<String>,
    style: Option<OutputStyle>,
}

/// Resolved stylesheet compiler configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SassConfig {
    /// Directories searched for imports after the importing file's directory.
    pub load_paths: Vec<PathBuf>,
    /// CSS output style.
    pub style: OutputStyle,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Option values from the `[options]` table.
    options: OptionOverrides,
    /// Raw `[sass]` table.
    sass: SassConfigRaw,
    /// Raw page template path.
    template: Option<String>,

    /// Options merged over the defaults (set after loading).
    #[serde(skip)]
    pub options_resolved: Options,
    /// Resolved sass configuration (set after loading).
    #[serde(skip)]
    pub sass_resolved: SassConfig,
    /// Resolved page template path (set after loading).
    #[serde(skip)]
    pub template_path: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`sass.load_paths`").
        field: String,
        /// Error message (e.g., "${`SCSS_HOME`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `lsg.toml` in current directory and parents.
    /// Without any config file the defaults are used.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value fails validation.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            let mut config = Self::default();
            config.resolve_paths(Path::new("."))?;
            config
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        self.options_resolved = Options::merged(
            std::mem::take(&mut self.options).or(settings.options.clone()),
        );
        self.sass_resolved
            .load_paths
            .extend(settings.load_paths.iter().cloned());
        if let Some(style) = settings.style {
            self.sass_resolved.style = style;
        }
        if let Some(template) = &settings.template {
            self.template_path = Some(template.clone());
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.options_resolved.default_language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "options.default_language cannot be empty".to_owned(),
            ));
        }
        if let Some(template) = &self.template_path
            && !template.is_file()
        {
            return Err(ConfigError::Validation(format!(
                "template not found: {}",
                template.display()
            )));
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand and resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let load_paths = self
            .sass
            .load_paths
            .iter()
            .map(|p| expand::expand_env(p, "sass.load_paths").map(|p| config_dir.join(p)))
            .collect::<Result<Vec<_>, _>>()?;

        self.sass_resolved = SassConfig {
            load_paths,
            style: self.sass.style.unwrap_or_default(),
        };

        self.template_path = self
            .template
            .as_deref()
            .map(|t| expand::expand_env(t, "template").map(|t| config_dir.join(t)))
            .transpose()?;

        self.options_resolved = Options::merged(self.options.clone());

        Ok(())
    }
}
