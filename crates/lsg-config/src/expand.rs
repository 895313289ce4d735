//! Environment variable and home directory expansion for config values.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `~`, `${VAR}` and `${VAR:-default}` in a configuration string.
///
/// `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::full(value)
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: e.to_string(),
        })
}
