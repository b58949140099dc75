//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports `${VAR}`, which fails when VAR is unset, and `${VAR:-default}`.
/// Strings without `${` are returned unchanged, so a bare `$VAR` stays
/// literal.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

struct UnsetVar(String);
