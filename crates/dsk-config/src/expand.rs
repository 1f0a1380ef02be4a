//! `${VAR}` references in `dsk.toml`.
//!
//! Only `server.host` and `catalog.root` are expanded, so one config file
//! can be shared between machines that keep the catalogue in different
//! places (`root = "${DESIGN_HOME}/catalog"`). A reference without a default
//! (`${VAR:-fallback}`) must name a set, valid Unicode variable.

use std::borrow::Cow;
use std::env::{self, VarError};

use crate::ConfigError;

/// Expand the variable references in the value of `field`.
///
/// Values without `${` are returned as they are; a bare `$VAR` is not a
/// reference.
pub(crate) fn expand_field(field: &str, value: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| env::var(name).map(Some))
        .map(Cow::into_owned)
        .map_err(|e| {
            let problem = match e.cause {
                VarError::NotPresent => "is not set",
                VarError::NotUnicode(_) => "is not valid Unicode",
            };
            ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{}}} {problem}", e.var_name),
            }
        })
}
