//! Parses the environment variables consumed by the bootstrapper that fall
//! outside the prefixed configuration.

use std::env::{self, VarError};

use color_eyre::eyre::eyre;

use crate::error::{ConfigError, ConfigResult};

/// Variable npm exports when `--force` is passed to `npm install`.
pub(crate) const FORCE_ENV: &str = "npm_config_force";

/// Reads the force-reinstall flag from [`FORCE_ENV`].
pub(crate) fn force_from_env() -> ConfigResult<bool> {
    match env::var(FORCE_ENV) {
        Ok(raw) => Ok(is_truthy(&raw)),
        Err(VarError::NotPresent) => Ok(false),
        Err(VarError::NotUnicode(value)) => Err(ConfigError::from(eyre!(
            "{FORCE_ENV} must contain a valid UTF-8 value (received {:?})",
            value
        ))),
    }
}

/// Interprets a flag value: anything non-blank other than `false` or `0`.
pub(crate) fn is_truthy(raw: &str) -> bool {
    let trimmed = raw.trim();
    !(trimmed.is_empty() || trimmed == "0" || trimmed.eq_ignore_ascii_case("false"))
}
