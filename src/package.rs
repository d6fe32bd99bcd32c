//! Reads Oracle download settings from the parent package descriptor.
//!
//! The parent package (the connector that depends on this installer) may
//! declare `config.oracleUrl` and `config.oracleVersion` in its
//! `package.json`. The descriptor is only ever read; a missing or malformed
//! file is not fatal and simply yields no configuration.

use camino::Utf8Path;
use color_eyre::eyre::{Context, eyre};
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::observability::LOG_TARGET;

/// File name of the parent package descriptor.
pub const PACKAGE_DESCRIPTOR: &str = "package.json";

/// Oracle settings declared by the parent package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentPackageConfig {
    /// Archive location configured by the parent package.
    pub oracle_url: Option<String>,
    /// Archive version configured by the parent package.
    pub oracle_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackageDescriptor {
    #[serde(default)]
    config: Option<ParentPackageConfig>,
}

/// Source of parent package configuration, keyed by the parent package root.
pub trait ParentConfigSource {
    /// Returns the configuration declared under `package_root`, or `None` when
    /// none can be read.
    fn lookup(&self, package_root: &Utf8Path) -> Option<ParentPackageConfig>;
}

/// Reads `package.json` from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageJsonSource;

impl ParentConfigSource for PackageJsonSource {
    fn lookup(&self, package_root: &Utf8Path) -> Option<ParentPackageConfig> {
        match read_parent_config(package_root) {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(
                    target: LOG_TARGET,
                    package_root = %package_root,
                    "ignoring unreadable parent configuration: {err:#}"
                );
                None
            }
        }
    }
}

/// Parses the parent descriptor under `package_root`.
///
/// Returns `Ok(None)` when the descriptor declares no `config` object.
///
/// # Errors
/// Returns a [`ConfigError`] when the descriptor cannot be read or is not
/// valid JSON of the expected shape.
pub fn read_parent_config(package_root: &Utf8Path) -> ConfigResult<Option<ParentPackageConfig>> {
    let path = package_root.join(PACKAGE_DESCRIPTOR);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("read {path}"))
        .map_err(ConfigError::from)?;
    let descriptor: PackageDescriptor = serde_json::from_str(&raw)
        .map_err(|err| ConfigError::from(eyre!("parse {path}: {err}")))?;
    Ok(descriptor.config)
}
