//! Post-install bootstrapper for the native Oracle database add-on.
//!
//! The library decides whether the native add-on needs installing, resolves
//! where its platform archive comes from and where it goes, fetches and
//! unpacks that archive, and finally hands control to the platform installer
//! script whose exit code becomes the process exit code.

mod bootstrap;
mod cli;
mod download;
mod error;
mod fs;
mod gate;
mod installer;
mod observability;
mod orchestrator;
mod package;
mod platform;
mod process;
mod resolver;
#[doc(hidden)]
pub mod test_support;

pub use bootstrap::{capture_inputs, run, run_with};
pub use cli::InstallerArgs;
pub use download::{
    ArchiveFormat, ArchiveLocation, ArchiveSource, DEFAULT_BASE_URL, DEFAULT_ORACLE_VERSION,
    DownloadReport, Downloader, HttpDownloader, archive_name, extract_archive, resolve_source,
};
pub use error::{
    BootstrapError, BootstrapResult, ConfigError, ConfigResult, DownloadError, DownloadErrorKind,
    DownloadResult, InstallerError, Result,
};
pub use gate::{MARKER_MODULE, marker_dir, should_install};
pub use installer::{INSTALLERS_DIR, INSTANT_CLIENT_DIR, PlatformInstaller, instant_client_dir};
pub use observability::{LOG_FILTER_ENV, init_tracing};
pub use orchestrator::{DOWNLOAD_FAILED_EXIT_CODE, ExitOutcome, Orchestrator};
pub use package::{
    PACKAGE_DESCRIPTOR, PackageJsonSource, ParentConfigSource, ParentPackageConfig,
    read_parent_config,
};
pub use platform::{Platform, PlatformOs, detect_platform};
pub use process::{InstallerLauncher, ProcessLauncher};
pub use resolver::{InstallInputs, InstallLayout, InstallRequest, InstallerEnv, MODULES_DIR, resolve};

use camino::Utf8PathBuf;
use color_eyre::eyre::eyre;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;

/// Captures installer settings supplied via `LOOPBACK_ORACLE_*` environment
/// variables.
///
/// # Examples
/// ```
/// use loopback_oracle_installer::InstallerEnvCfg;
///
/// let cfg = InstallerEnvCfg::default();
/// assert!(cfg.url.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, OrthoConfig, Default)]
#[ortho_config(prefix = "LOOPBACK_ORACLE")]
pub struct InstallerEnvCfg {
    /// Archive or base URL overriding the parent package configuration.
    pub url: Option<String>,
    /// Location of the installer package when not run from it.
    pub install_dir: Option<Utf8PathBuf>,
}

impl InstallerEnvCfg {
    /// Loads configuration from environment variables without parsing CLI arguments.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when a variable cannot be deserialised.
    pub fn load() -> ConfigResult<Self> {
        let args = [OsString::from("loopback-oracle-installer")];
        Self::load_from_iter(args).map_err(|err| ConfigError::from(eyre!(err)))
    }
}
