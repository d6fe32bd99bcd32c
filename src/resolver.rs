//! Resolves where the native archive comes from and where it is unpacked.
//!
//! Precedence, highest first:
//!
//! - URL: positional argument, then `LOOPBACK_ORACLE_URL`, then the parent
//!   package's `config.oracleUrl`.
//! - Version: the parent package's `config.oracleVersion`; otherwise unset and
//!   left to the downloader's default.
//! - Destination: positional argument, then the parent package's
//!   `node_modules` when it exists, then the installer's own `node_modules`.
//!
//! The parent configuration is only consulted when no explicit destination
//! was supplied and the parent's `node_modules` exists.

use camino::{Utf8Path, Utf8PathBuf};

use crate::fs::{dir_exists, normalise, parent_or_up};
use crate::observability::LOG_TARGET;
use crate::package::ParentConfigSource;

/// Directory holding a package's installed dependencies.
pub const MODULES_DIR: &str = "node_modules";

/// Environment-derived inputs captured once at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallerEnv {
    /// Value of `LOOPBACK_ORACLE_URL`, when set.
    pub url_override: Option<String>,
    /// Whether `npm_config_force` requested a reinstall.
    pub force: bool,
}

/// Immutable snapshot of every external input the resolver consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallInputs {
    /// First positional argument.
    pub explicit_url: Option<String>,
    /// Second positional argument.
    pub explicit_dest: Option<Utf8PathBuf>,
    /// Environment snapshot.
    pub env: InstallerEnv,
    /// Absolute location of the installer package itself.
    pub install_dir: Utf8PathBuf,
}

/// Conventional directories derived from the installer location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    /// Location of the installer package.
    pub install_dir: Utf8PathBuf,
    /// Root of the parent package, two levels above the installer.
    pub package_root: Utf8PathBuf,
    /// The parent package's dependency directory.
    pub dependency_root: Utf8PathBuf,
}

impl InstallLayout {
    /// Derives the layout for an installer living at `install_dir`.
    ///
    /// `.` and `..` components are resolved before walking up to the parent
    /// package.
    ///
    /// # Examples
    /// ```
    /// use camino::Utf8Path;
    /// use loopback_oracle_installer::InstallLayout;
    ///
    /// let layout = InstallLayout::for_install_dir(Utf8Path::new(
    ///     "/app/node_modules/connector/node_modules/installer",
    /// ));
    /// assert_eq!(layout.package_root, "/app/node_modules/connector");
    /// assert_eq!(layout.dependency_root, "/app/node_modules/connector/node_modules");
    /// ```
    #[must_use]
    pub fn for_install_dir(install_dir: &Utf8Path) -> Self {
        let install_dir = normalise(install_dir);
        let package_root = parent_or_up(&parent_or_up(&install_dir));
        let dependency_root = package_root.join(MODULES_DIR);
        Self {
            install_dir,
            package_root,
            dependency_root,
        }
    }

    /// Returns the installer's own dependency directory.
    #[must_use]
    pub fn nested_modules_dir(&self) -> Utf8PathBuf {
        self.install_dir.join(MODULES_DIR)
    }
}

/// Fully resolved parameters handed to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// Archive URL or base URL; `None` selects the downloader's default.
    pub source_url: Option<String>,
    /// Archive version; `None` selects the downloader's default.
    pub version: Option<String>,
    /// Directory the archive is unpacked into.
    pub destination_directory: Utf8PathBuf,
    /// Parent dependency directory probed for an existing installation.
    pub dependency_root: Utf8PathBuf,
    /// Location of the installer package and its scripts.
    pub install_dir: Utf8PathBuf,
}

/// Resolves the install request from the captured inputs.
///
/// Failures to read the parent configuration are absorbed by `parent`; the
/// resolution then continues with whatever values are already known.
pub fn resolve(inputs: &InstallInputs, parent: &dyn ParentConfigSource) -> InstallRequest {
    let layout = InstallLayout::for_install_dir(&inputs.install_dir);
    let mut source_url = non_blank(inputs.explicit_url.as_deref())
        .or_else(|| non_blank(inputs.env.url_override.as_deref()));
    let mut version = None;

    let destination_directory = if let Some(dest) = &inputs.explicit_dest {
        dest.clone()
    } else if dir_exists(&layout.dependency_root) {
        if let Some(config) = parent.lookup(&layout.package_root) {
            if source_url.is_none() {
                source_url = non_blank(config.oracle_url.as_deref());
            }
            if config.oracle_version.is_some() {
                version = config.oracle_version;
            }
        }
        layout.dependency_root.clone()
    } else {
        layout.nested_modules_dir()
    };

    let request = InstallRequest {
        source_url,
        version,
        destination_directory,
        dependency_root: layout.dependency_root,
        install_dir: layout.install_dir,
    };
    tracing::debug!(
        target: LOG_TARGET,
        url = ?request.source_url,
        version = ?request.version,
        destination = %request.destination_directory,
        "resolved install request"
    );
    request
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(str::to_owned)
}
