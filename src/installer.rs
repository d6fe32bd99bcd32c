//! Selects the platform installer script and the command that runs it.

use camino::{Utf8Path, Utf8PathBuf};

use crate::fs::{dir_exists, parent_or_up};
use crate::platform::Platform;
use crate::resolver::MODULES_DIR;

/// Directory under the install location holding per-platform installers.
pub const INSTALLERS_DIR: &str = "bin/installers";

/// Directory name of the vendor native client library.
pub const INSTANT_CLIENT_DIR: &str = "instantclient";

const SHELL: &str = "/bin/sh";
const SHELL_SCRIPT: &str = "installer.sh";
const WINDOWS_SHELL: &str = "cmd";
const WINDOWS_DIR: &str = "Windows";
const WINDOWS_SCRIPT: &str = "installer.bat";

/// Command line used to launch the platform installer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInstaller {
    /// Program to execute.
    pub command: String,
    /// Arguments passed to `command`, in order.
    pub arguments: Vec<String>,
}

impl PlatformInstaller {
    /// Builds the installer invocation for `platform`.
    ///
    /// Windows runs `cmd /c <install_dir>/bin/installers/Windows/installer.bat`.
    /// Every other platform runs `/bin/sh` on
    /// `<install_dir>/bin/installers/<Platform>/installer.sh`, passing the
    /// native client directory from [`instant_client_dir`].
    ///
    /// # Examples
    /// ```
    /// use camino::Utf8Path;
    /// use loopback_oracle_installer::{Platform, PlatformInstaller};
    ///
    /// let windows = Platform::from_target("windows", "x86_64");
    /// let installer = PlatformInstaller::for_platform(&windows, Utf8Path::new("/pkg"));
    /// assert_eq!(installer.command, "cmd");
    /// assert_eq!(installer.arguments, ["/c", "/pkg/bin/installers/Windows/installer.bat"]);
    /// ```
    #[must_use]
    pub fn for_platform(platform: &Platform, install_dir: &Utf8Path) -> Self {
        let installers = install_dir.join(INSTALLERS_DIR);
        if platform.is_windows() {
            let script = installers.join(WINDOWS_DIR).join(WINDOWS_SCRIPT);
            return Self {
                command: WINDOWS_SHELL.to_owned(),
                arguments: vec!["/c".to_owned(), script.into_string()],
            };
        }

        let script = installers
            .join(platform.os.installer_dir_name())
            .join(SHELL_SCRIPT);
        let client = instant_client_dir(install_dir);
        Self {
            command: SHELL.to_owned(),
            arguments: vec![script.into_string(), client.into_string()],
        }
    }

    /// Returns the script path the installer runs.
    #[must_use]
    pub fn script(&self) -> Option<&str> {
        let index = usize::from(self.command == WINDOWS_SHELL);
        self.arguments.get(index).map(String::as_str)
    }
}

/// Locates the native client directory for the installer at `install_dir`.
///
/// The installer's own `node_modules/instantclient` wins; otherwise the
/// sibling `../instantclient` is returned whether or not it exists.
#[must_use]
pub fn instant_client_dir(install_dir: &Utf8Path) -> Utf8PathBuf {
    let nested = install_dir.join(MODULES_DIR).join(INSTANT_CLIENT_DIR);
    if dir_exists(&nested) {
        nested
    } else {
        parent_or_up(install_dir).join(INSTANT_CLIENT_DIR)
    }
}
