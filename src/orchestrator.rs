//! Downloads the archive and dispatches the platform installer.

use crate::download::Downloader;
use crate::error::BootstrapResult;
use crate::installer::PlatformInstaller;
use crate::observability::LOG_TARGET;
use crate::platform::Platform;
use crate::process::InstallerLauncher;
use crate::resolver::InstallRequest;

/// Exit status to use when the archive could not be downloaded.
pub const DOWNLOAD_FAILED_EXIT_CODE: i32 = 1;

/// Terminal state of a bootstrap run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Nothing needed installing.
    Success,
    /// The download collaborator failed; no installer was launched.
    DownloadFailed,
    /// The platform installer ran and exited with the carried code.
    ChildExited(i32),
}

impl ExitOutcome {
    /// Returns the process exit code for this outcome.
    ///
    /// # Examples
    /// ```
    /// use loopback_oracle_installer::ExitOutcome;
    ///
    /// assert_eq!(ExitOutcome::Success.exit_code(), 0);
    /// assert_eq!(ExitOutcome::DownloadFailed.exit_code(), 1);
    /// assert_eq!(ExitOutcome::ChildExited(7).exit_code(), 7);
    /// ```
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::DownloadFailed => DOWNLOAD_FAILED_EXIT_CODE,
            Self::ChildExited(code) => code,
        }
    }
}

/// Drives one download-then-install run against pluggable collaborators.
#[derive(Debug)]
pub struct Orchestrator<D, L> {
    platform: Platform,
    downloader: D,
    launcher: L,
}

impl<D: Downloader, L: InstallerLauncher> Orchestrator<D, L> {
    /// Creates an orchestrator for `platform`.
    pub const fn new(platform: Platform, downloader: D, launcher: L) -> Self {
        Self {
            platform,
            downloader,
            launcher,
        }
    }

    /// Returns the platform installers are selected for.
    #[must_use]
    pub const fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Downloads the archive for `request` and runs the platform installer.
    ///
    /// A failed download yields [`ExitOutcome::DownloadFailed`] without
    /// launching anything. Otherwise the installer's exit code is returned
    /// verbatim as [`ExitOutcome::ChildExited`].
    ///
    /// # Errors
    /// Returns an error only when the installer cannot be launched.
    pub fn run(&self, request: &InstallRequest) -> BootstrapResult<ExitOutcome> {
        match self.downloader.download(request, &self.platform) {
            Ok(report) => {
                tracing::info!(
                    target: LOG_TARGET,
                    source = %report.source,
                    entries = report.entries,
                    "native archive installed"
                );
            }
            Err(err) => {
                tracing::error!(
                    target: LOG_TARGET,
                    kind = ?err.kind(),
                    "native archive download failed: {err:#}"
                );
                return Ok(ExitOutcome::DownloadFailed);
            }
        }

        let installer = PlatformInstaller::for_platform(&self.platform, &request.install_dir);
        let code = self.launcher.launch(&installer)?;
        Ok(ExitOutcome::ChildExited(code))
    }
}
