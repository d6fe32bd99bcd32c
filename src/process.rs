//! Launches the platform installer as a child process sharing this
//! process's standard streams.

use std::process::{Command, ExitStatus, Stdio};

use color_eyre::eyre::Context;

use crate::error::{BootstrapError, BootstrapResult};
use crate::installer::PlatformInstaller;
use crate::observability::LOG_TARGET;

/// Runs a [`PlatformInstaller`] and reports its exit code.
pub trait InstallerLauncher {
    /// Launches `installer`, waits for it to exit and returns its exit code.
    ///
    /// # Errors
    /// Returns a [`BootstrapError`] when the child cannot be spawned or waited on.
    fn launch(&self, installer: &PlatformInstaller) -> BootstrapResult<i32>;
}

impl<T: InstallerLauncher + ?Sized> InstallerLauncher for &T {
    fn launch(&self, installer: &PlatformInstaller) -> BootstrapResult<i32> {
        (**self).launch(installer)
    }
}

/// Spawns the installer with inherited stdio and no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl InstallerLauncher for ProcessLauncher {
    fn launch(&self, installer: &PlatformInstaller) -> BootstrapResult<i32> {
        tracing::info!(
            target: LOG_TARGET,
            command = %installer.command,
            args = ?installer.arguments,
            "running platform installer"
        );
        let status = Command::new(&installer.command)
            .args(&installer.arguments)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("failed to run {}", installer.command))
            .map_err(BootstrapError::from)?;
        let code = exit_code(status);
        tracing::debug!(target: LOG_TARGET, code, "platform installer exited");
        Ok(code)
    }
}

/// Maps an exit status to a process exit code.
///
/// Children terminated by a signal report `128 + signal` on Unix.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
