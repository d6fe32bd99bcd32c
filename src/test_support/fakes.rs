//! Recording collaborators that stand in for the network, the filesystem
//! descriptor and the child process in tests.

use std::cell::{Cell, RefCell};

use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::eyre::eyre;

use crate::download::{DownloadReport, Downloader};
use crate::error::{BootstrapResult, DownloadError, DownloadErrorKind, DownloadResult};
use crate::installer::PlatformInstaller;
use crate::package::{ParentConfigSource, ParentPackageConfig};
use crate::platform::Platform;
use crate::process::InstallerLauncher;
use crate::resolver::InstallRequest;

/// Downloader that records requests and either succeeds or fails on demand.
#[derive(Debug, Default)]
pub struct RecordingDownloader {
    fail_with: Option<DownloadErrorKind>,
    calls: RefCell<Vec<(InstallRequest, Platform)>>,
}

impl RecordingDownloader {
    /// Creates a downloader whose calls all succeed.
    #[must_use]
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// Creates a downloader whose calls all fail with `kind`.
    #[must_use]
    pub fn failing(kind: DownloadErrorKind) -> Self {
        Self {
            fail_with: Some(kind),
            calls: RefCell::default(),
        }
    }

    /// Returns the requests received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<(InstallRequest, Platform)> {
        self.calls.borrow().clone()
    }
}

impl Downloader for RecordingDownloader {
    fn download(&self, request: &InstallRequest, platform: &Platform) -> DownloadResult<DownloadReport> {
        self.calls
            .borrow_mut()
            .push((request.clone(), platform.clone()));
        match self.fail_with {
            Some(kind) => Err(DownloadError::new(kind, eyre!("simulated download failure"))),
            None => Ok(DownloadReport {
                source: request
                    .source_url
                    .clone()
                    .unwrap_or_else(|| "default".to_owned()),
                bytes: None,
                entries: 0,
            }),
        }
    }
}

/// Launcher that records installers and reports a fixed exit code.
#[derive(Debug)]
pub struct RecordingLauncher {
    exit_code: i32,
    launched: RefCell<Vec<PlatformInstaller>>,
}

impl RecordingLauncher {
    /// Creates a launcher whose children exit with `exit_code`.
    #[must_use]
    pub const fn exiting_with(exit_code: i32) -> Self {
        Self {
            exit_code,
            launched: RefCell::new(Vec::new()),
        }
    }

    /// Returns the installers launched so far.
    #[must_use]
    pub fn launched(&self) -> Vec<PlatformInstaller> {
        self.launched.borrow().clone()
    }
}

impl InstallerLauncher for RecordingLauncher {
    fn launch(&self, installer: &PlatformInstaller) -> BootstrapResult<i32> {
        self.launched.borrow_mut().push(installer.clone());
        Ok(self.exit_code)
    }
}

/// Parent configuration source returning a fixed value and counting lookups.
#[derive(Debug, Default)]
pub struct StaticParentConfig {
    config: Option<ParentPackageConfig>,
    lookups: Cell<usize>,
    last_root: RefCell<Option<Utf8PathBuf>>,
}

impl StaticParentConfig {
    /// Returns `config` from every lookup.
    #[must_use]
    pub fn new(config: Option<ParentPackageConfig>) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Number of lookups performed.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    /// Package root passed to the most recent lookup.
    #[must_use]
    pub fn last_root(&self) -> Option<Utf8PathBuf> {
        self.last_root.borrow().clone()
    }
}

impl ParentConfigSource for StaticParentConfig {
    fn lookup(&self, package_root: &Utf8Path) -> Option<ParentPackageConfig> {
        self.lookups.set(self.lookups.get() + 1);
        self.last_root.replace(Some(package_root.to_path_buf()));
        self.config.clone()
    }
}
