//! Temporary dependency trees mirroring how npm nests the installer inside
//! its parent package.
//!
//! The layout is:
//!
//! ```text
//! <root>/app/node_modules/connector/              package root
//! <root>/app/node_modules/connector/package.json  parent descriptor
//! <root>/app/node_modules/connector/node_modules/ dependency root
//!     loopback-oracle-installer/                  install dir
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::eyre::{Context, Result, eyre};
use tempfile::TempDir;

use crate::gate::marker_dir;
use crate::package::PACKAGE_DESCRIPTOR;
use crate::resolver::{InstallInputs, InstallLayout, InstallerEnv};

/// A disposable package tree rooted in a temporary directory.
#[derive(Debug)]
pub struct InstallTree {
    _temp: TempDir,
    root: Utf8PathBuf,
    layout: InstallLayout,
}

impl InstallTree {
    /// Creates the tree with only the installer directory present.
    ///
    /// The parent's dependency root exists implicitly because the installer
    /// lives inside it; call [`InstallTree::detached`] for an installer that
    /// is not nested in a parent package.
    ///
    /// # Errors
    /// Returns an error when the temporary directories cannot be created.
    pub fn nested() -> Result<Self> {
        Self::build("app/node_modules/connector/node_modules/loopback-oracle-installer")
    }

    /// Creates an installer whose conventional parent dependency root is absent.
    ///
    /// # Errors
    /// Returns an error when the temporary directories cannot be created.
    pub fn detached() -> Result<Self> {
        Self::build("checkout/loopback-oracle-installer")
    }

    fn build(relative_install_dir: &str) -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|raw| eyre!("tempdir is not UTF-8: {}", raw.display()))?;
        let install_dir = root.join(relative_install_dir);
        std::fs::create_dir_all(&install_dir).with_context(|| format!("create {install_dir}"))?;
        Ok(Self {
            _temp: temp,
            layout: InstallLayout::for_install_dir(&install_dir),
            root,
        })
    }

    /// Root of the temporary directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Conventional layout derived from the install directory.
    #[must_use]
    pub const fn layout(&self) -> &InstallLayout {
        &self.layout
    }

    /// Location of the installer package.
    #[must_use]
    pub fn install_dir(&self) -> &Utf8Path {
        &self.layout.install_dir
    }

    /// Writes the parent `package.json` verbatim.
    ///
    /// # Errors
    /// Returns an error when the descriptor cannot be written.
    pub fn write_parent_descriptor(&self, contents: &str) -> Result<()> {
        let path = self.layout.package_root.join(PACKAGE_DESCRIPTOR);
        std::fs::create_dir_all(&self.layout.package_root)
            .with_context(|| format!("create {}", self.layout.package_root))?;
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))
    }

    /// Creates the already-installed marker module in the dependency root.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created.
    pub fn create_marker(&self) -> Result<()> {
        let marker = marker_dir(&self.layout.dependency_root);
        std::fs::create_dir_all(&marker).with_context(|| format!("create {marker}"))
    }

    /// Creates a directory relative to the install directory.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created.
    pub fn create_install_subdir(&self, relative: &str) -> Result<Utf8PathBuf> {
        let path = self.layout.install_dir.join(relative);
        std::fs::create_dir_all(&path).with_context(|| format!("create {path}"))?;
        Ok(path)
    }

    /// Writes a file relative to the install directory, creating parents.
    ///
    /// # Errors
    /// Returns an error when the file cannot be written.
    pub fn write_install_file(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.layout.install_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Builds an input snapshot for this tree with no arguments and the given
    /// environment.
    #[must_use]
    pub fn inputs(&self, env: InstallerEnv) -> InstallInputs {
        InstallInputs {
            explicit_url: None,
            explicit_dest: None,
            env,
            install_dir: self.layout.install_dir.clone(),
        }
    }
}
