//! Identifies the host platform so archives and installer scripts can be
//! selected per operating system and architecture.

use std::fmt;

/// Operating systems the installer knows how to name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformOs {
    /// Apple macOS.
    MacOs,
    /// Any Linux distribution.
    Linux,
    /// Microsoft Windows.
    Windows,
    /// Another target OS, carried by its raw target name.
    Other(String),
}

impl PlatformOs {
    fn from_target(os: &str) -> Self {
        match os {
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the directory name used for this OS under `bin/installers` and in
    /// archive names.
    #[must_use]
    pub fn installer_dir_name(&self) -> &str {
        match self {
            Self::MacOs => "MacOSX",
            Self::Linux => "Linux",
            Self::Windows => "Windows",
            Self::Other(name) => name,
        }
    }
}

/// Host identity consumed by the download and dispatch stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Operating system family.
    pub os: PlatformOs,
    /// Architecture tag as it appears in archive names, for example `x64`.
    pub arch: String,
}

impl Platform {
    /// Builds a platform from Rust target names such as `linux` and `x86_64`.
    ///
    /// # Examples
    /// ```
    /// use loopback_oracle_installer::{Platform, PlatformOs};
    ///
    /// let platform = Platform::from_target("windows", "x86");
    /// assert_eq!(platform.os, PlatformOs::Windows);
    /// assert_eq!(platform.arch, "ia32");
    /// ```
    #[must_use]
    pub fn from_target(os: &str, arch: &str) -> Self {
        let arch = match arch {
            "x86_64" => "x64",
            "x86" => "ia32",
            "aarch64" => "arm64",
            other => other,
        };
        Self {
            os: PlatformOs::from_target(os),
            arch: arch.to_owned(),
        }
    }

    /// Returns `true` when installers must be launched through `cmd`.
    #[must_use]
    pub const fn is_windows(&self) -> bool {
        matches!(self.os, PlatformOs::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.installer_dir_name(), self.arch)
    }
}

/// Detects the platform this binary was compiled for.
#[must_use]
pub fn detect_platform() -> Platform {
    Platform::from_target(std::env::consts::OS, std::env::consts::ARCH)
}
