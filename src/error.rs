//! Domain error types for the native add-on bootstrapper.

use color_eyre::Report;
use thiserror::Error;

/// Result alias for operations that may return an [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;

/// Result alias for bootstrap-specific fallible operations.
pub type BootstrapResult<T> = std::result::Result<T, BootstrapError>;

/// Result alias for configuration fallible operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result alias for download fallible operations.
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Top-level error exposed by the crate.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// Indicates the install pipeline could not be prepared or dispatched.
    #[error("bootstrap failed")]
    Bootstrap(#[from] BootstrapError),
    /// Indicates configuration parsing failed.
    #[error("configuration parsing failed")]
    Config(#[from] ConfigError),
    /// Indicates the archive could not be fetched or unpacked.
    #[error("download failed")]
    Download(#[from] DownloadError),
}

/// Captures bootstrap failures, such as an installer that cannot be spawned.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct BootstrapError(#[from] Report);

impl BootstrapError {
    /// Extracts the underlying diagnostic report.
    #[must_use]
    pub fn into_report(self) -> Report {
        self.0
    }
}

impl From<ConfigError> for BootstrapError {
    fn from(err: ConfigError) -> Self {
        let ConfigError(report) = err;
        Self(report)
    }
}

/// Captures configuration failures, including unreadable parent descriptors.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ConfigError(#[from] Report);

/// Categorises download failures so callers can branch on structured errors.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum DownloadErrorKind {
    /// Represents errors without a more specific semantic meaning.
    #[default]
    Other,
    /// The source URL or path could not be interpreted.
    InvalidSource,
    /// The request could not be sent or the body could not be read.
    Transport,
    /// The server answered with a non-success status.
    HttpStatus,
    /// Local filesystem work around the download failed.
    Io,
    /// The archive could not be unpacked into the destination.
    Extraction,
}

/// Captures download failures reported by a [`crate::Downloader`].
#[derive(Debug, Error)]
#[error("{report}")]
pub struct DownloadError {
    kind: DownloadErrorKind,
    #[source]
    report: Report,
}

impl DownloadError {
    /// Constructs a new download error with the provided kind and diagnostic
    /// report.
    #[must_use]
    pub const fn new(kind: DownloadErrorKind, report: Report) -> Self {
        Self { kind, report }
    }

    /// Returns the semantic category for this download failure.
    #[must_use]
    pub const fn kind(&self) -> DownloadErrorKind {
        self.kind
    }

    /// Extracts the underlying diagnostic report.
    #[must_use]
    pub fn into_report(self) -> Report {
        self.report
    }
}

impl From<Report> for DownloadError {
    fn from(report: Report) -> Self {
        Self::new(DownloadErrorKind::Other, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;

    #[test]
    fn download_error_defaults_to_other_kind() {
        let err = DownloadError::from(eyre!("boom"));
        assert_eq!(err.kind(), DownloadErrorKind::Other);
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn config_error_converts_into_bootstrap_error() {
        let err = BootstrapError::from(ConfigError::from(eyre!("bad descriptor")));
        assert_eq!(err.into_report().to_string(), "bad descriptor");
    }

    #[test]
    fn installer_error_wraps_download_failures() {
        let err = InstallerError::from(DownloadError::new(
            DownloadErrorKind::HttpStatus,
            eyre!("404"),
        ));
        assert!(matches!(err, InstallerError::Download(ref inner) if inner.kind() == DownloadErrorKind::HttpStatus));
        assert_eq!(err.to_string(), "download failed");
    }
}
