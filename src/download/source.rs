//! Turns the resolved URL and version into a concrete archive location.

use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::eyre::eyre;
use reqwest::Url;

use crate::error::{DownloadError, DownloadErrorKind, DownloadResult};
use crate::platform::Platform;

/// Base URL used when neither arguments, environment nor configuration name one.
pub const DEFAULT_BASE_URL: &str =
    "https://github.com/strongloop/loopback-oracle-installer/releases/download";

/// Archive version used when none is configured.
pub const DEFAULT_ORACLE_VERSION: &str = "1.5.0";

/// Compression and container format of an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Gzip-compressed tarball.
    TarGz,
    /// Zip container.
    Zip,
}

impl ArchiveFormat {
    /// Infers the format from a file name or URL path.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if lower.ends_with(".zip") {
            Some(Self::Zip)
        } else {
            None
        }
    }
}

/// Where the archive bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveLocation {
    /// Fetched over HTTP(S).
    Remote(Url),
    /// Read from the local filesystem.
    Local(Utf8PathBuf),
}

/// A concrete archive ready to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSource {
    /// Location of the archive.
    pub location: ArchiveLocation,
    /// Container format used to unpack it.
    pub format: ArchiveFormat,
}

/// Returns the conventional archive file name for `platform` and `version`.
///
/// # Examples
/// ```
/// use loopback_oracle_installer::{Platform, archive_name};
///
/// let platform = Platform::from_target("linux", "x86_64");
/// assert_eq!(
///     archive_name(&platform, "1.5.0"),
///     "loopback-oracle-Linux-x64-1.5.0.tar.gz",
/// );
/// ```
#[must_use]
pub fn archive_name(platform: &Platform, version: &str) -> String {
    format!(
        "loopback-oracle-{}-{}-{version}.tar.gz",
        platform.os.installer_dir_name(),
        platform.arch
    )
}

/// Resolves the archive for an optional URL and version.
///
/// A URL whose path already names an archive is used as is. Any other URL is
/// treated as a base to which [`archive_name`] is appended. `file://` URLs
/// and plain paths select a local archive.
///
/// # Errors
/// Returns [`DownloadErrorKind::InvalidSource`] when a URL cannot be parsed or
/// a local path does not name a supported archive.
pub fn resolve_source(
    url: Option<&str>,
    version: Option<&str>,
    platform: &Platform,
) -> DownloadResult<ArchiveSource> {
    let version = version.unwrap_or(DEFAULT_ORACLE_VERSION);
    let raw = url.unwrap_or(DEFAULT_BASE_URL);

    if let Some(path) = local_path(raw)? {
        return local_source(path, platform, version);
    }

    let parsed = Url::parse(raw).map_err(|err| invalid(format!("invalid archive URL '{raw}': {err}")))?;
    if let Some(format) = ArchiveFormat::from_name(parsed.path()) {
        return Ok(ArchiveSource {
            location: ArchiveLocation::Remote(parsed),
            format,
        });
    }

    let base = raw.trim_end_matches('/');
    let joined = format!("{base}/{}", archive_name(platform, version));
    let url = Url::parse(&joined)
        .map_err(|err| invalid(format!("invalid archive URL '{joined}': {err}")))?;
    Ok(ArchiveSource {
        location: ArchiveLocation::Remote(url),
        format: ArchiveFormat::TarGz,
    })
}

fn local_path(raw: &str) -> DownloadResult<Option<Utf8PathBuf>> {
    if raw.starts_with("file:") {
        let url = Url::parse(raw).map_err(|err| invalid(format!("invalid file URL '{raw}': {err}")))?;
        let path = url
            .to_file_path()
            .map_err(|()| invalid(format!("file URL '{raw}' has no local path")))?;
        let utf8 = Utf8PathBuf::from_path_buf(path)
            .map_err(|path| invalid(format!("file URL path is not UTF-8: {}", path.display())))?;
        return Ok(Some(utf8));
    }
    if raw.contains("://") {
        return Ok(None);
    }
    let path = Utf8Path::new(raw);
    // Windows drive paths parse as URLs with a one-letter scheme.
    if path.is_absolute() || raw.starts_with('.') || Url::parse(raw).is_err() {
        Ok(Some(path.to_path_buf()))
    } else {
        Ok(None)
    }
}

fn local_source(path: Utf8PathBuf, platform: &Platform, version: &str) -> DownloadResult<ArchiveSource> {
    if let Some(format) = ArchiveFormat::from_name(path.as_str()) {
        return Ok(ArchiveSource {
            location: ArchiveLocation::Local(path),
            format,
        });
    }
    if path.is_dir() {
        return Ok(ArchiveSource {
            location: ArchiveLocation::Local(path.join(archive_name(platform, version))),
            format: ArchiveFormat::TarGz,
        });
    }
    Err(invalid(format!(
        "local archive '{path}' must end in .tar.gz, .tgz or .zip"
    )))
}

fn invalid(message: String) -> DownloadError {
    DownloadError::new(DownloadErrorKind::InvalidSource, eyre!(message))
}
