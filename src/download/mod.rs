//! Fetches the platform archive and unpacks it into the destination.
//!
//! The orchestrator only depends on the [`Downloader`] trait. The default
//! implementation, [`HttpDownloader`], resolves the archive location via
//! [`resolve_source`], streams remote archives through a temporary file and
//! extracts them with [`extract_archive`]. Failed downloads are never retried
//! and archives are not checksummed.

mod archive;
mod http;
mod source;

pub use archive::extract_archive;
pub use http::HttpDownloader;
pub use source::{
    ArchiveFormat, ArchiveLocation, ArchiveSource, DEFAULT_BASE_URL, DEFAULT_ORACLE_VERSION,
    archive_name, resolve_source,
};

use crate::error::DownloadResult;
use crate::platform::Platform;
use crate::resolver::InstallRequest;

/// Summary of a completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    /// URL or path the archive was read from.
    pub source: String,
    /// Bytes transferred over the network, when the archive was remote.
    pub bytes: Option<u64>,
    /// Number of archive entries written to the destination.
    pub entries: usize,
}

/// Fetches and unpacks the native archive described by an [`InstallRequest`].
pub trait Downloader {
    /// Downloads the archive for `platform` into `request.destination_directory`.
    ///
    /// # Errors
    /// Returns a [`crate::DownloadError`] when the archive cannot be fetched or
    /// unpacked. Cleanup of partial output is the implementation's concern.
    fn download(&self, request: &InstallRequest, platform: &Platform) -> DownloadResult<DownloadReport>;
}

impl<T: Downloader + ?Sized> Downloader for &T {
    fn download(&self, request: &InstallRequest, platform: &Platform) -> DownloadResult<DownloadReport> {
        (**self).download(request, platform)
    }
}
