//! HTTP-backed [`Downloader`] that streams archives through a temporary file.

use std::io::Write;

use camino::Utf8PathBuf;
use color_eyre::eyre::{Context, eyre};
use reqwest::{Client, Url};
use tempfile::NamedTempFile;
use tokio::runtime::{Builder, Runtime};

use super::archive::extract_archive;
use super::source::{ArchiveLocation, resolve_source};
use super::{DownloadReport, Downloader};
use crate::error::{DownloadError, DownloadErrorKind, DownloadResult};
use crate::observability::LOG_TARGET;
use crate::platform::Platform;
use crate::resolver::InstallRequest;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches archives over HTTP(S) or from local paths and unpacks them.
///
/// Requests run on a private current-thread runtime; [`Downloader::download`]
/// blocks until the archive has been fetched and extracted.
#[derive(Debug)]
pub struct HttpDownloader {
    runtime: Runtime,
    client: Client,
}

impl HttpDownloader {
    /// Creates a downloader with its own runtime and HTTP client.
    ///
    /// # Errors
    /// Returns an error when the runtime or the HTTP client cannot be built.
    pub fn new() -> DownloadResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to create Tokio runtime")
            .map_err(|err| DownloadError::new(DownloadErrorKind::Io, err))?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")
            .map_err(|err| DownloadError::new(DownloadErrorKind::Transport, err))?;
        Ok(Self { runtime, client })
    }

    fn fetch_into(&self, url: &Url, sink: &mut impl Write) -> DownloadResult<u64> {
        self.runtime.block_on(async {
            let mut response = self
                .client
                .get(url.clone())
                .send()
                .await
                .with_context(|| format!("failed to request {url}"))
                .map_err(transport)?;

            let status = response.status();
            if !status.is_success() {
                return Err(DownloadError::new(
                    DownloadErrorKind::HttpStatus,
                    eyre!("download of {url} failed with status {status}"),
                ));
            }

            let mut received: u64 = 0;
            while let Some(chunk) = response
                .chunk()
                .await
                .with_context(|| format!("failed to read body of {url}"))
                .map_err(transport)?
            {
                sink.write_all(&chunk)
                    .context("failed to buffer archive")
                    .map_err(io)?;
                received += chunk.len() as u64;
            }
            Ok(received)
        })
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, request: &InstallRequest, platform: &Platform) -> DownloadResult<DownloadReport> {
        let source = resolve_source(
            request.source_url.as_deref(),
            request.version.as_deref(),
            platform,
        )?;
        let destination = &request.destination_directory;

        match &source.location {
            ArchiveLocation::Local(path) => {
                tracing::info!(target: LOG_TARGET, archive = %path, "using local archive");
                let entries = extract_archive(path, source.format, destination)?;
                Ok(DownloadReport {
                    source: path.to_string(),
                    bytes: None,
                    entries,
                })
            }
            ArchiveLocation::Remote(url) => {
                tracing::info!(target: LOG_TARGET, %url, "downloading native archive");
                let mut buffer = NamedTempFile::new()
                    .context("failed to create archive buffer")
                    .map_err(io)?;
                let bytes = self.fetch_into(url, buffer.as_file_mut())?;
                buffer
                    .as_file_mut()
                    .flush()
                    .context("failed to flush archive buffer")
                    .map_err(io)?;
                let path = Utf8PathBuf::from_path_buf(buffer.path().to_path_buf())
                    .map_err(|raw| io(eyre!("archive buffer path is not UTF-8: {}", raw.display())))?;
                let entries = extract_archive(&path, source.format, destination)?;
                Ok(DownloadReport {
                    source: url.to_string(),
                    bytes: Some(bytes),
                    entries,
                })
            }
        }
    }
}

fn transport(err: color_eyre::Report) -> DownloadError {
    DownloadError::new(DownloadErrorKind::Transport, err)
}

fn io(err: color_eyre::Report) -> DownloadError {
    DownloadError::new(DownloadErrorKind::Io, err)
}
