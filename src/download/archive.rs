//! Unpacks downloaded archives into the destination directory.

use std::fs::{self, File};
use std::io::{self, BufReader};

use camino::Utf8Path;
use color_eyre::eyre::{Context, eyre};

use super::source::ArchiveFormat;
use crate::error::{DownloadError, DownloadErrorKind, DownloadResult};
use crate::fs::ensure_dir_exists;
use crate::observability::LOG_TARGET;

/// Extracts `archive` into `dest`, creating `dest` when missing.
///
/// Returns the number of entries written.
///
/// # Errors
/// Returns [`DownloadErrorKind::Extraction`] when the archive is unreadable or
/// an entry cannot be written, and [`DownloadErrorKind::Io`] when `dest`
/// cannot be created.
pub fn extract_archive(archive: &Utf8Path, format: ArchiveFormat, dest: &Utf8Path) -> DownloadResult<usize> {
    ensure_dir_exists(dest).map_err(|err| DownloadError::new(DownloadErrorKind::Io, err))?;
    tracing::debug!(
        target: LOG_TARGET,
        archive = %archive,
        ?format,
        dest = %dest,
        "extracting archive"
    );
    let written = match format {
        ArchiveFormat::TarGz => extract_tar_gz(archive, dest),
        ArchiveFormat::Zip => extract_zip(archive, dest),
    }
    .map_err(|err| DownloadError::new(DownloadErrorKind::Extraction, err))?;
    tracing::debug!(target: LOG_TARGET, entries = written, "archive extracted");
    Ok(written)
}

fn extract_tar_gz(archive: &Utf8Path, dest: &Utf8Path) -> color_eyre::Result<usize> {
    let file = File::open(archive).with_context(|| format!("open {archive}"))?;
    let decoder = flate2::read::GzDecoder::new(BufReader::new(file));
    let mut tarball = tar::Archive::new(decoder);
    tarball.set_preserve_permissions(true);

    let mut written = 0;
    for entry in tarball.entries().with_context(|| format!("read {archive}"))? {
        let mut entry = entry.with_context(|| format!("read entry from {archive}"))?;
        // `unpack_in` refuses entries that would escape `dest`.
        let unpacked = entry
            .unpack_in(dest.as_std_path())
            .with_context(|| format!("unpack entry from {archive}"))?;
        if unpacked {
            written += 1;
        } else {
            tracing::debug!(target: LOG_TARGET, "skipping tar entry outside destination");
        }
    }
    Ok(written)
}

fn extract_zip(archive: &Utf8Path, dest: &Utf8Path) -> color_eyre::Result<usize> {
    let file = File::open(archive).with_context(|| format!("open {archive}"))?;
    let mut zipped = zip::ZipArchive::new(file).with_context(|| format!("read {archive}"))?;

    let mut written = 0;
    for index in 0..zipped.len() {
        let mut entry = zipped
            .by_index(index)
            .with_context(|| format!("read entry {index} from {archive}"))?;
        let Some(relative) = entry.enclosed_name() else {
            tracing::debug!(target: LOG_TARGET, name = entry.name(), "skipping unsafe zip entry");
            continue;
        };
        let target = dest.as_std_path().join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).with_context(|| format!("create {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
            }
            let mut out = File::create(&target).with_context(|| format!("create {}", target.display()))?;
            io::copy(&mut entry, &mut out).with_context(|| format!("write {}", target.display()))?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    fs::set_permissions(&target, fs::Permissions::from_mode(mode))
                        .with_context(|| format!("chmod {}", target.display()))?;
                }
            }
        }
        written += 1;
    }
    if written == 0 && !zipped.is_empty() {
        return Err(eyre!("{archive} contained no extractable entries"));
    }
    Ok(written)
}
