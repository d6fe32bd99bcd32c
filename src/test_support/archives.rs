//! Builds small archives on disk for extraction tests.

use std::fs::File;
use std::io::Write;

use camino::Utf8Path;
use color_eyre::eyre::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use zip::write::SimpleFileOptions;

/// Writes a gzip tarball at `path` holding `entries` as `(name, contents)` files.
///
/// # Errors
/// Returns an error when the archive cannot be written.
pub fn write_tar_gz(path: &Utf8Path, entries: &[(&str, &str)]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {path}"))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, contents) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, contents.as_bytes())
            .with_context(|| format!("append {name}"))?;
    }
    let encoder = builder.into_inner().context("finish tarball")?;
    encoder.finish().context("finish gzip stream")?;
    Ok(())
}

/// Writes a zip archive at `path` holding `entries` as `(name, contents)` files.
///
/// # Errors
/// Returns an error when the archive cannot be written.
pub fn write_zip(path: &Utf8Path, entries: &[(&str, &str)]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {path}"))?;
    let mut writer = zip::ZipWriter::new(file);
    for (name, contents) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .with_context(|| format!("start {name}"))?;
        writer
            .write_all(contents.as_bytes())
            .with_context(|| format!("write {name}"))?;
    }
    writer.finish().context("finish zip")?;
    Ok(())
}
