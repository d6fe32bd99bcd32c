//! Shared filesystem helpers that operate within the capability sandbox.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use color_eyre::eyre::{Context, Result};
use std::io::ErrorKind;

/// Resolves a path to an ambient directory handle paired with the relative path component.
///
/// Absolute paths are opened relative to the ambient root; relative paths reuse the current
/// working directory.
pub(crate) fn ambient_dir_and_path(path: &Utf8Path) -> Result<(Dir, Utf8PathBuf)> {
    if path.has_root() {
        let stripped = path
            .strip_prefix("/")
            .map(Utf8Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf());
        let dir = Dir::open_ambient_dir("/", ambient_authority())
            .context("open ambient root directory")?;
        Ok((dir, stripped))
    } else {
        let dir = Dir::open_ambient_dir(".", ambient_authority())
            .context("open ambient working directory")?;
        Ok((dir, path.to_path_buf()))
    }
}

/// Ensures the provided path exists, creating intermediate directories when required.
pub(crate) fn ensure_dir_exists(path: &Utf8Path) -> Result<()> {
    let (dir, relative) = ambient_dir_and_path(path)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }

    dir.create_dir_all(relative.as_std_path())
        .or_else(|err| {
            if err.kind() == ErrorKind::AlreadyExists {
                Ok(())
            } else {
                Err(err)
            }
        })
        .with_context(|| format!("create {}", path.as_str()))
}

/// Reports whether `path` names an existing directory, following symlinks.
///
/// Lookup failures of any kind, including permission errors on an ancestor,
/// count as absence. Linked modules point outside any sandbox root, so the
/// probe uses the ambient filesystem rather than a capability handle.
pub(crate) fn dir_exists(path: &Utf8Path) -> bool {
    std::fs::metadata(path).is_ok_and(|metadata| metadata.is_dir())
}

/// Joins `path` onto the current working directory unless it is already absolute.
pub(crate) fn absolutize(path: &Utf8Path) -> Result<Utf8PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("read current working directory")?;
    let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|raw| {
        color_eyre::eyre::eyre!(
            "current working directory must be valid UTF-8: {}",
            raw.display()
        )
    })?;
    Ok(cwd.join(path))
}

/// Resolves `.` and `..` components lexically, without touching the filesystem.
///
/// `..` at the root of an absolute path stays at the root; leading `..` in a
/// relative path is kept.
pub(crate) fn normalise(path: &Utf8Path) -> Utf8PathBuf {
    let mut normalised = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                let last = normalised.components().next_back();
                let at_root = matches!(
                    last,
                    Some(Utf8Component::RootDir | Utf8Component::Prefix(_))
                );
                let can_pop = matches!(last, Some(Utf8Component::Normal(_)));
                if can_pop {
                    normalised.pop();
                } else if !at_root {
                    normalised.push("..");
                }
            }
            other => normalised.push(other.as_str()),
        }
    }
    normalised
}

/// Returns the parent of `path`, falling back to a lexical `..` component at the root.
pub(crate) fn parent_or_up(path: &Utf8Path) -> Utf8PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => path.join(".."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/srv/app/node_modules/installer", "/srv/app/node_modules")]
    #[case("/", "/..")]
    #[case("installer", "installer/..")]
    fn parent_or_up_handles_edges(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parent_or_up(Utf8Path::new(input)), Utf8PathBuf::from(expected));
    }

    #[rstest]
    #[case("/srv/./pkg/.", "/srv/pkg")]
    #[case("/w/app/node_modules/x/../installer", "/w/app/node_modules/installer")]
    #[case("/srv/a/b/../../c", "/srv/c")]
    #[case("/..", "/")]
    #[case("../installer", "../installer")]
    #[case("a/../../b", "../b")]
    fn normalise_resolves_dot_components(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalise(Utf8Path::new(input)), Utf8PathBuf::from(expected));
    }

    #[cfg(unix)]
    #[test]
    fn dir_exists_follows_absolute_symlinks() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|_| color_eyre::eyre::eyre!("tempdir must be UTF-8"))?;
        let target = root.join("linked-module");
        std::fs::create_dir_all(&target)?;
        let link = root.join("node_modules/strong-oracle");
        std::fs::create_dir_all(root.join("node_modules"))?;
        std::os::unix::fs::symlink(&target, &link)?;

        assert!(target.is_absolute());
        assert!(dir_exists(&link));
        Ok(())
    }

    #[test]
    fn dir_exists_distinguishes_files_from_directories() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|_| color_eyre::eyre::eyre!("tempdir must be UTF-8"))?;
        let file = root.join("package.json");
        std::fs::write(&file, "{}")?;

        assert!(dir_exists(&root));
        assert!(!dir_exists(&file));
        assert!(!dir_exists(&root.join("missing")));
        Ok(())
    }

    #[test]
    fn ensure_dir_exists_creates_nested_tree() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|_| color_eyre::eyre::eyre!("tempdir must be UTF-8"))?;
        let nested = root.join("a/b/c");

        ensure_dir_exists(&nested)?;
        ensure_dir_exists(&nested)?;

        assert!(dir_exists(&nested));
        Ok(())
    }

    #[test]
    fn absolutize_keeps_absolute_paths() -> Result<()> {
        let path = Utf8Path::new("/opt/installer");
        assert_eq!(absolutize(path)?, Utf8PathBuf::from("/opt/installer"));
        Ok(())
    }
}
