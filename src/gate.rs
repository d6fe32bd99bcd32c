//! Decides whether an install should run at all.

use camino::{Utf8Path, Utf8PathBuf};

use crate::fs::dir_exists;
use crate::observability::LOG_TARGET;

/// Module whose presence in the parent dependency directory signals that the
/// native add-on is already installed.
pub const MARKER_MODULE: &str = "strong-oracle";

/// Returns the marker directory probed under `dependency_root`.
#[must_use]
pub fn marker_dir(dependency_root: &Utf8Path) -> Utf8PathBuf {
    dependency_root.join(MARKER_MODULE)
}

/// Returns `true` when the install must proceed.
///
/// `force` always wins. Otherwise the install proceeds only when the marker
/// module is absent from `dependency_root`, which must be the resolved parent
/// dependency directory rather than an explicit download destination.
///
/// # Examples
/// ```
/// use camino::Utf8Path;
/// use loopback_oracle_installer::should_install;
///
/// assert!(should_install(true, Utf8Path::new("/definitely/missing")));
/// assert!(should_install(false, Utf8Path::new("/definitely/missing")));
/// ```
#[must_use]
pub fn should_install(force: bool, dependency_root: &Utf8Path) -> bool {
    if force {
        tracing::debug!(target: LOG_TARGET, "reinstall forced");
        return true;
    }
    let marker = marker_dir(dependency_root);
    if dir_exists(&marker) {
        tracing::info!(
            target: LOG_TARGET,
            marker = %marker,
            "native add-on already present; skipping install"
        );
        false
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dependency_root(with_marker: bool) -> (tempfile::TempDir, Utf8PathBuf) {
        let temp = tempfile::tempdir().expect("create tempdir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf-8 tempdir");
        if with_marker {
            std::fs::create_dir_all(marker_dir(&root)).expect("create marker");
        }
        (temp, root)
    }

    #[rstest]
    #[case(false, false, true)]
    #[case(false, true, false)]
    #[case(true, false, true)]
    #[case(true, true, true)]
    fn gate_truth_table(#[case] force: bool, #[case] marker: bool, #[case] expected: bool) {
        let (_guard, root) = dependency_root(marker);
        assert_eq!(should_install(force, &root), expected);
    }

    #[cfg(unix)]
    #[test]
    fn linked_marker_module_counts_as_installed() {
        let (_guard, root) = dependency_root(false);
        let linked = root.join("workspace/strong-oracle");
        std::fs::create_dir_all(&linked).expect("create linked module");
        std::os::unix::fs::symlink(&linked, marker_dir(&root)).expect("link marker");

        assert!(!should_install(false, &root));
        assert!(should_install(true, &root));
    }

    #[test]
    fn marker_file_is_not_a_marker_directory() {
        let (_guard, root) = dependency_root(false);
        std::fs::write(marker_dir(&root), "not a module").expect("write marker file");
        assert!(should_install(false, &root));
    }
}
