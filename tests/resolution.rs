//! Behavioural coverage for location resolution and the install gate against
//! real package trees.

use color_eyre::eyre::Result;
use loopback_oracle_installer::test_support::{InstallTree, StaticParentConfig, capture_logs};
use loopback_oracle_installer::{
    InstallerEnv, PackageJsonSource, ParentPackageConfig, resolve, should_install,
};
use rstest::rstest;
use tracing::Level;

const CONFIGURED: &str =
    r#"{"name":"connector","config":{"oracleUrl":"https://example/x.zip","oracleVersion":"12.1.0"}}"#;

#[rstest]
fn explicit_url_beats_parent_configuration() -> Result<()> {
    let tree = InstallTree::nested()?;
    tree.write_parent_descriptor(CONFIGURED)?;
    let mut inputs = tree.inputs(InstallerEnv::default());
    inputs.explicit_url = Some("https://cli.example/oracle.tar.gz".into());

    let request = resolve(&inputs, &PackageJsonSource);

    assert_eq!(
        request.source_url.as_deref(),
        Some("https://cli.example/oracle.tar.gz")
    );
    assert_eq!(request.version.as_deref(), Some("12.1.0"));
    Ok(())
}

#[rstest]
fn parent_configuration_supplies_url_when_nothing_else_does() -> Result<()> {
    let tree = InstallTree::nested()?;
    tree.write_parent_descriptor(CONFIGURED)?;

    let request = resolve(&tree.inputs(InstallerEnv::default()), &PackageJsonSource);

    assert_eq!(request.source_url.as_deref(), Some("https://example/x.zip"));
    assert_eq!(request.version.as_deref(), Some("12.1.0"));
    Ok(())
}

#[rstest]
fn environment_beats_parent_url_but_not_parent_version() -> Result<()> {
    let tree = InstallTree::nested()?;
    tree.write_parent_descriptor(CONFIGURED)?;
    let env = InstallerEnv {
        url_override: Some("https://mirror.example/oracle/".into()),
        force: false,
    };

    let request = resolve(&tree.inputs(env), &PackageJsonSource);

    assert_eq!(
        request.source_url.as_deref(),
        Some("https://mirror.example/oracle/")
    );
    assert_eq!(request.version.as_deref(), Some("12.1.0"));
    Ok(())
}

#[rstest]
fn version_is_applied_without_a_configured_url() -> Result<()> {
    let tree = InstallTree::nested()?;
    tree.write_parent_descriptor(r#"{"config":{"oracleVersion":"11.2.0"}}"#)?;

    let request = resolve(&tree.inputs(InstallerEnv::default()), &PackageJsonSource);

    assert_eq!(request.source_url, None);
    assert_eq!(request.version.as_deref(), Some("11.2.0"));
    Ok(())
}

#[rstest]
fn unreadable_parent_configuration_is_ignored() -> Result<()> {
    let tree = InstallTree::nested()?;
    tree.write_parent_descriptor("{ this is not json")?;
    let env = InstallerEnv {
        url_override: Some("https://mirror.example/oracle/".into()),
        force: false,
    };
    let inputs = tree.inputs(env);

    let (logs, request) = capture_logs(Level::DEBUG, || resolve(&inputs, &PackageJsonSource));

    assert_eq!(
        request.source_url.as_deref(),
        Some("https://mirror.example/oracle/")
    );
    assert_eq!(request.version, None);
    assert_eq!(request.destination_directory, tree.layout().dependency_root);
    assert!(
        logs.iter()
            .any(|line| line.contains("ignoring unreadable parent configuration")),
        "expected a debug event, got: {logs:?}"
    );
    Ok(())
}

#[rstest]
fn parent_segments_in_install_dir_still_reach_the_package_root() -> Result<()> {
    let tree = InstallTree::nested()?;
    tree.write_parent_descriptor(CONFIGURED)?;
    tree.create_install_subdir("lib")?;
    let mut inputs = tree.inputs(InstallerEnv::default());
    inputs.install_dir = tree.install_dir().join("lib/..");

    let request = resolve(&inputs, &PackageJsonSource);

    assert_eq!(request.dependency_root, tree.layout().dependency_root);
    assert_eq!(request.install_dir, tree.install_dir());
    assert_eq!(request.source_url.as_deref(), Some("https://example/x.zip"));
    Ok(())
}

#[rstest]
fn default_flow_downloads_into_the_probed_dependency_root() -> Result<()> {
    let tree = InstallTree::nested()?;
    let parent = StaticParentConfig::new(None);

    let request = resolve(&tree.inputs(InstallerEnv::default()), &parent);

    assert_eq!(request.destination_directory, request.dependency_root);
    assert_eq!(parent.lookups(), 1);
    assert_eq!(parent.last_root(), Some(tree.layout().package_root.clone()));
    Ok(())
}

#[rstest]
fn detached_installer_downloads_into_its_own_modules() -> Result<()> {
    let tree = InstallTree::detached()?;
    let parent = StaticParentConfig::new(Some(ParentPackageConfig {
        oracle_url: Some("https://example/x.zip".into()),
        oracle_version: None,
    }));

    let request = resolve(&tree.inputs(InstallerEnv::default()), &parent);

    assert_eq!(parent.lookups(), 0);
    assert_eq!(request.source_url, None);
    assert_eq!(
        request.destination_directory,
        tree.install_dir().join("node_modules")
    );
    Ok(())
}

#[rstest]
fn explicit_destination_bypasses_parent_configuration() -> Result<()> {
    let tree = InstallTree::nested()?;
    let parent = StaticParentConfig::new(Some(ParentPackageConfig {
        oracle_url: Some("https://example/x.zip".into()),
        oracle_version: Some("12.1.0".into()),
    }));
    let mut inputs = tree.inputs(InstallerEnv::default());
    let dest = tree.root().join("elsewhere");
    inputs.explicit_dest = Some(dest.clone());

    let request = resolve(&inputs, &parent);

    assert_eq!(parent.lookups(), 0);
    assert_eq!(request.destination_directory, dest);
    assert_eq!(request.dependency_root, tree.layout().dependency_root);
    assert_eq!(request.version, None);
    Ok(())
}

#[rstest]
#[case(false, false, true)]
#[case(false, true, false)]
#[case(true, true, true)]
fn gate_probes_the_parent_dependency_root(
    #[case] force: bool,
    #[case] marker: bool,
    #[case] expected: bool,
) -> Result<()> {
    let tree = InstallTree::nested()?;
    if marker {
        tree.create_marker()?;
    }
    let mut inputs = tree.inputs(InstallerEnv {
        url_override: None,
        force,
    });
    // An explicit destination must not redirect the marker probe.
    inputs.explicit_dest = Some(tree.root().join("elsewhere"));

    let request = resolve(&inputs, &PackageJsonSource);

    assert_eq!(should_install(force, &request.dependency_root), expected);
    Ok(())
}
