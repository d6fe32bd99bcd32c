//! Validates how arguments and environment variables are captured into the
//! input snapshot.

use camino::Utf8PathBuf;
use color_eyre::eyre::Result;
use loopback_oracle_installer::{InstallerArgs, InstallerEnvCfg, capture_inputs};
use rstest::rstest;
use serial_test::serial;
use temp_env::with_vars;

const URL_ENV: &str = "LOOPBACK_ORACLE_URL";
const INSTALL_DIR_ENV: &str = "LOOPBACK_ORACLE_INSTALL_DIR";
const FORCE_ENV: &str = "npm_config_force";

#[rstest]
#[serial]
fn prefixed_variables_populate_configuration() {
    with_vars(
        [
            (URL_ENV, Some("https://mirror.example/oracle/")),
            (INSTALL_DIR_ENV, Some("/srv/pkg")),
        ],
        || {
            let cfg = InstallerEnvCfg::load().expect("configuration loads");
            assert_eq!(cfg.url.as_deref(), Some("https://mirror.example/oracle/"));
            assert_eq!(cfg.install_dir, Some(Utf8PathBuf::from("/srv/pkg")));
        },
    );
}

#[rstest]
#[serial]
fn unset_variables_leave_configuration_empty() {
    with_vars([(URL_ENV, None::<&str>), (INSTALL_DIR_ENV, None)], || {
        let cfg = InstallerEnvCfg::load().expect("configuration loads");
        assert!(cfg.url.is_none());
        assert!(cfg.install_dir.is_none());
    });
}

#[rstest]
#[case(None, false)]
#[case(Some(""), false)]
#[case(Some("false"), false)]
#[case(Some("0"), false)]
#[case(Some("true"), true)]
#[serial]
fn npm_force_flag_is_captured(#[case] value: Option<&str>, #[case] expected: bool) {
    with_vars(
        [
            (FORCE_ENV, value),
            (URL_ENV, None),
            (INSTALL_DIR_ENV, Some("/srv/pkg")),
        ],
        || {
            let inputs = capture_inputs(&InstallerArgs::default()).expect("inputs captured");
            assert_eq!(inputs.env.force, expected);
        },
    );
}

#[rstest]
#[serial]
fn cli_install_dir_beats_environment() -> Result<()> {
    let args = InstallerArgs {
        install_dir: Some(Utf8PathBuf::from("/opt/cli/./installer")),
        ..InstallerArgs::default()
    };
    let inputs = with_vars(
        [(INSTALL_DIR_ENV, Some("/srv/pkg")), (FORCE_ENV, None)],
        || capture_inputs(&args),
    )?;

    assert_eq!(inputs.install_dir, Utf8PathBuf::from("/opt/cli/installer"));
    Ok(())
}

#[rstest]
#[serial]
fn parent_segments_are_resolved_in_captured_paths() -> Result<()> {
    let args = InstallerArgs {
        dest: Some(Utf8PathBuf::from("/tmp/a/../dest")),
        install_dir: Some(Utf8PathBuf::from("/opt/pkg/node_modules/x/../installer")),
        ..InstallerArgs::default()
    };
    let inputs = with_vars([(FORCE_ENV, None::<&str>)], || capture_inputs(&args))?;

    assert_eq!(
        inputs.install_dir,
        Utf8PathBuf::from("/opt/pkg/node_modules/installer")
    );
    assert_eq!(inputs.explicit_dest, Some(Utf8PathBuf::from("/tmp/dest")));
    Ok(())
}

#[rstest]
#[serial]
fn arguments_and_environment_are_kept_separate() -> Result<()> {
    let args = InstallerArgs {
        url: Some("https://cli.example/oracle.tar.gz".into()),
        dest: Some(Utf8PathBuf::from("/tmp/dest")),
        install_dir: None,
    };
    let inputs = with_vars(
        [
            (URL_ENV, Some("https://env.example/")),
            (INSTALL_DIR_ENV, Some("/srv/pkg")),
            (FORCE_ENV, None),
        ],
        || capture_inputs(&args),
    )?;

    assert_eq!(
        inputs.explicit_url.as_deref(),
        Some("https://cli.example/oracle.tar.gz")
    );
    assert_eq!(inputs.env.url_override.as_deref(), Some("https://env.example/"));
    assert_eq!(inputs.explicit_dest, Some(Utf8PathBuf::from("/tmp/dest")));
    assert_eq!(inputs.install_dir, Utf8PathBuf::from("/srv/pkg"));
    Ok(())
}

#[rstest]
#[serial]
fn install_dir_defaults_to_working_directory() -> Result<()> {
    let inputs = with_vars([(INSTALL_DIR_ENV, None::<&str>), (FORCE_ENV, None)], || {
        capture_inputs(&InstallerArgs::default())
    })?;

    let cwd = std::env::current_dir()?;
    assert_eq!(inputs.install_dir.as_std_path(), cwd.as_path());
    Ok(())
}
