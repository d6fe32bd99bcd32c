//! Wires the resolver, the install gate and the orchestrator into a single
//! run.
//!
//! [`run`] captures every external input once, resolves the install request,
//! consults the gate and, when an install is required, downloads the archive
//! and dispatches the platform installer. [`run_with`] performs the same
//! pipeline against caller-supplied collaborators.
mod env;

use camino::Utf8PathBuf;
use color_eyre::eyre::Context;

use crate::cli::InstallerArgs;
use crate::download::{Downloader, HttpDownloader};
use crate::error::{BootstrapResult, ConfigError, ConfigResult, Result as CrateResult};
use crate::fs::{absolutize, normalise};
use crate::gate::should_install;
use crate::observability::LOG_TARGET;
use crate::orchestrator::{ExitOutcome, Orchestrator};
use crate::package::{PackageJsonSource, ParentConfigSource};
use crate::platform::detect_platform;
use crate::process::{InstallerLauncher, ProcessLauncher};
use crate::resolver::{InstallInputs, InstallRequest, InstallerEnv, resolve};
use crate::InstallerEnvCfg;

use self::env::force_from_env;

/// Runs the bootstrapper for the supplied command-line arguments.
///
/// Honours `LOOPBACK_ORACLE_URL`, `LOOPBACK_ORACLE_INSTALL_DIR` and
/// `npm_config_force`. Returns the outcome the hosting process should exit
/// with.
///
/// # Errors
/// Returns an error when configuration cannot be loaded, the HTTP client
/// cannot be built or the platform installer cannot be launched.
pub fn run(args: &InstallerArgs) -> CrateResult<ExitOutcome> {
    if let Err(err) = color_eyre::install() {
        tracing::debug!(target: LOG_TARGET, "color_eyre already installed: {err}");
    }

    let inputs = capture_inputs(args)?;
    let Some(request) = plan(&inputs, &PackageJsonSource) else {
        return Ok(ExitOutcome::Success);
    };

    let downloader = HttpDownloader::new()?;
    let orchestrator = Orchestrator::new(detect_platform(), downloader, ProcessLauncher);
    Ok(orchestrator.run(&request)?)
}

/// Runs the pipeline for pre-captured `inputs` against the given collaborators.
///
/// # Errors
/// Returns an error when the platform installer cannot be launched.
pub fn run_with<D, L>(
    inputs: &InstallInputs,
    parent: &dyn ParentConfigSource,
    orchestrator: &Orchestrator<D, L>,
) -> BootstrapResult<ExitOutcome>
where
    D: Downloader,
    L: InstallerLauncher,
{
    match plan(inputs, parent) {
        Some(request) => orchestrator.run(&request),
        None => Ok(ExitOutcome::Success),
    }
}

/// Resolves the request and returns it only when the gate allows an install.
fn plan(inputs: &InstallInputs, parent: &dyn ParentConfigSource) -> Option<InstallRequest> {
    let request = resolve(inputs, parent);
    should_install(inputs.env.force, &request.dependency_root).then_some(request)
}

/// Captures arguments, configuration and environment into one snapshot.
///
/// The install directory comes from `--install-dir`, then
/// `LOOPBACK_ORACLE_INSTALL_DIR`, then the current working directory.
///
/// # Errors
/// Returns a [`ConfigError`] when configuration cannot be loaded, the force
/// flag is malformed or the working directory cannot be determined.
pub fn capture_inputs(args: &InstallerArgs) -> ConfigResult<InstallInputs> {
    let cfg = InstallerEnvCfg::load().context("failed to load configuration via OrthoConfig")?;
    let force = force_from_env()?;

    let install_dir = args
        .install_dir
        .clone()
        .or(cfg.install_dir)
        .unwrap_or_else(|| Utf8PathBuf::from("."));
    let install_dir = absolutize(&install_dir).map_err(ConfigError::from)?;
    let explicit_dest = args
        .dest
        .as_deref()
        .map(|dest| absolutize(dest).map(|path| normalise(&path)))
        .transpose()
        .map_err(ConfigError::from)?;

    Ok(InstallInputs {
        explicit_url: args.url.clone(),
        explicit_dest,
        env: InstallerEnv {
            url_override: cfg.url,
            force,
        },
        install_dir: normalise(&install_dir),
    })
}
