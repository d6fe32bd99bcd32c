//! Installs the native Oracle add-on after `npm install`.
//!
//! Skips silently when the add-on is already present. Otherwise fetches the
//! platform archive and runs the platform installer with inherited stdio. The
//! binary exits with `0` when nothing needed installing, `1` when the download
//! or launch failed, and otherwise with the installer's own exit code.

use clap::Parser;
use loopback_oracle_installer::{InstallerArgs, init_tracing, run};

fn main() {
    let args = InstallerArgs::parse();
    init_tracing();

    let code = match run(&args) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            tracing::error!("{:?}", color_eyre::eyre::eyre!(err));
            1
        }
    };
    std::process::exit(code);
}
