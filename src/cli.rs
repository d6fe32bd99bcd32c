//! Command-line surface of the bootstrapper.

use camino::Utf8PathBuf;
use clap::Parser;

/// Arguments accepted by the `loopback_oracle_installer` binary.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use loopback_oracle_installer::InstallerArgs;
///
/// let args = InstallerArgs::parse_from(["installer", "https://example/x.zip", "/opt/oracle"]);
/// assert_eq!(args.url.as_deref(), Some("https://example/x.zip"));
/// assert_eq!(args.dest.as_deref().map(|dest| dest.as_str()), Some("/opt/oracle"));
/// ```
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "loopback_oracle_installer",
    version,
    about = "Downloads the native Oracle add-on and runs its platform installer"
)]
pub struct InstallerArgs {
    /// Archive URL, base URL or local archive path; overrides every other source.
    pub url: Option<String>,
    /// Directory the archive is unpacked into.
    pub dest: Option<Utf8PathBuf>,
    /// Location of the installer package (defaults to the working directory).
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<Utf8PathBuf>,
}
