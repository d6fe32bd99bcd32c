//! Internal helpers re-exported for integration tests.
//!
//! Provides recording doubles for every collaborator the orchestrator talks
//! to, disposable package trees laid out the way npm nests the installer,
//! and a log capture helper for asserting on tracing output.

mod archives;
mod fakes;
mod logging;
mod tree;

pub use archives::{write_tar_gz, write_zip};
pub use fakes::{RecordingDownloader, RecordingLauncher, StaticParentConfig};
pub use logging::capture_logs;
pub use tree::InstallTree;
