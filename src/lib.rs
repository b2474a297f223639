//! Release-verification toolkit
//!
//! Helper functions used while preparing a release: verify the repository is
//! a clean git checkout, check that the release tag is annotated and points
//! at HEAD, fetch checksum-verified artifacts, patch version strings into
//! files, and wrap noisy build commands with per-step log files.
//!
//! Each helper is an independent utility; there is no engine or state shared
//! between calls. External programs are reached through two narrow seams so
//! tests can script them:
//!
//! - [`cmd::Exec`] runs a program and captures its output (git, make, and
//!   the logged command runner all go through it)
//! - [`download::TransferClient`] fetches a URL to a local path
//!
//! Fatal conditions are returned as [`Error`] values; the `reltool` binary is
//! the single place that prints them in red and exits with status 1.
//!
//! # Example
//!
//! ```no_run
//! use release_toolkit::cmd::SystemExec;
//! use release_toolkit::download::HttpClient;
//! use release_toolkit::{download, git};
//!
//! # fn main() -> release_toolkit::Result<()> {
//! git::verify_git_repo(&SystemExec)?;
//! git::verify_git_clean(&SystemExec)?;
//! git::check_git_tag_for_release(&SystemExec, "v4.12.1")?;
//! download::download_with_sha256(
//!     &HttpClient,
//!     "https://example.org/pkg-4.12.1.tar.gz",
//!     std::path::Path::new("pkg-4.12.1.tar.gz"),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod checksum;
pub mod cmd;
pub mod download;
pub mod error;
pub mod git;
pub mod logged;
pub mod make;
pub mod output;
pub mod patch;
pub mod workdir;

pub use error::{Error, Result};
