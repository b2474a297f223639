//! Toolkit error types.

use thiserror::Error;

/// Errors that can occur during release preparation checks.
///
/// Every variant is a user-facing fatal condition: callers propagate these up
/// to the binary entry point, which prints them in red and exits with status 1.
/// Programming-contract violations (malformed `make` output, empty command
/// argument lists) are assertions instead and never appear here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("the '{0}' command was not found, please install it")]
    CommandNotFound(String),

    #[error("current directory is not a git root directory")]
    NotGitRoot,

    #[error("uncommitted changes detected")]
    DirtyWorkTree,

    #[error("{0} does not look like the tag of a release version")]
    BadReleaseTag(String),

    #[error("failed to fetch tags, you may have to do\ngit fetch --tags -f")]
    FetchTagsFailed,

    #[error("there is no annotated tag {0}")]
    NotAnnotatedTag(String),

    #[error("the tag {tag} does not point to the current commit {head} but instead points to {tag_commit}")]
    TagNotAtHead {
        tag: String,
        head: String,
        tag_commit: String,
    },

    #[error("checksum for '{file}' expected to be {expected} but got {actual}")]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    #[error("failed downloading {url}")]
    DownloadFailed {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{msg} failed. See {log}.")]
    LoggedCommandFailed { msg: String, log: String },

    #[error("command failed: {cmd} (exit code: {code:?})")]
    CommandFailed { cmd: String, code: Option<i32> },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
