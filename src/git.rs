//! Repository state checks and release tag inspection
//!
//! All git invocations go through the [`Exec`] seam. A release may only be
//! cut from a clean checkout whose annotated tag points at the current HEAD
//! commit, and the functions here verify exactly that.

use std::sync::LazyLock;

use regex::Regex;

use crate::cmd::{CmdOutput, Exec};
use crate::error::{Error, Result};

/// Release tags look like `v<major>.<minor>.<patch>` with an optional
/// `-suffix`, e.g. `v4.12.1` or `v4.13.0-beta1`.
static RELEASE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v[0-9]+\.[0-9]+\.[0-9]+(-.+)?$").unwrap());

fn git(exec: &dyn Exec, args: &[&str]) -> Result<CmdOutput> {
    exec.exec("git", args).map_err(Error::Io)
}

/// Run a git command that is expected to succeed; non-zero exit is an error.
fn git_checked(exec: &dyn Exec, args: &[&str]) -> Result<CmdOutput> {
    let out = git(exec, args)?;
    if !out.success {
        return Err(Error::CommandFailed {
            cmd: format!("git {}", args.join(" ")),
            code: Some(out.exit_code),
        });
    }
    Ok(out)
}

/// Check that the current directory is the root of a git repository.
pub fn verify_git_repo(exec: &dyn Exec) -> Result<()> {
    let out = git(exec, &["--git-dir=.git", "rev-parse"])?;
    if !out.success {
        return Err(Error::NotGitRoot);
    }
    Ok(())
}

/// Whether the working tree has no uncommitted changes.
///
/// A failed index refresh also counts as not clean; its exit code is
/// propagated without distinguishing environmental failure from a genuinely
/// dirty tree.
pub fn is_git_clean(exec: &dyn Exec) -> Result<bool> {
    let refresh = git(exec, &["update-index", "--refresh"])?;
    if !refresh.success {
        return Ok(false);
    }
    let diff = git(exec, &["diff-index", "--quiet", "HEAD", "--"])?;
    Ok(diff.success)
}

/// Error out if the working tree has uncommitted changes.
pub fn verify_git_clean(exec: &dyn Exec) -> Result<()> {
    if !is_git_clean(exec)? {
        return Err(Error::DirtyWorkTree);
    }
    Ok(())
}

/// Whether `tag` has the shape of a release version tag.
pub fn is_possible_release_tag(tag: &str) -> bool {
    RELEASE_TAG_RE.is_match(tag)
}

/// Error out if `tag` does not look like a release version tag.
pub fn verify_is_possible_release_tag(tag: &str) -> Result<()> {
    if !is_possible_release_tag(tag) {
        return Err(Error::BadReleaseTag(tag.to_string()));
    }
    Ok(())
}

/// Whether `tag` exists in the local repository's tag namespace.
pub fn is_existing_tag(exec: &dyn Exec, tag: &str) -> Result<bool> {
    let reference = format!("refs/tags/{tag}");
    let out = git(exec, &["show-ref", "--quiet", "--verify", reference.as_str()])?;
    Ok(out.success)
}

/// Fetch all tags from the configured remote, with a remediation hint on
/// failure.
pub fn safe_git_fetch_tags(exec: &dyn Exec) -> Result<()> {
    let out = git(exec, &["fetch", "--tags"])?;
    if !out.success {
        return Err(Error::FetchTagsFailed);
    }
    Ok(())
}

/// Whether `tag` is an annotated tag (as opposed to a lightweight one).
///
/// An annotated tag is its own object of type `tag`; `for-each-ref` reports
/// that type as the second column. A lightweight tag resolves straight to a
/// commit and never shows the `tag` type there.
pub fn is_annotated_git_tag(exec: &dyn Exec, tag: &str) -> Result<bool> {
    let reference = format!("refs/tags/{tag}");
    let out = git(exec, &["for-each-ref", reference.as_str()])?;
    Ok(out.success && out.stdout.split_whitespace().nth(1) == Some("tag"))
}

/// Check that `tag` is an annotated tag pointing at the current HEAD commit.
pub fn check_git_tag_for_release(exec: &dyn Exec, tag: &str) -> Result<()> {
    if !is_annotated_git_tag(exec, tag)? {
        return Err(Error::NotAnnotatedTag(tag.to_string()));
    }

    // Dereference the tag object down to the commit it labels.
    let peeled = format!("{tag}^{{}}");
    let tag_commit = git_checked(exec, &["rev-parse", peeled.as_str()])?
        .stdout
        .trim()
        .to_string();
    let head = git_checked(exec, &["rev-parse", "HEAD"])?
        .stdout
        .trim()
        .to_string();

    if tag_commit != head {
        return Err(Error::TagNotAtHead {
            tag: tag.to_string(),
            head,
            tag_commit,
        });
    }
    Ok(())
}
