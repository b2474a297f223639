//! Running commands with their output captured to a log file
//!
//! Build and packaging steps can be noisy; their combined stdout and stderr
//! goes to `../<name>.log` so the console stays readable and failures can be
//! inspected afterwards. The log is written in success and failure alike.

use std::path::{Path, PathBuf};

use crate::cmd::Exec;
use crate::error::{Error, Result};

/// Run `args` with output logged to `../<name>.log`.
///
/// `msg` defaults to `name` and is used in the failure message. The parent of
/// the current working directory must exist and be writable.
pub fn run_with_log(exec: &dyn Exec, args: &[&str], name: &str, msg: Option<&str>) -> Result<()> {
    let log = PathBuf::from(format!("../{name}.log"));
    run_with_log_at(exec, args, name, msg, &log)
}

/// Like [`run_with_log`] with an explicit log path (used by tests).
fn run_with_log_at(
    exec: &dyn Exec,
    args: &[&str],
    name: &str,
    msg: Option<&str>,
    log: &Path,
) -> Result<()> {
    assert!(!args.is_empty(), "run_with_log called with no command");
    let msg = msg.unwrap_or(name);

    let out = exec.exec_redirected(args[0], &args[1..], log).map_err(Error::Io)?;

    if !out.success {
        return Err(Error::LoggedCommandFailed {
            msg: msg.to_string(),
            log: format!("{name}.log"),
        });
    }
    Ok(())
}
