//! External command execution
//!
//! Every subprocess the toolkit spawns goes through the [`Exec`] seam so that
//! unit tests can substitute scripted fakes for git and make.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Captured output from a finished command.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

// Fixtures for scripting fake commands in tests.
#[cfg(test)]
impl CmdOutput {
    pub fn ok() -> Self {
        Self::with_stdout("")
    }

    pub fn with_stdout(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: 0,
            success: true,
        }
    }

    pub fn failed(exit_code: i32) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            exit_code,
            success: false,
        }
    }
}

/// Runs external programs and captures their output.
pub trait Exec {
    /// Run `program` with `args`, blocking until it exits.
    ///
    /// Returns an error only when the process could not be spawned; a
    /// non-zero exit is reported through [`CmdOutput::success`].
    fn exec(&self, program: &str, args: &[&str]) -> io::Result<CmdOutput>;

    /// Run `program` with stdout and stderr redirected into the file at
    /// `log`, which is created or truncated before the command starts.
    ///
    /// The returned output has empty stream fields; the bytes went to the
    /// log. The default implementation captures and then writes, which is
    /// enough for fakes; the system implementation hands the child the file
    /// descriptors directly so output lands in the log as it is produced.
    fn exec_redirected(&self, program: &str, args: &[&str], log: &Path) -> io::Result<CmdOutput> {
        let out = self.exec(program, args)?;
        let mut file = File::create(log)?;
        file.write_all(out.stdout.as_bytes())?;
        file.write_all(out.stderr.as_bytes())?;
        Ok(CmdOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: out.exit_code,
            success: out.success,
        })
    }
}

/// [`Exec`] implementation that spawns real processes.
pub struct SystemExec;

impl Exec for SystemExec {
    fn exec(&self, program: &str, args: &[&str]) -> io::Result<CmdOutput> {
        let output = Command::new(program).args(args).output()?;

        Ok(CmdOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
            success: output.status.success(),
        })
    }

    fn exec_redirected(&self, program: &str, args: &[&str], log: &Path) -> io::Result<CmdOutput> {
        let stdout = File::create(log)?;
        let stderr = stdout.try_clone()?;
        let status = Command::new(program)
            .args(args)
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()?;

        Ok(CmdOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: status.code().unwrap_or(-1),
            success: status.success(),
        })
    }
}

/// Check that `cmd` resolves on the execution path.
pub fn verify_command_available(cmd: &str) -> Result<()> {
    which::which(cmd)
        .map(|_| ())
        .map_err(|_| Error::CommandNotFound(cmd.to_string()))
}
