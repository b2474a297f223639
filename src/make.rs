//! Reading variables out of the build system
//!
//! Relies on the Makefile convention of a `print-<var>` target that echoes
//! one `<var>=<value>` line.

use crate::cmd::Exec;
use crate::error::{Error, Result};

/// Query `make` for the value of a Makefile variable.
///
/// A failing `make` invocation is propagated to the caller. Malformed output
/// from the `print-<var>` target is a contract violation with the build
/// system and aborts with an assertion failure rather than a clean error.
pub fn get_makefile_var(exec: &dyn Exec, var: &str) -> Result<String> {
    let target = format!("print-{var}");
    let out = exec.exec("make", &[target.as_str()]).map_err(Error::Io)?;

    if !out.success {
        return Err(Error::CommandFailed {
            cmd: format!("make {target}"),
            code: Some(out.exit_code),
        });
    }

    let line = out.stdout.trim();
    let kv: Vec<&str> = line.split('=').collect();
    assert!(
        kv.len() == 2,
        "make {target} produced malformed output: {line:?}"
    );
    assert!(
        kv[0] == var,
        "make {target} answered for variable {:?}, expected {var:?}",
        kv[0]
    );
    Ok(kv[1].to_string())
}
