//! In-place regex patching of text files
//!
//! Reads a whole file, replaces every non-overlapping match, and writes the
//! result back over the original. No backup is kept; callers are expected to
//! run against a clean checkout they can restore from version control.

use std::path::Path;

use regex::Regex;

use crate::error::Result;

/// Apply `pattern -> repl` over the full contents of the file at `path`.
///
/// Replacement syntax follows the `regex` crate: `$1` and `${name}` refer to
/// capture groups.
pub fn patchfile(path: &Path, pattern: &str, repl: &str) -> Result<()> {
    let re = Regex::new(pattern)?;
    let contents = std::fs::read_to_string(path)?;
    let patched = re.replace_all(&contents, repl);
    std::fs::write(path, patched.as_bytes())?;
    Ok(())
}
