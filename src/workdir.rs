//! Scoped working-directory switching
//!
//! The process working directory is shared state: other code in the same
//! process relies on it being put back even when the scoped work fails, so
//! restoration happens in `Drop` and runs on every exit path.

use std::io;
use std::path::{Path, PathBuf};

use crate::output;

/// Guard that restores the previous working directory when dropped.
///
/// # Example
/// ```no_run
/// use release_toolkit::workdir::WorkingDir;
///
/// let _guard = WorkingDir::change("/tmp/build")?;
/// // ... run build steps in /tmp/build ...
/// // previous directory restored here, even on early return or panic
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct WorkingDir {
    prev: PathBuf,
}

impl WorkingDir {
    /// Record the current directory and change to `path`.
    pub fn change(path: impl AsRef<Path>) -> io::Result<Self> {
        let prev = std::env::current_dir()?;
        std::env::set_current_dir(path)?;
        Ok(Self { prev })
    }

    /// The directory that will be restored on drop.
    pub fn previous(&self) -> &Path {
        &self.prev
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.prev) {
            // Nothing sensible to do beyond flagging it; the process may be
            // unwinding already.
            output::warning(&format!(
                "could not restore working directory to {}: {}",
                self.prev.display(),
                e
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test covering both exit paths: the working directory is
    // process-global, so the scenarios run sequentially in one function.
    #[test]
    fn test_restores_on_normal_and_panic_exit() {
        let dir = tempfile::tempdir().unwrap();
        let start = std::env::current_dir().unwrap();

        {
            let guard = WorkingDir::change(dir.path()).unwrap();
            assert_eq!(guard.previous(), start);
            assert_eq!(
                std::env::current_dir().unwrap().canonicalize().unwrap(),
                dir.path().canonicalize().unwrap()
            );
        }
        assert_eq!(std::env::current_dir().unwrap(), start);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = WorkingDir::change(dir.path()).unwrap();
            panic!("scoped work failed");
        }));
        assert!(result.is_err());
        assert_eq!(std::env::current_dir().unwrap(), start);
    }

    #[test]
    fn test_change_to_missing_directory_fails() {
        let result = WorkingDir::change("/definitely/not/a/real/path/12345");
        assert!(result.is_err());
    }
}
