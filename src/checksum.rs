//! Streaming SHA-256 checksums and sidecar checksum files
//!
//! A checksum-tracked artifact at path `P` keeps its trusted digest as plain
//! trimmed lowercase hex text at `P.sha256`. The download manager restores
//! the invariant that the sidecar matches the artifact's current bytes.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Chunk size for reading files during hashing. Bounds memory use
/// regardless of file size.
const CHUNK_SIZE: usize = 4096;

/// Compute the SHA-256 digest of a file, returned as lowercase hex.
pub fn sha256file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Path of the sidecar checksum file for `path`: `<path>.sha256`.
pub fn sidecar_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".sha256");
    PathBuf::from(os)
}

/// Read the expected digest from the sidecar file of `path`.
fn read_sidecar(path: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(sidecar_path(path))?;
    Ok(contents.trim().to_string())
}

/// Whether the file's digest equals the one recorded in its sidecar file.
pub fn file_matches_checksumfile(path: &Path) -> Result<bool> {
    let expected = read_sidecar(path)?;
    Ok(expected == sha256file(path)?)
}

/// Verify the file against its sidecar file, naming both digests on mismatch.
pub fn verify_via_checksumfile(path: &Path) -> Result<()> {
    let actual = sha256file(path)?;
    let expected = read_sidecar(path)?;
    if expected != actual {
        return Err(Error::ChecksumMismatch {
            file: path.display().to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}
