//! Checksum-verified downloads
//!
//! Transfers go through the [`TransferClient`] seam; the system
//! implementation is [`HttpClient`] over ureq, which follows redirects.
//! `download_with_sha256` implements the skip-if-already-verified flow: the
//! sidecar checksum file is always refreshed from the remote, and the
//! artifact itself is only fetched when the local copy does not match it.

use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::checksum;
use crate::error::{Error, Result};
use crate::output;

/// Fetches remote resources to local paths.
pub trait TransferClient {
    /// Fetch `url` and write its body to `dest`, overwriting any existing
    /// file. Blocks until the transfer completes.
    fn fetch(&self, url: &str, dest: &Path) -> io::Result<()>;
}

/// HTTP implementation of [`TransferClient`].
pub struct HttpClient;

/// Spinner guard - clears the progress bar on any exit path.
struct ProgressGuard(ProgressBar);

impl Drop for ProgressGuard {
    fn drop(&mut self) {
        self.0.finish_and_clear();
    }
}

impl TransferClient for HttpClient {
    fn fetch(&self, url: &str, dest: &Path) -> io::Result<()> {
        let filename = dest
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "download".to_string());

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("     {spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(format!("downloading {}", filename));
        pb.enable_steady_tick(Duration::from_millis(80));
        let _guard = ProgressGuard(pb);

        let response = ureq::get(url).call().map_err(io::Error::other)?;

        let mut file = std::fs::File::create(dest)?;
        let mut reader = response.into_reader();
        let mut buffer = [0u8; 8192];

        loop {
            let n = reader.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            file.write_all(&buffer[..n])?;
        }

        Ok(())
    }
}

/// Download `url` to `dst`.
pub fn download(client: &dyn TransferClient, url: &str, dst: &Path) -> Result<()> {
    output::notice(&format!("downloading {} to {}", url, dst.display()));
    client.fetch(url, dst).map_err(|source| Error::DownloadFailed {
        url: url.to_string(),
        source,
    })
}

/// Download `url` to `dst` unless a file already exists at `dst` with the
/// expected checksum.
///
/// The sidecar at `url + ".sha256"` is always refreshed first, so a stale
/// local digest never suppresses a needed download. The freshly downloaded
/// artifact is verified against the sidecar; a mismatch means the transfer
/// was corrupted or truncated.
pub fn download_with_sha256(client: &dyn TransferClient, url: &str, dst: &Path) -> Result<()> {
    let sidecar_url = format!("{url}.sha256");
    download(client, &sidecar_url, &checksum::sidecar_path(dst))?;

    if dst.is_file() {
        if checksum::file_matches_checksumfile(dst)? {
            return Ok(());
        }
        output::notice(&format!(
            "{} exists but does not match the checksumfile; redownloading",
            dst.display()
        ));
    }

    download(client, url, dst)?;
    checksum::verify_via_checksumfile(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Scripted transfer client: serves canned bodies and counts fetches.
    struct FakeClient {
        bodies: HashMap<String, Vec<u8>>,
        fetched: RefCell<Vec<String>>,
    }

    impl FakeClient {
        fn new(bodies: &[(&str, &[u8])]) -> Self {
            Self {
                bodies: bodies
                    .iter()
                    .map(|(u, b)| (u.to_string(), b.to_vec()))
                    .collect(),
                fetched: RefCell::new(Vec::new()),
            }
        }

        fn fetch_count(&self, url: &str) -> usize {
            self.fetched.borrow().iter().filter(|u| *u == url).count()
        }
    }

    impl TransferClient for FakeClient {
        fn fetch(&self, url: &str, dest: &Path) -> io::Result<()> {
            self.fetched.borrow_mut().push(url.to_string());
            let body = self
                .bodies
                .get(url)
                .ok_or_else(|| io::Error::other(format!("no route for {url}")))?;
            std::fs::write(dest, body)
        }
    }

    const URL: &str = "https://example.org/pkg.tar.gz";
    const BODY: &[u8] = b"hello world";
    const BODY_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    fn client_with_artifact() -> FakeClient {
        FakeClient::new(&[
            (URL, BODY),
            ("https://example.org/pkg.tar.gz.sha256", BODY_SHA256.as_bytes()),
        ])
    }

    #[test]
    fn test_download_writes_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("pkg.tar.gz");
        let client = client_with_artifact();

        download(&client, URL, &dst).unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), BODY);
    }

    #[test]
    fn test_download_failure_names_url() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("pkg.tar.gz");
        let client = FakeClient::new(&[]);

        let err = download(&client, URL, &dst).unwrap_err();
        assert!(matches!(err, Error::DownloadFailed { .. }));
        assert!(err.to_string().contains(URL));
    }

    #[test]
    fn test_download_with_sha256_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("pkg.tar.gz");
        let client = client_with_artifact();

        download_with_sha256(&client, URL, &dst).unwrap();

        assert_eq!(std::fs::read(&dst).unwrap(), BODY);
        assert_eq!(client.fetch_count(URL), 1);
    }

    #[test]
    fn test_download_with_sha256_skips_matching_file() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("pkg.tar.gz");
        std::fs::write(&dst, BODY).unwrap();
        let client = client_with_artifact();

        download_with_sha256(&client, URL, &dst).unwrap();

        // Sidecar is always refreshed, the artifact itself is not refetched.
        assert_eq!(client.fetch_count("https://example.org/pkg.tar.gz.sha256"), 1);
        assert_eq!(client.fetch_count(URL), 0);
    }

    #[test]
    fn test_download_with_sha256_redownloads_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("pkg.tar.gz");
        std::fs::write(&dst, b"stale local contents").unwrap();
        let client = client_with_artifact();

        download_with_sha256(&client, URL, &dst).unwrap();

        assert_eq!(client.fetch_count(URL), 1);
        assert_eq!(std::fs::read(&dst).unwrap(), BODY);
    }

    #[test]
    fn test_download_with_sha256_corrupted_transfer() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("pkg.tar.gz");
        // Remote serves a body that does not match its own sidecar.
        let client = FakeClient::new(&[
            (URL, b"truncated".as_slice()),
            ("https://example.org/pkg.tar.gz.sha256", BODY_SHA256.as_bytes()),
        ]);

        let err = download_with_sha256(&client, URL, &dst).unwrap_err();
        assert!(matches!(err, Error::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_download_with_sha256_sidecar_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("pkg.tar.gz");
        let client = FakeClient::new(&[(URL, BODY)]);

        let err = download_with_sha256(&client, URL, &dst).unwrap_err();
        assert!(err.to_string().contains(".sha256"));
        assert_eq!(client.fetch_count(URL), 0);
    }
}
