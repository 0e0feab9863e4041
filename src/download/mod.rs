//! Artifact downloads
//!
//! Every artifact of a package lands in `<output-dir>/<package>/<file>`,
//! where `<file>` is the last segment of the artifact URL's path. A file
//! that already exists is never fetched again, which makes re-running
//! `fetch` cheap. There is no integrity check: a truncated file left by
//! an interrupted run is kept as-is.

use crate::{DpkgError, Result};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use url::Url;

/// Downloads artifacts into per-package directories
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
    output_dir: PathBuf,
}

impl Downloader {
    /// Creates a downloader writing below `output_dir`
    pub fn new(client: Client, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
        }
    }

    /// Returns the directory holding a package's artifacts
    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.output_dir.join(package)
    }

    /// Computes where `url` is stored for `package`
    pub fn destination(&self, url: &Url, package: &str) -> Result<PathBuf> {
        Ok(self.package_dir(package).join(file_name(url)?))
    }

    /// Downloads `url` into the package directory and returns the local path
    ///
    /// If the destination already exists no request is made.
    ///
    /// # Errors
    ///
    /// * [`DpkgError::NoFileName`] - the URL path has no usable last segment
    /// * [`DpkgError::CreateDir`] - the package directory could not be created
    /// * [`DpkgError::Http`] - the request failed or returned a non-success status
    /// * [`DpkgError::Write`] - the body could not be written to disk
    pub async fn download(&self, url: &Url, package: &str) -> Result<PathBuf> {
        let dir = self.package_dir(package);
        let path = self.destination(url, package)?;
        tracing::info!("Downloading {} to {}...", url, path.display());

        ensure_dir_exists(&dir).await?;
        if tokio::fs::try_exists(&path).await? {
            tracing::info!("File already exists, skipping.");
            return Ok(path);
        }

        let http_error = |source: reqwest::Error| DpkgError::Http {
            url: url.to_string(),
            source,
        };
        let write_error = |source: std::io::Error| DpkgError::Write {
            path: path.clone(),
            source,
        };

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(http_error)?;

        let mut file = tokio::fs::File::create(&path).await.map_err(write_error)?;
        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await.map_err(http_error)? {
            file.write_all(&chunk).await.map_err(write_error)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(write_error)?;

        tracing::debug!("Wrote {} bytes to {}", written, path.display());
        Ok(path)
    }
}

/// Returns the decoded last segment of a URL's path
///
/// Segments that are empty or would step outside the package directory
/// (`.`, `..`, or containing an encoded separator) are rejected.
///
/// # Example
///
/// ```
/// use dpkg_builder::download::file_name;
/// use url::Url;
///
/// let url = Url::parse("https://deb.debian.org/debian/pool/main/h/hello/hello_2.10-2.dsc").unwrap();
/// assert_eq!(file_name(&url).unwrap(), "hello_2.10-2.dsc");
/// ```
pub fn file_name(url: &Url) -> Result<String> {
    let no_file_name = || DpkgError::NoFileName {
        url: url.to_string(),
    };

    let segment = url.path().rsplit('/').next().unwrap_or_default();
    let decoded = urlencoding::decode(segment).map_err(|_| no_file_name())?;

    if decoded.is_empty() || decoded == "." || decoded == ".." || decoded.contains(is_separator) {
        return Err(no_file_name());
    }

    Ok(decoded.into_owned())
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Creates the package directory if it is missing
async fn ensure_dir_exists(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| DpkgError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
}
