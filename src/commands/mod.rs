//! Subcommand implementations
//!
//! `fetch` runs the whole pipeline: index page, link classification,
//! downloads, then extraction. `build` only validates its argument for now.

use crate::config::Config;
use crate::download::Downloader;
use crate::extract::Extractor;
use crate::index::{build_http_client, extract_hrefs, fetch_index, index_url};
use crate::source::PackageSource;
use crate::{DpkgError, Result};
use url::Url;

/// Downloads and unpacks the sources of a package
///
/// The package name is required; without it a usage error is returned
/// before any request is made.
///
/// # Returns
///
/// The populated [`PackageSource`], with the description file's local path
/// set when one was downloaded.
pub async fn fetch(package: Option<&str>, config: &Config) -> Result<PackageSource> {
    let name = require_package("fetch", package)?;
    tracing::info!("Fetching {}", name);

    let base_url = Url::parse(&config.index.base_url)?;
    let page_url = index_url(&base_url, name)?;

    let client = build_http_client(&config.user_agent)?;
    let html = fetch_index(&client, &page_url).await?;
    let hrefs = extract_hrefs(&html);
    tracing::debug!("Index page {} has {} links", page_url, hrefs.len());

    let mut source = PackageSource::new(name, page_url);
    source.fill_from_links(&hrefs);

    let downloader = Downloader::new(client, &config.download.output_dir);
    source.fetch(&downloader).await?;

    Extractor::new(&config.extract).extract(&source).await?;

    Ok(source)
}

/// Builds a package
///
/// Only the argument check and a log line exist so far.
pub fn build(package: Option<&str>) -> Result<()> {
    tracing::info!("build");
    let name = require_package("build", package)?;
    tracing::info!("Building {}", name);
    Ok(())
}

/// Returns the package name or a usage error naming `command`
fn require_package<'a>(command: &'static str, package: Option<&'a str>) -> Result<&'a str> {
    match package {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(DpkgError::MissingPackageName { command }),
    }
}
