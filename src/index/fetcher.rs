//! HTTP fetcher for package index pages
//!
//! This module handles:
//! - Building the shared HTTP client with a proper user agent string
//! - Constructing the index page URL for a package
//! - GET requests for the index page body

use crate::config::UserAgentConfig;
use crate::{DpkgError, Result};
use reqwest::Client;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// The same client is used for the index page and for every artifact
/// download. No request timeout is set: a stalled server blocks the run.
///
/// # Example
///
/// ```no_run
/// use dpkg_builder::config::UserAgentConfig;
/// use dpkg_builder::index::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> std::result::Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", config.name, config.version);

    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the index page URL for a package
///
/// The package name is appended to `base_url` as a single, percent-encoded
/// path segment, so names containing `/` or spaces cannot change the path.
///
/// # Example
///
/// ```
/// use dpkg_builder::index::index_url;
/// use url::Url;
///
/// let base = Url::parse("https://packages.debian.org/buster/").unwrap();
/// let url = index_url(&base, "hello").unwrap();
/// assert_eq!(url.as_str(), "https://packages.debian.org/buster/hello");
/// ```
pub fn index_url(base_url: &Url, package: &str) -> Result<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| DpkgError::UrlParse(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .push(package);
    Ok(url)
}

/// Fetches the index page and returns its body as text
///
/// Transport failures and non-success statuses are both errors.
pub async fn fetch_index(client: &Client, url: &Url) -> Result<String> {
    tracing::info!("Downloading {}...", url);

    let http_error = |source: reqwest::Error| DpkgError::Http {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url.clone())
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(http_error)?;

    tracing::debug!("Index page {} returned {}", url, response.status());

    response.text().await.map_err(http_error)
}
