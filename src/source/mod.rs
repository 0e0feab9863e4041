//! Source package model
//!
//! A [`PackageSource`] collects the artifact links found on a package's
//! index page, at most one per [`ArtifactRole`], and tracks where the
//! description file was downloaded to.

mod classify;
mod resolve;

pub use classify::ArtifactRole;
pub use resolve::resolve_href;

use crate::download::Downloader;
use crate::Result;
use std::path::{Path, PathBuf};
use url::Url;

/// One package's discovered and downloaded artifact set
#[derive(Debug, Clone)]
pub struct PackageSource {
    name: String,
    base_url: Url,
    description: Option<String>,
    orig: Option<String>,
    debian: Option<String>,
    description_path: Option<PathBuf>,
}

impl PackageSource {
    /// Creates an empty source for `name`, resolving hrefs against `base_url`
    pub fn new(name: impl Into<String>, base_url: Url) -> Self {
        Self {
            name: name.into(),
            base_url,
            description: None,
            orig: None,
            debian: None,
            description_path: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL of the index page the hrefs are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the href retained for `role`, if any
    pub fn href(&self, role: ArtifactRole) -> Option<&str> {
        match role {
            ArtifactRole::Description => self.description.as_deref(),
            ArtifactRole::Orig => self.orig.as_deref(),
            ArtifactRole::Debian => self.debian.as_deref(),
        }
    }

    /// Local path of the downloaded description file
    pub fn description_path(&self) -> Option<&Path> {
        self.description_path.as_deref()
    }

    /// Assigns hrefs to roles by suffix
    ///
    /// Hrefs matching no role are ignored. When several hrefs match the
    /// same role the last one wins.
    ///
    /// # Example
    ///
    /// ```
    /// use dpkg_builder::{ArtifactRole, PackageSource};
    /// use url::Url;
    ///
    /// let base = Url::parse("https://packages.debian.org/buster/foo").unwrap();
    /// let mut source = PackageSource::new("foo", base);
    /// source.fill_from_links(["foo_1.0.dsc", "changelog", "foo_1.1.dsc"]);
    /// assert_eq!(source.href(ArtifactRole::Description), Some("foo_1.1.dsc"));
    /// assert_eq!(source.href(ArtifactRole::Orig), None);
    /// ```
    pub fn fill_from_links<I, S>(&mut self, links: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for link in links {
            let link = link.as_ref();
            let Some(role) = ArtifactRole::classify(link) else {
                continue;
            };
            tracing::debug!("Found {} link for {}: {}", role, self.name, link);
            let slot = match role {
                ArtifactRole::Description => &mut self.description,
                ArtifactRole::Orig => &mut self.orig,
                ArtifactRole::Debian => &mut self.debian,
            };
            *slot = Some(link.to_string());
        }
    }

    /// Resolves the present artifacts to absolute URLs, in download order
    ///
    /// Roles without a link are left out.
    pub fn artifact_urls(&self) -> Result<Vec<(ArtifactRole, Url)>> {
        ArtifactRole::FETCH_ORDER
            .into_iter()
            .filter_map(|role| self.href(role).map(|href| (role, href)))
            .map(|(role, href)| resolve_href(href, &self.base_url).map(|url| (role, url)))
            .collect()
    }

    /// Records where an artifact was stored
    pub fn record_download(&mut self, role: ArtifactRole, path: PathBuf) {
        if role == ArtifactRole::Description {
            self.description_path = Some(path);
        }
    }

    /// Downloads every present artifact into the package directory
    ///
    /// Artifacts are fetched one after another: description, Debian diff,
    /// then the original tarball. Missing roles are skipped silently.
    pub async fn fetch(&mut self, downloader: &Downloader) -> Result<()> {
        let urls = self.artifact_urls()?;
        if urls.len() < ArtifactRole::FETCH_ORDER.len() {
            tracing::debug!(
                "Only {} of {} artifacts linked from {}",
                urls.len(),
                ArtifactRole::FETCH_ORDER.len(),
                self.base_url()
            );
        }

        for (role, url) in urls {
            let path = downloader.download(&url, &self.name).await?;
            self.record_download(role, path);
        }

        Ok(())
    }
}
