use serde::Deserialize;

/// Debian buster on packages.debian.org
pub const DEFAULT_BASE_URL: &str = "https://packages.debian.org/buster/";

/// Main configuration structure for dpkg-builder
///
/// Every section is optional; a missing section (or a missing config file)
/// falls back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub index: IndexConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub download: DownloadConfig,
    pub extract: ExtractConfig,
}

/// Where package index pages are looked up
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Base URL the escaped package name is appended to
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub name: String,
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Download destination configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Directory the per-package directories are created in
    #[serde(rename = "output-dir")]
    pub output_dir: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
        }
    }
}

/// Source extraction tool configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Program to run, looked up on PATH
    pub program: String,

    /// Arguments placed before the description file name
    pub args: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            program: "dpkg-source".to_string(),
            args: vec!["-x".to_string(), "--no-check".to_string()],
        }
    }
}
