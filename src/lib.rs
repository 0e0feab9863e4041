//! dpkg-builder: fetch and unpack Debian source packages
//!
//! This crate scrapes a package's index page for its source artifacts
//! (`.dsc`, `.orig.tar.*`, `.debian.tar.xz`), downloads them into a
//! per-package directory and hands the description file to `dpkg-source`.

pub mod commands;
pub mod config;
pub mod download;
pub mod extract;
pub mod index;
pub mod source;

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Main error type for dpkg-builder operations
#[derive(Debug, Error)]
pub enum DpkgError {
    #[error("{command}: no package name provided")]
    MissingPackageName { command: &'static str },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Error parsing URL {href}: {source}")]
    InvalidHref {
        href: String,
        source: ::url::ParseError,
    },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Cannot derive a file name from {url}")]
    NoFileName { url: String },

    #[error("Error creating directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error starting {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Error waiting for {program}: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    ExitFailure { program: String, status: ExitStatus },
}

/// Broad failure categories, used by the dispatcher when reporting errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The command line was incomplete
    Usage,
    /// The configuration file could not be loaded
    Config,
    /// An HTTP request failed
    Network,
    /// Reading or writing the download directory failed
    Filesystem,
    /// A URL or file name could not be parsed
    Parse,
    /// The extraction tool could not be run or failed
    Subprocess,
}

impl DpkgError {
    /// Returns the category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingPackageName { .. } => ErrorKind::Usage,
            Self::Config(_) => ErrorKind::Config,
            Self::Http { .. } | Self::Reqwest(_) => ErrorKind::Network,
            Self::InvalidHref { .. } | Self::UrlParse(_) | Self::NoFileName { .. } => {
                ErrorKind::Parse
            }
            Self::CreateDir { .. } | Self::Write { .. } | Self::Io(_) => ErrorKind::Filesystem,
            Self::Spawn { .. } | Self::Wait { .. } | Self::ExitFailure { .. } => {
                ErrorKind::Subprocess
            }
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for dpkg-builder operations
pub type Result<T> = std::result::Result<T, DpkgError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use download::Downloader;
pub use extract::Extractor;
pub use source::{ArtifactRole, PackageSource};
