//! Configuration module for dpkg-builder
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file, defaults matching Debian buster on
//! packages.debian.org and `dpkg-source -x --no-check` are used.
//!
//! # Example
//!
//! ```no_run
//! use dpkg_builder::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("dpkg-builder.toml")).unwrap();
//! println!("Sources go under: {}", config.download.output_dir);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DownloadConfig, ExtractConfig, IndexConfig, UserAgentConfig, DEFAULT_BASE_URL,
};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};
