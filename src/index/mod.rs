//! Package index pages
//!
//! This module contains:
//! - HTTP client construction and index page fetching
//! - HTML parsing and anchor href extraction

mod fetcher;
mod parser;

pub use fetcher::{build_http_client, fetch_index, index_url};
pub use parser::extract_hrefs;
