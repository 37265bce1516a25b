//! Download of the HINT interaction tables.
//!
//! The download page is read once for its links; the wanted files are then
//! fetched one after another with a fixed pause between requests.

pub mod download;
pub mod manifest;
pub mod runtime;

pub use download::{DownloadOptions, download_all, download_file};
pub use manifest::{Link, fetch_links, parse_html_listing};
pub use runtime::{FetchError, SHARED_RUNTIME, http_client};
