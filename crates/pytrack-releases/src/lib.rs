//! Release tracking for the python.org downloads listing.
//!
//! This crate scrapes the downloads page into typed records and answers
//! version queries against them: newest and oldest stable release,
//! deprecation checks, version ranges, and runtime minimum checks.
//!
//! # Features
//!
//! - **Release history**: every published release with its date, flagged
//!   deprecated once its series leaves maintenance
//! - **Maintained series**: the active-versions table with status, support
//!   window, and release schedule PEP
//! - **Version grammar**: `X.Y` / `X.Y.Z` parsing, normalization, and
//!   numeric tuple ordering
//! - **Cached scraping**: one page fetch per [`PageCache`] lifetime, with
//!   per-selector extraction memoized on top
//!
//! # Architecture
//!
//! - **Version model**: [`VersionTuple`] and the parsing helpers in
//!   [`version`]
//! - **Page layer**: [`DocumentQuery`] memoizes `(url, selector)` text
//!   extraction over a shared [`PageCache`]
//! - **Extractor**: [`PageExtractor`] holds all knowledge of the page's
//!   CSS classes and header rows
//! - **Facade**: [`ReleaseTracker`] joins the tables into records and
//!   queries
//! - **Error Handling**: typed errors with `thiserror`
//!
//! # Examples
//!
//! ## Querying the live page
//!
//! ```no_run
//! use pytrack_core::PageCache;
//! use pytrack_releases::ReleaseTracker;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let pages = Arc::new(PageCache::new());
//! let tracker = ReleaseTracker::new(pages);
//!
//! let newest = tracker.max_stable_version().await.unwrap();
//! println!("newest stable: {}", newest.version);
//!
//! assert!(tracker.is_deprecated("2.7.18").await.unwrap());
//! # }
//! ```
//!
//! ## Validating version strings offline
//!
//! ```
//! use pytrack_releases::normalize_version;
//!
//! assert_eq!(normalize_version("3.9").unwrap(), "3.9.0");
//! assert_eq!(normalize_version("3.9.1").unwrap(), "3.9.1");
//! assert!(normalize_version("3.x").is_err());
//! ```

pub mod error;
pub mod extract;
pub mod page;
pub mod tracker;
pub mod types;
pub mod version;

// Re-export commonly used types
pub use error::{Result, TrackError};
pub use extract::PageExtractor;
pub use page::DocumentQuery;
pub use pytrack_core::PageCache;
pub use tracker::{DOWNLOADS_URL, ReleaseTracker, TrackerConfig};
pub use types::{ActiveReleaseRecord, ReleaseRecord};
pub use version::{VersionTuple, compare_versions, normalize_version, parse_runtime_version};
