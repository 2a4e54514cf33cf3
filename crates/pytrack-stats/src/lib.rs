//! Download statistics for Python packages, from the pypistats.org API.
//!
//! This crate is a thin, typed passthrough: it dispatches to the finite
//! set of statistics endpoints and hands back the JSON documents the API
//! serves, without caching or reshaping them.
//!
//! # Features
//!
//! - **Closed dispatch**: the five supported endpoints are an enum, and
//!   anything else fails with a typed error instead of a guessed URL
//! - **Typed wrappers**: `recent`, `overall`, `python_major`,
//!   `python_minor`, and `system` with the query parameters each endpoint
//!   understands
//! - **Shared HTTP stack**: clients are built through the same options as
//!   the release tracker's page fetches
//!
//! # Examples
//!
//! ```no_run
//! use pytrack_stats::{RecentPeriod, StatsClient};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = StatsClient::new();
//!
//! let recent = client
//!     .recent("requests", Some(RecentPeriod::Month))
//!     .await
//!     .unwrap();
//! println!("last month: {}", recent["data"]["last_month"]);
//!
//! let by_minor = client.python_minor("requests", None).await.unwrap();
//! assert!(by_minor["data"].is_array());
//! # }
//! ```

pub mod client;
pub mod error;
pub mod method;

// Re-export commonly used types
pub use client::{PYPISTATS_API_URL, StatsClient};
pub use error::{Result, StatsError};
pub use method::{RecentPeriod, StatsMethod};
