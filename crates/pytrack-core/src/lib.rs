//! HTTP plumbing shared by the pytrack crates.
//!
//! This crate owns two concerns:
//!
//! - **Client construction** ([`http`]): one place where the user agent,
//!   timeout, connection lifetime, and TLS policy are decided.
//! - **Page memoization** ([`cache`]): [`PageCache`] fetches each URL at
//!   most once per cache lifetime and hands out the shared body, with
//!   concurrent callers collapsed onto a single in-flight request.
//!
//! The cache is an explicit object the service crates receive from the
//! host, never hidden global state, so tests can construct and drop one
//! per case.
//!
//! # Examples
//!
//! ```no_run
//! use pytrack_core::{HttpOptions, PageCache};
//!
//! # async fn example() -> pytrack_core::Result<()> {
//! let cache = PageCache::with_options(&HttpOptions::default())?;
//! let body = cache.get_text("https://www.python.org/downloads").await?;
//! println!("fetched {} bytes", body.len());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod http;

pub use cache::PageCache;
pub use error::{CoreError, Result};
pub use http::{HttpOptions, build_client};
