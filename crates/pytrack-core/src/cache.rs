use crate::error::{CoreError, Result};
use crate::http::{self, HttpOptions};
use dashmap::DashMap;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// URL-keyed memoization of fetched page bodies.
///
/// The first successful fetch of a URL is cached for the lifetime of the
/// cache object and every later call returns the same shared body.
/// Concurrent callers for the same URL are collapsed onto a single
/// in-flight request, so at most one fetch per URL is ever running.
///
/// There is no TTL and no background refresh: release listings do change
/// upstream over time, but within one cache lifetime the data is frozen.
/// Hosts that need fresh data construct a new cache (or call [`clear`]).
///
/// A failed fetch is not cached. The error propagates to every caller
/// waiting on it, and the next call for that URL starts a new request.
///
/// [`clear`]: PageCache::clear
///
/// # Examples
///
/// ```no_run
/// use pytrack_core::PageCache;
///
/// # async fn example() -> pytrack_core::Result<()> {
/// let cache = PageCache::new();
///
/// // First call hits the network.
/// let body = cache.get_text("https://www.python.org/downloads").await?;
///
/// // Second call returns the same buffer, no request issued.
/// let again = cache.get_text("https://www.python.org/downloads").await?;
/// assert!(std::sync::Arc::ptr_eq(&body, &again));
/// # Ok(())
/// # }
/// ```
pub struct PageCache {
    entries: DashMap<String, Arc<OnceCell<Arc<str>>>>,
    client: Client,
}

impl PageCache {
    /// Creates a cache with the default [`HttpOptions`].
    pub fn new() -> Self {
        Self::with_options(&HttpOptions::default()).expect("default HTTP client always builds")
    }

    /// Creates a cache with custom HTTP options.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ClientBuild`] if the client cannot be
    /// constructed from the options.
    pub fn with_options(options: &HttpOptions) -> Result<Self> {
        Ok(Self::with_client(http::build_client(options)?))
    }

    /// Creates a cache around an existing client.
    pub fn with_client(client: Client) -> Self {
        Self {
            entries: DashMap::new(),
            client,
        }
    }

    /// Returns the body of `url` as text, fetching it at most once.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Fetch`] when the request fails at the
    /// transport level and [`CoreError::Status`] for a non-2xx response.
    /// Errors are not cached; a later call retries.
    pub async fn get_text(&self, url: &str) -> Result<Arc<str>> {
        let cell = self
            .entries
            .entry(url.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        // OnceCell serializes initializers, which is what guarantees the
        // single in-flight fetch per URL.
        let body = cell.get_or_try_init(|| self.fetch(url)).await?;
        Ok(Arc::clone(body))
    }

    async fn fetch(&self, url: &str) -> Result<Arc<str>> {
        tracing::debug!(url, "fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::status(url, status));
        }

        let text = response.text().await.map_err(|e| CoreError::fetch(url, e))?;
        tracing::debug!(url, bytes = text.len(), "page cached");
        Ok(Arc::from(text))
    }

    /// Drops every cached body, forcing the next call per URL to fetch
    /// fresh. Intended for tests and long-lived hosts that want a manual
    /// refresh point.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of URLs with a cached body.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    /// Returns `true` if no body has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seeds a body without fetching. Exists for benchmarks; real entries
    /// come from [`get_text`](Self::get_text).
    pub fn insert_for_bench(&self, url: String, body: &str) {
        self.entries
            .insert(url, Arc::new(OnceCell::new_with(Some(Arc::from(body)))));
    }

    /// Reads a cached body without fetching. Exists for benchmarks.
    pub fn get_for_bench(&self, url: &str) -> Option<Arc<str>> {
        self.entries
            .get(url)
            .and_then(|cell| cell.get().map(Arc::clone))
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetches_once_per_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/downloads")
            .with_status(200)
            .with_body("<html>releases</html>")
            .expect(1)
            .create_async()
            .await;

        let cache = PageCache::new();
        let url = format!("{}/downloads", server.url());

        let first = cache.get_text(&url).await.unwrap();
        let second = cache.get_text(&url).await.unwrap();

        assert_eq!(&*first, "<html>releases</html>");
        assert!(Arc::ptr_eq(&first, &second));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_fetch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/downloads")
            .with_status(200)
            .with_body("body")
            .expect(1)
            .create_async()
            .await;

        let cache = PageCache::new();
        let url = format!("{}/downloads", server.url());

        let (a, b) = tokio::join!(cache.get_text(&url), cache.get_text(&url));
        assert_eq!(&*a.unwrap(), "body");
        assert_eq!(&*b.unwrap(), "body");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_2xx_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/downloads")
            .with_status(503)
            .create_async()
            .await;

        let cache = PageCache::new();
        let url = format!("{}/downloads", server.url());

        let err = cache.get_text(&url).await.unwrap_err();
        assert!(matches!(err, CoreError::Status { .. }));
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains(&url));
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let mut server = mockito::Server::new_async().await;
        let url = format!("{}/downloads", server.url());
        let cache = PageCache::new();

        let failing = server
            .mock("GET", "/downloads")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;
        assert!(cache.get_text(&url).await.is_err());
        assert!(cache.is_empty());
        drop(failing);

        let _ok = server
            .mock("GET", "/downloads")
            .with_status(200)
            .with_body("recovered")
            .create_async()
            .await;
        assert_eq!(&*cache.get_text(&url).await.unwrap(), "recovered");
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/downloads")
            .with_status(200)
            .with_body("v1")
            .expect(2)
            .create_async()
            .await;

        let cache = PageCache::new();
        let url = format!("{}/downloads", server.url());

        cache.get_text(&url).await.unwrap();
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());

        cache.get_text(&url).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_distinct_urls_cached_separately() {
        let mut server = mockito::Server::new_async().await;
        let _a = server
            .mock("GET", "/a")
            .with_status(200)
            .with_body("alpha")
            .create_async()
            .await;
        let _b = server
            .mock("GET", "/b")
            .with_status(200)
            .with_body("beta")
            .create_async()
            .await;

        let cache = PageCache::new();
        let alpha = cache.get_text(&format!("{}/a", server.url())).await.unwrap();
        let beta = cache.get_text(&format!("{}/b", server.url())).await.unwrap();

        assert_eq!(&*alpha, "alpha");
        assert_eq!(&*beta, "beta");
        assert_eq!(cache.len(), 2);
    }
}
