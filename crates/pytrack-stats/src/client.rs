//! HTTP client for the pypistats.org API.

use crate::error::{Result, StatsError};
use crate::method::{RecentPeriod, StatsMethod};
use pytrack_core::{HttpOptions, build_client};
use serde_json::Value;

/// Live API root.
pub const PYPISTATS_API_URL: &str = "https://pypistats.org/api";

/// Download-statistics client.
///
/// Responses are returned as raw JSON documents in the shape pypistats.org
/// serves them, and nothing is cached: download counts move daily, unlike
/// the release listing.
pub struct StatsClient {
    client: reqwest::Client,
    base_url: String,
}

impl StatsClient {
    /// Client for the live API with default HTTP options.
    pub fn new() -> Self {
        // Default options are static and known to build.
        Self::with_options(&HttpOptions::default()).expect("default HTTP options build a client")
    }

    /// Client with explicit HTTP options.
    pub fn with_options(options: &HttpOptions) -> Result<Self> {
        Ok(Self {
            client: build_client(options)?,
            base_url: PYPISTATS_API_URL.to_string(),
        })
    }

    /// Points the client at a different API root. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// String-keyed dispatch: parses `method` and fetches.
    ///
    /// Method names match the API path segments (`"recent"`, `"overall"`,
    /// `"python_major"`, `"python_minor"`, `"system"`); anything else is
    /// [`StatsError::UnsupportedMethod`] without a request being made.
    pub async fn track(
        &self,
        method: &str,
        package: &str,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        self.fetch(method.parse()?, package, params).await
    }

    /// Fetches one statistics document for `package`.
    ///
    /// `params` are appended as query parameters; every endpoint tolerates
    /// an empty list. The typed wrappers below cover the parameters each
    /// endpoint actually understands.
    pub async fn fetch(
        &self,
        method: StatsMethod,
        package: &str,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        let url = format!(
            "{}/packages/{}/{}",
            self.base_url,
            urlencoding::encode(package),
            method.endpoint()
        );
        tracing::debug!(%url, "requesting download statistics");

        let mut request = self.client.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StatsError::request(&url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Status { url, status });
        }

        response
            .json()
            .await
            .map_err(|e| StatsError::decode(&url, e))
    }

    /// Downloads over the last day, week, and month. A period narrows the
    /// response to one window.
    pub async fn recent(&self, package: &str, period: Option<RecentPeriod>) -> Result<Value> {
        match period {
            Some(period) => {
                self.fetch(StatsMethod::Recent, package, &[("period", period.as_str())])
                    .await
            }
            None => self.fetch(StatsMethod::Recent, package, &[]).await,
        }
    }

    /// Daily download totals, optionally including mirror traffic.
    pub async fn overall(&self, package: &str, mirrors: Option<bool>) -> Result<Value> {
        match mirrors {
            Some(mirrors) => {
                let flag = if mirrors { "true" } else { "false" };
                self.fetch(StatsMethod::Overall, package, &[("mirrors", flag)])
                    .await
            }
            None => self.fetch(StatsMethod::Overall, package, &[]).await,
        }
    }

    /// Downloads broken down by Python major version, optionally filtered
    /// to one (e.g. `"3"`).
    pub async fn python_major(&self, package: &str, version: Option<&str>) -> Result<Value> {
        self.version_breakdown(StatsMethod::PythonMajor, package, version)
            .await
    }

    /// Downloads broken down by Python minor version, optionally filtered
    /// to one (e.g. `"3.12"`).
    pub async fn python_minor(&self, package: &str, version: Option<&str>) -> Result<Value> {
        self.version_breakdown(StatsMethod::PythonMinor, package, version)
            .await
    }

    /// Downloads broken down by operating system, optionally filtered to
    /// one (e.g. `"Linux"`).
    pub async fn system(&self, package: &str, os: Option<&str>) -> Result<Value> {
        match os {
            Some(os) => {
                self.fetch(StatsMethod::System, package, &[("os", os)])
                    .await
            }
            None => self.fetch(StatsMethod::System, package, &[]).await,
        }
    }

    async fn version_breakdown(
        &self,
        method: StatsMethod,
        package: &str,
        version: Option<&str>,
    ) -> Result<Value> {
        match version {
            Some(version) => self.fetch(method, package, &[("version", version)]).await,
            None => self.fetch(method, package, &[]).await,
        }
    }
}

impl Default for StatsClient {
    fn default() -> Self {
        Self::new()
    }
}
