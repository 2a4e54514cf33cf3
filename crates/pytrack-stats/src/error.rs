//! Error types for the download statistics client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by pypistats.org requests.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A statistics endpoint this client does not dispatch to.
    #[error("stats method {method:?} is not supported")]
    UnsupportedMethod { method: String },

    /// Transport failure before a response arrived.
    #[error("failed to request {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP response. pypistats.org answers 404 for packages
    /// it has never seen.
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// The response body was not the JSON document the API promises.
    #[error("failed to decode stats response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Client construction failure, forwarded from the shared HTTP layer.
    #[error(transparent)]
    Core(#[from] pytrack_core::CoreError),
}

impl StatsError {
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            url: url.into(),
            source,
        }
    }

    pub fn decode(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }
}

/// Result type for statistics operations.
pub type Result<T> = std::result::Result<T, StatsError>;
