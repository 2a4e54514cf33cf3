//! HTTP client construction shared by every pytrack crate.
//!
//! All outbound traffic goes through a client built here so the user
//! agent, timeout, connection lifetime, and TLS policy are decided in
//! one place.

use crate::error::{CoreError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Options for the shared HTTP client.
///
/// All fields have defaults, so hosts can deserialize a partial (or
/// empty) configuration object.
///
/// # Examples
///
/// ```
/// use pytrack_core::HttpOptions;
///
/// let options: HttpOptions = serde_json::from_str(r#"{"timeout_secs": 10}"#).unwrap();
/// assert_eq!(options.timeout_secs, 10);
/// assert!(options.force_close);
/// assert!(!options.danger_accept_invalid_certs);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct HttpOptions {
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Close connections after each request instead of keeping them
    /// pooled. On by default: the tracked pages are fetched once per
    /// process, so an idle pool buys nothing.
    #[serde(default = "default_true")]
    pub force_close: bool,

    /// Skip TLS certificate verification. Off by default; only enable
    /// when a host must reach the source through an intercepting proxy.
    #[serde(default)]
    pub danger_accept_invalid_certs: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            force_close: true,
            danger_accept_invalid_certs: false,
        }
    }
}

fn default_user_agent() -> String {
    concat!("pytrack/", env!("CARGO_PKG_VERSION")).to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_true() -> bool {
    true
}

/// Builds a `reqwest::Client` from the given options.
///
/// # Errors
///
/// Returns [`CoreError::ClientBuild`] if the underlying client cannot be
/// constructed (for example, an unusable TLS backend).
pub fn build_client(options: &HttpOptions) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(options.user_agent.clone())
        .timeout(Duration::from_secs(options.timeout_secs));

    if options.force_close {
        // A zero-size idle pool drops each connection once the response
        // has been read.
        builder = builder.pool_max_idle_per_host(0);
    }

    if options.danger_accept_invalid_certs {
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|source| CoreError::ClientBuild { source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = HttpOptions::default();
        assert!(options.user_agent.starts_with("pytrack/"));
        assert_eq!(options.timeout_secs, 30);
        assert!(options.force_close);
        assert!(!options.danger_accept_invalid_certs);
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let options: HttpOptions =
            serde_json::from_str(r#"{"user_agent": "probe/1.0"}"#).unwrap();
        assert_eq!(options.user_agent, "probe/1.0");
        assert_eq!(options.timeout_secs, 30);
    }

    #[test]
    fn test_build_client_default_options() {
        assert!(build_client(&HttpOptions::default()).is_ok());
    }

    #[test]
    fn test_build_client_insecure_options() {
        let options = HttpOptions {
            danger_accept_invalid_certs: true,
            ..HttpOptions::default()
        };
        assert!(build_client(&options).is_ok());
    }
}
