use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while fetching a tracked page.
///
/// Both variants name the URL that failed so callers can report which
/// source went away without carrying extra context themselves.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The request never produced a usable response (connect failure,
    /// protocol error, timeout, or an unreadable body).
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },
}

/// Result alias used throughout pytrack-core.
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Wrap a transport-level failure for `url`.
    pub fn fetch(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    /// Wrap a non-2xx response for `url`.
    pub fn status(url: impl Into<String>, status: StatusCode) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_names_url() {
        let err = CoreError::status("https://example.com/downloads", StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_string(),
            "HTTP 404 Not Found for https://example.com/downloads"
        );
    }

    #[test]
    fn test_fetch_display_names_url() {
        // Force a reqwest error by handing the client an unparseable URL.
        let source = reqwest::Client::new().get("not a url").build().unwrap_err();
        let err = CoreError::fetch("https://example.com/downloads", source);
        assert!(
            err.to_string()
                .starts_with("failed to fetch https://example.com/downloads")
        );
    }
}
