//! Error types for release tracking operations.

use pytrack_core::CoreError;
use thiserror::Error;

/// Errors surfaced by release-page scraping and version queries.
#[derive(Error, Debug)]
pub enum TrackError {
    /// Transport or HTTP failure while fetching the downloads page.
    #[error(transparent)]
    Fetch(#[from] CoreError),

    /// A CSS selector failed to parse.
    #[error("invalid CSS selector {selector:?}")]
    InvalidSelector { selector: String },

    /// Input that does not match the `X.Y` / `X.Y.Z` version grammar.
    #[error("invalid version format {version:?}: expected X.Y.Z or X.Y")]
    InvalidVersionFormat { version: String },

    /// A version that is well-formed but absent from the release history.
    #[error("version {version:?} is outside the known range of Python releases")]
    OutOfRange { version: String },

    /// A specific release was expected in the history table but not found.
    #[error("release {version:?} is not listed in the release history")]
    MissingRelease { version: String },

    /// The page fetched fine but its markup does not carry what we expect.
    #[error("unexpected downloads page structure: {message}")]
    PageStructure { message: String },

    /// The interpreter under check is older than the required minimum.
    #[error("Python {minimum} or newer is required, but the current runtime is {current}")]
    UnsupportedRuntime { current: String, minimum: String },
}

impl TrackError {
    pub fn invalid_selector(selector: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
        }
    }

    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersionFormat {
            version: version.into(),
        }
    }

    pub fn out_of_range(version: impl Into<String>) -> Self {
        Self::OutOfRange {
            version: version.into(),
        }
    }

    pub fn missing_release(version: impl Into<String>) -> Self {
        Self::MissingRelease {
            version: version.into(),
        }
    }

    pub fn page_structure(message: impl Into<String>) -> Self {
        Self::PageStructure {
            message: message.into(),
        }
    }
}

/// Result type for release tracking operations.
pub type Result<T> = std::result::Result<T, TrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_version_display_names_input_and_grammar() {
        let err = TrackError::invalid_version("3.x");
        let message = err.to_string();
        assert!(message.contains("\"3.x\""));
        assert!(message.contains("X.Y.Z or X.Y"));
    }

    #[test]
    fn test_unsupported_runtime_display() {
        let err = TrackError::UnsupportedRuntime {
            current: "3.7.0".to_string(),
            minimum: "3.9.0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Python 3.9.0 or newer is required, but the current runtime is 3.7.0"
        );
    }

    #[test]
    fn test_out_of_range_display() {
        let err = TrackError::out_of_range("1.2.3");
        assert!(err.to_string().contains("outside the known range"));
    }
}
