//! The finite set of statistics endpoints.

use crate::error::{Result, StatsError};
use std::fmt;
use std::str::FromStr;

/// A pypistats.org endpoint under `/api/packages/{package}/`.
///
/// Dispatch is closed over this enum; anything else is
/// [`StatsError::UnsupportedMethod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsMethod {
    /// Downloads over the last day/week/month.
    Recent,
    /// Daily download totals since tracking began.
    Overall,
    /// Downloads broken down by Python major version.
    PythonMajor,
    /// Downloads broken down by Python minor version.
    PythonMinor,
    /// Downloads broken down by operating system.
    System,
}

impl StatsMethod {
    /// API path segment for this endpoint.
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Overall => "overall",
            Self::PythonMajor => "python_major",
            Self::PythonMinor => "python_minor",
            Self::System => "system",
        }
    }
}

impl FromStr for StatsMethod {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "recent" => Ok(Self::Recent),
            "overall" => Ok(Self::Overall),
            "python_major" => Ok(Self::PythonMajor),
            "python_minor" => Ok(Self::PythonMinor),
            "system" => Ok(Self::System),
            other => Err(StatsError::unsupported_method(other)),
        }
    }
}

impl fmt::Display for StatsMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Window selector for [`StatsMethod::Recent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecentPeriod {
    Day,
    Week,
    Month,
}

impl RecentPeriod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_round_trips_through_endpoint() {
        for method in [
            StatsMethod::Recent,
            StatsMethod::Overall,
            StatsMethod::PythonMajor,
            StatsMethod::PythonMinor,
            StatsMethod::System,
        ] {
            assert_eq!(method.endpoint().parse::<StatsMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_unknown_method_is_unsupported() {
        let err = "downloads_by_country".parse::<StatsMethod>().unwrap_err();
        assert!(matches!(err, StatsError::UnsupportedMethod { .. }));
    }

    #[test]
    fn test_display_matches_endpoint() {
        assert_eq!(StatsMethod::PythonMinor.to_string(), "python_minor");
    }
}
