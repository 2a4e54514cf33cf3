//! Version parsing and ordering for Python release strings.
//!
//! Release listings mix two spellings: full `X.Y.Z` patch releases in the
//! history table and bare `X.Y` series in the active-versions table.
//! [`VersionTuple`] keeps the distinction (a missing patch component sorts
//! before an explicit `.0`), and [`VersionTuple::canonical`] folds the two
//! spellings together for membership and range checks.

use crate::error::{Result, TrackError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Parsed `X.Y` or `X.Y.Z` version.
///
/// Ordering is component-wise. A missing patch component orders before an
/// explicit zero, so `3.9` < `3.9.0` < `3.9.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTuple {
    pub major: u64,
    pub minor: u64,
    pub patch: Option<u64>,
}

impl VersionTuple {
    pub const fn new(major: u64, minor: u64, patch: Option<u64>) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Returns the three-component form, defaulting a missing patch to zero.
    pub fn canonical(self) -> Self {
        Self {
            patch: Some(self.patch.unwrap_or(0)),
            ..self
        }
    }
}

impl FromStr for VersionTuple {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self> {
        static VERSION_REGEX: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?$").unwrap());

        let caps = VERSION_REGEX
            .captures(s)
            .ok_or_else(|| TrackError::invalid_version(s))?;

        Ok(Self {
            major: parse_component(&caps[1], s)?,
            minor: parse_component(&caps[2], s)?,
            patch: caps
                .get(3)
                .map(|m| parse_component(m.as_str(), s))
                .transpose()?,
        })
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

/// Validates `version` against the `X.Y[.Z]` grammar and returns the
/// three-component spelling.
///
/// `X.Y.Z` input passes through unchanged; `X.Y` gains a zero patch
/// (`"3.9"` becomes `"3.9.0"`). Anything else is
/// [`TrackError::InvalidVersionFormat`].
pub fn normalize_version(version: &str) -> Result<String> {
    let tuple = VersionTuple::from_str(version)?;
    if tuple.patch.is_some() {
        Ok(version.to_string())
    } else {
        Ok(format!("{version}.0"))
    }
}

/// Parses a version out of an interpreter banner such as
/// `"3.11.4 (main, Jun  7 2023, 00:00:00) [GCC 12.2.0]"`.
///
/// Only the leading numeric components count; pre-release and local
/// suffixes (`3.13.0a4`, `3.11.4+`) are ignored past the last full
/// component.
pub fn parse_runtime_version(banner: &str) -> Result<VersionTuple> {
    static RUNTIME_REGEX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?").unwrap());

    let token = banner.split_whitespace().next().unwrap_or("");
    let caps = RUNTIME_REGEX
        .captures(token)
        .ok_or_else(|| TrackError::invalid_version(banner))?;

    Ok(VersionTuple {
        major: parse_component(&caps[1], banner)?,
        minor: parse_component(&caps[2], banner)?,
        patch: caps
            .get(3)
            .map(|m| parse_component(m.as_str(), banner))
            .transpose()?,
    })
}

/// Compares two version strings by their parsed tuples.
///
/// Falls back to plain string ordering when either side does not parse, so
/// sorting mixed input never panics.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (VersionTuple::from_str(a), VersionTuple::from_str(b)) {
        (Ok(left), Ok(right)) => left.cmp(&right),
        _ => a.cmp(b),
    }
}

fn parse_component(digits: &str, input: &str) -> Result<u64> {
    digits
        .parse()
        .map_err(|_| TrackError::invalid_version(input))
}
