//! Record types produced by the release tracker.

use crate::error::Result;
use crate::version::VersionTuple;
use serde::{Deserialize, Serialize};

/// One release from the full history table on the downloads page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Release version, e.g. `"3.12.1"`. Old entries may be the bare
    /// `X.Y` series spelling.
    pub version: String,
    /// Publication date as printed on the page, e.g. `"Dec. 7, 2023"`.
    pub release_date: Option<String>,
    /// Whether the release predates the oldest still-maintained series.
    /// `None` when the producing query does not compute it.
    pub deprecated: Option<bool>,
}

/// One row of the currently-maintained versions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveReleaseRecord {
    /// Maintained series, e.g. `"3.12"`.
    pub version: String,
    /// Maintenance phase as printed, e.g. `"bugfix"` or `"security"`.
    pub status: String,
    /// First-release date of the series.
    pub start: String,
    /// Scheduled end of support.
    pub end: String,
    /// Release schedule reference, e.g. `"PEP 693"`.
    pub schedule_ref: String,
}

impl ReleaseRecord {
    /// Parsed form of [`version`](Self::version).
    pub fn version_tuple(&self) -> Result<VersionTuple> {
        self.version.parse()
    }
}

impl ActiveReleaseRecord {
    /// Parsed form of [`version`](Self::version).
    pub fn version_tuple(&self) -> Result<VersionTuple> {
        self.version.parse()
    }
}
