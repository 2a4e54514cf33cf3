//! High-level queries over the python.org release listing.

use crate::error::{Result, TrackError};
use crate::extract::PageExtractor;
use crate::types::{ActiveReleaseRecord, ReleaseRecord};
use crate::version::{VersionTuple, parse_runtime_version};
use pytrack_core::PageCache;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

/// Downloads listing scraped by default.
pub const DOWNLOADS_URL: &str = "https://www.python.org/downloads";

/// Tracker settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Page the release tables are scraped from.
    #[serde(default = "default_releases_url")]
    pub releases_url: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            releases_url: default_releases_url(),
        }
    }
}

fn default_releases_url() -> String {
    DOWNLOADS_URL.to_string()
}

/// Release queries backed by one shared [`PageCache`].
///
/// Every method reads through the cache, so the downloads page is fetched
/// at most once per cache lifetime no matter how many queries run.
pub struct ReleaseTracker {
    extractor: PageExtractor,
}

impl ReleaseTracker {
    /// Tracker against the live python.org downloads page.
    pub fn new(pages: Arc<PageCache>) -> Self {
        Self::with_config(pages, TrackerConfig::default())
    }

    pub fn with_config(pages: Arc<PageCache>, config: TrackerConfig) -> Self {
        Self {
            extractor: PageExtractor::new(pages, config.releases_url),
        }
    }

    /// URL the tracker reads.
    pub fn releases_url(&self) -> &str {
        self.extractor.url()
    }

    /// Every release in the history table, newest first, each flagged
    /// deprecated when it sorts below the oldest maintained series.
    pub async fn all_versions(&self) -> Result<Vec<ReleaseRecord>> {
        let rows = self.extractor.all_versions_raw().await?;
        let cutoff = self.oldest_active_tuple().await?;
        let mut records = Vec::with_capacity(rows.len());
        for (version, date) in rows {
            let tuple = VersionTuple::from_str(&version)?.canonical();
            records.push(ReleaseRecord {
                version,
                release_date: none_if_empty(date),
                deprecated: Some(tuple < cutoff),
            });
        }
        Ok(records)
    }

    /// Rows of the maintained-versions table, in page order.
    pub async fn active_versions(&self) -> Result<Vec<ActiveReleaseRecord>> {
        self.extractor.active_versions_raw().await
    }

    /// The release named by the page's main download button, joined with
    /// its row in the history table.
    pub async fn max_stable_version(&self) -> Result<ReleaseRecord> {
        let version = self.extractor.max_stable_version_raw().await?;
        let records = self.all_versions().await?;
        records
            .into_iter()
            .find(|record| record.version == version)
            .ok_or(TrackError::MissingRelease { version })
    }

    /// The oldest series still in the maintained-versions table.
    pub async fn min_stable_version(&self) -> Result<ActiveReleaseRecord> {
        let rows = self.extractor.active_versions_raw().await?;
        let mut oldest: Option<(VersionTuple, ActiveReleaseRecord)> = None;
        for row in rows {
            let tuple = row.version_tuple()?.canonical();
            match &oldest {
                Some((best, _)) if *best <= tuple => {}
                _ => oldest = Some((tuple, row)),
            }
        }
        oldest
            .map(|(_, row)| row)
            .ok_or_else(|| TrackError::page_structure("active versions table is empty"))
    }

    /// History rows strictly below the oldest maintained series, in page
    /// order.
    ///
    /// The deprecation flag is left unset: membership in this list already
    /// says it.
    pub async fn unsupported_versions(&self) -> Result<Vec<ReleaseRecord>> {
        let rows = self.extractor.all_versions_raw().await?;
        let cutoff = self.oldest_active_tuple().await?;
        let mut records = Vec::new();
        for (version, date) in rows {
            let tuple = VersionTuple::from_str(&version)?.canonical();
            if tuple < cutoff {
                records.push(ReleaseRecord {
                    version,
                    release_date: none_if_empty(date),
                    deprecated: None,
                });
            }
        }
        Ok(records)
    }

    /// History records at or below `version`, or at or above it when
    /// `above` is set. A `None` target means the oldest maintained series.
    pub async fn version_range(
        &self,
        version: Option<&str>,
        above: bool,
    ) -> Result<Vec<ReleaseRecord>> {
        let target = match version {
            Some(v) => VersionTuple::from_str(v)?.canonical(),
            None => self.oldest_active_tuple().await?,
        };
        let records = self.all_versions().await?;
        let mut kept = Vec::new();
        for record in records {
            let tuple = record.version_tuple()?.canonical();
            let keep = if above { tuple >= target } else { tuple <= target };
            if keep {
                kept.push(record);
            }
        }
        Ok(kept)
    }

    /// Whether `version` appears in the release history.
    ///
    /// Comparison is by canonical tuple, so `"3.9"` matches a listed
    /// `"3.9.0"` and vice versa. Malformed input is an error, not `false`.
    pub async fn is_known_version(&self, version: &str) -> Result<bool> {
        let needle = VersionTuple::from_str(version)?.canonical();
        let rows = self.extractor.all_versions_raw().await?;
        for (listed, _) in rows {
            if VersionTuple::from_str(&listed)?.canonical() == needle {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether `version` predates the oldest maintained series.
    ///
    /// Unlike [`is_known_version`](Self::is_known_version), an unknown
    /// version is [`TrackError::OutOfRange`] here: asking about a release
    /// that never happened has no meaningful answer.
    pub async fn is_deprecated(&self, version: &str) -> Result<bool> {
        let needle = VersionTuple::from_str(version)?.canonical();
        if !self.is_known_version(version).await? {
            return Err(TrackError::out_of_range(version));
        }
        let cutoff = self.oldest_active_tuple().await?;
        Ok(needle < cutoff)
    }

    /// Checks an interpreter version (a plain `X.Y.Z` or a full
    /// `sys.version`-style banner) against a minimum.
    ///
    /// A `None` minimum means the oldest maintained series. Returns
    /// `Ok(true)` when the runtime is new enough and
    /// [`TrackError::UnsupportedRuntime`] when it is not.
    pub async fn version_checker(
        &self,
        current_version: &str,
        minimum_version: Option<&str>,
    ) -> Result<bool> {
        let current = parse_runtime_version(current_version)?.canonical();
        let minimum = match minimum_version {
            Some(v) => VersionTuple::from_str(v)?.canonical(),
            None => self.oldest_active_tuple().await?,
        };
        if current < minimum {
            return Err(TrackError::UnsupportedRuntime {
                current: current.to_string(),
                minimum: minimum.to_string(),
            });
        }
        Ok(true)
    }

    /// Deprecation cutoff: everything strictly below this is unsupported.
    async fn oldest_active_tuple(&self) -> Result<VersionTuple> {
        let oldest = self.min_stable_version().await?;
        Ok(oldest.version_tuple()?.canonical())
    }
}

fn none_if_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}
