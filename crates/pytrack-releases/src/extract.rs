//! Column extraction from the python.org downloads page.
//!
//! All knowledge of the page's markup lives here: the CSS classes of the
//! two release tables, the header-row offset, and the download-button text
//! that names the newest stable release. Nothing outside this module sees
//! a selector.

use crate::error::{Result, TrackError};
use crate::page::DocumentQuery;
use crate::types::ActiveReleaseRecord;
use pytrack_core::PageCache;
use std::sync::Arc;

/// Column selectors of the full release-history table.
const ALL_VERSION_COLUMNS: [&str; 2] = ["span.release-number", "span.release-date"];

/// Column selectors of the currently-maintained versions table.
const ACTIVE_COLUMNS: [&str; 5] = [
    "span.release-version",
    "span.release-status",
    "span.release-start",
    "span.release-end",
    "span.release-pep",
];

/// The newest stable release is named by the first download button.
const DOWNLOAD_BUTTONS: &str = "p.download-buttons";

/// Each column class also appears once in the table header row.
const HEADER_OFFSET: usize = 1;

/// Raw release data pulled from one downloads page.
pub struct PageExtractor {
    query: DocumentQuery,
    url: String,
}

impl PageExtractor {
    pub fn new(pages: Arc<PageCache>, url: impl Into<String>) -> Self {
        Self {
            query: DocumentQuery::new(pages),
            url: url.into(),
        }
    }

    /// The downloads page this extractor reads.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns `(version, release_date)` pairs from the release-history
    /// table, in page order (newest first).
    ///
    /// Version cells read like `"Python 3.12.1"`; only the final
    /// whitespace-separated token is kept. An empty cell stays empty and
    /// is left for version validation to reject downstream.
    pub async fn all_versions_raw(&self) -> Result<Vec<(String, String)>> {
        let columns = self
            .query
            .select_texts_many(&self.url, &ALL_VERSION_COLUMNS)
            .await?;
        let rows = row_count(&columns, "release history");
        Ok((0..rows)
            .map(|row| {
                let number = &columns[0][row + HEADER_OFFSET];
                let date = &columns[1][row + HEADER_OFFSET];
                (last_token(number), date.clone())
            })
            .collect())
    }

    /// Returns the rows of the maintained-versions table in page order.
    pub async fn active_versions_raw(&self) -> Result<Vec<ActiveReleaseRecord>> {
        let columns = self
            .query
            .select_texts_many(&self.url, &ACTIVE_COLUMNS)
            .await?;
        let rows = row_count(&columns, "active versions");
        Ok((0..rows)
            .map(|row| ActiveReleaseRecord {
                version: columns[0][row + HEADER_OFFSET].clone(),
                status: columns[1][row + HEADER_OFFSET].clone(),
                start: columns[2][row + HEADER_OFFSET].clone(),
                end: columns[3][row + HEADER_OFFSET].clone(),
                schedule_ref: columns[4][row + HEADER_OFFSET].clone(),
            })
            .collect())
    }

    /// Returns the version named by the first download button, e.g.
    /// `"3.12.1"` out of `"Download Python 3.12.1"`.
    pub async fn max_stable_version_raw(&self) -> Result<String> {
        let text = self
            .query
            .select_first_text(&self.url, DOWNLOAD_BUTTONS)
            .await?
            .ok_or_else(|| TrackError::page_structure("no download button on the page"))?;
        match text.split_whitespace().last() {
            Some(version) => Ok(version.to_string()),
            None => Err(TrackError::page_structure(
                "download button carries no version text",
            )),
        }
    }
}

/// Usable rows across `columns` once the header row is skipped.
///
/// The page occasionally ships ragged markup; rows are truncated to the
/// shortest column so later zipping never misaligns version and date.
fn row_count(columns: &[Arc<Vec<String>>], table: &str) -> usize {
    let lengths: Vec<usize> = columns
        .iter()
        .map(|column| column.len().saturating_sub(HEADER_OFFSET))
        .collect();
    let shortest = lengths.iter().copied().min().unwrap_or(0);
    if lengths.iter().any(|len| *len != shortest) {
        tracing::warn!(
            table,
            ?lengths,
            "ragged table columns; truncating to the shortest"
        );
    }
    shortest
}

fn last_token(text: &str) -> String {
    text.split_whitespace()
        .last()
        .unwrap_or_default()
        .to_string()
}
