//! CSS-selector text extraction over cached page bodies.

use crate::error::{Result, TrackError};
use dashmap::DashMap;
use pytrack_core::PageCache;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;

/// Text extraction from fetched pages, memoized per `(url, selector)`.
///
/// Page bodies come from the injected [`PageCache`], so repeat queries
/// re-fetch nothing. The parsed tree is not `Send` and cannot be cached
/// across calls; instead the extracted text lists are, so repeat queries
/// for the same selector re-parse nothing either.
pub struct DocumentQuery {
    pages: Arc<PageCache>,
    selections: DashMap<(String, String), Arc<Vec<String>>>,
}

impl DocumentQuery {
    pub fn new(pages: Arc<PageCache>) -> Self {
        Self {
            pages,
            selections: DashMap::new(),
        }
    }

    /// Extracts the text of every element matching `selector`, in document
    /// order. Element text is the concatenation of its text nodes with
    /// surrounding whitespace trimmed.
    pub async fn select_texts(&self, url: &str, selector: &str) -> Result<Arc<Vec<String>>> {
        let texts = self
            .select_texts_many(url, &[selector])
            .await?
            .pop()
            .unwrap_or_default();
        Ok(texts)
    }

    /// Extracts the text of the first element matching `selector`, if any.
    pub async fn select_first_text(&self, url: &str, selector: &str) -> Result<Option<String>> {
        let texts = self.select_texts(url, selector).await?;
        Ok(texts.first().cloned())
    }

    /// Batch form of [`select_texts`](Self::select_texts): the page is
    /// fetched and parsed at most once for all selectors missing from the
    /// memo. Results come back in `selectors` order.
    pub async fn select_texts_many(
        &self,
        url: &str,
        selectors: &[&str],
    ) -> Result<Vec<Arc<Vec<String>>>> {
        let mut slots: Vec<Option<Arc<Vec<String>>>> = selectors
            .iter()
            .map(|selector| {
                self.selections
                    .get(&(url.to_string(), (*selector).to_string()))
                    .map(|entry| Arc::clone(entry.value()))
            })
            .collect();

        // Validate selectors before touching the network.
        let mut missing = Vec::new();
        for (index, slot) in slots.iter().enumerate() {
            if slot.is_none() {
                let parsed = Selector::parse(selectors[index])
                    .map_err(|_| TrackError::invalid_selector(selectors[index]))?;
                missing.push((index, parsed));
            }
        }

        if !missing.is_empty() {
            let body = self.pages.get_text(url).await?;
            // The parsed tree is not `Send`; it must stay inside this block
            // and never be held across an await point.
            let document = Html::parse_document(&body);
            for (index, selector) in &missing {
                let texts: Arc<Vec<String>> =
                    Arc::new(document.select(selector).map(element_text).collect());
                self.selections.insert(
                    (url.to_string(), selectors[*index].to_string()),
                    Arc::clone(&texts),
                );
                slots[*index] = Some(texts);
            }
            tracing::debug!(url, selectors = missing.len(), "extracted page selections");
        }

        Ok(slots.into_iter().flatten().collect())
    }

    /// Drops all memoized selections. Cached page bodies are unaffected.
    pub fn clear(&self) {
        self.selections.clear();
    }

    /// Number of memoized `(url, selector)` extractions.
    pub fn cached_selections(&self) -> usize {
        self.selections.len()
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
