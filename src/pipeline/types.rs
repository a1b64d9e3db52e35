//! Pipeline types and traits
//!
//! Defines the fetch collaborator seam and the sequencer lifecycle.

use crate::error::Result;
use crate::types::{Page, PageIndex};
use async_trait::async_trait;
use std::sync::Arc;

/// The injected fetch collaborator.
///
/// One call fetches one page: a decoded, ordered, possibly empty list of
/// records for the given 1-based index. A failure covers transport errors,
/// non-success statuses, and undecodable bodies; the pipeline surfaces it
/// immediately and never retries.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// The record type produced by one page
    type Item: Send + 'static;

    /// Fetch a single page by its 1-based index
    async fn fetch_page(&self, page: PageIndex) -> Result<Page<Self::Item>>;
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for Arc<F> {
    type Item = F::Item;

    async fn fetch_page(&self, page: PageIndex) -> Result<Page<Self::Item>> {
        (**self).fetch_page(page).await
    }
}

/// Sequencer lifecycle.
///
/// The counter in `Running` is owned exclusively by the sequencer's own
/// execution context; both non-`Running` states are terminal and yield no
/// further pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// Fetching pages
    Running {
        /// 1-based index of the next page to request
        next_page: PageIndex,
    },
    /// An empty page was fetched; pagination is complete
    Exhausted,
    /// A fetch failed; the error was surfaced, nothing further is yielded
    Failed,
}

impl SequencerState {
    /// Initial state: the next fetch targets page 1
    pub fn new() -> Self {
        Self::Running { next_page: 1 }
    }

    /// Check whether this state yields further pages
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running { .. })
    }
}

impl Default for SequencerState {
    fn default() -> Self {
        Self::new()
    }
}
