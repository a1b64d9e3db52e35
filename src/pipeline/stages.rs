//! Pipeline stage implementations
//!
//! Each stage is a pure transformation over a stream, feeding the next.

use super::types::{PageFetcher, SequencerState};
use crate::error::{Error, Result};
use crate::types::Page;
use bytes::Bytes;
use futures::{future, stream, Stream, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::debug;

// ============================================================================
// Page Sequencer
// ============================================================================

/// Produce the stream of pages for a fetcher.
///
/// Each pull fetches exactly one page, strictly sequentially: the request for
/// index *n+1* is only issued once the fetch for *n* has completed and its
/// page has been consumed downstream. The terminal empty page is yielded
/// as a value; suppressing it is the flattener's job. After an empty page or
/// a fetch error the stream ends and no further request is made.
pub fn pages<F>(fetcher: F) -> impl Stream<Item = Result<Page<F::Item>>>
where
    F: PageFetcher,
{
    stream::unfold(
        (fetcher, SequencerState::new()),
        |(fetcher, state)| async move {
            let SequencerState::Running { next_page } = state else {
                return None;
            };

            match fetcher.fetch_page(next_page).await {
                Ok(page) => {
                    debug!(page = next_page, records = page.len(), "fetched page");
                    let next = if page.is_empty() {
                        SequencerState::Exhausted
                    } else {
                        SequencerState::Running {
                            next_page: next_page + 1,
                        }
                    };
                    Some((Ok(page), (fetcher, next)))
                }
                Err(e) => {
                    debug!(page = next_page, error = %e, "page fetch failed");
                    Some((Err(e), (fetcher, SequencerState::Failed)))
                }
            }
        },
    )
}

// ============================================================================
// Flattener
// ============================================================================

/// Flatten a stream of pages into a stream of records.
///
/// Records are yielded one at a time in page order, preserving within-page
/// order. The first empty page signals end-of-stream and is not yielded as a
/// value. At most one page of records is held in flight; upstream errors pass
/// through unchanged.
pub fn flatten_pages<S, T>(pages: S) -> impl Stream<Item = Result<T>>
where
    S: Stream<Item = Result<Page<T>>>,
    T: Send,
{
    pages
        .try_take_while(|page| future::ready(Ok(!page.is_empty())))
        .map_ok(|page| stream::iter(page.into_iter().map(Ok::<T, Error>)))
        .try_flatten()
}

// ============================================================================
// Predicate Filter
// ============================================================================

/// Keep only the records satisfying `predicate`.
///
/// Decides pass/drop per record as it arrives; relative order is preserved
/// and errors/termination propagate unchanged.
pub fn filter_records<S, T, P>(records: S, predicate: P) -> impl Stream<Item = Result<T>>
where
    S: Stream<Item = Result<T>>,
    P: Fn(&T) -> bool,
{
    records.try_filter(move |record| future::ready(predicate(record)))
}

// ============================================================================
// Composition
// ============================================================================

/// The full pipeline: sequencer → flattener → filter.
///
/// Lazy end to end: dropping the returned stream stops all further page
/// fetches.
pub fn filtered_records<F, P>(fetcher: F, predicate: P) -> impl Stream<Item = Result<F::Item>>
where
    F: PageFetcher,
    P: Fn(&F::Item) -> bool,
{
    filter_records(flatten_pages(pages(fetcher)), predicate)
}

// ============================================================================
// Stream-consumer adapter
// ============================================================================

/// Adapt a record stream into JSON-array byte chunks.
///
/// Emits `[`, then one comma-separated JSON object per record, then `]`; an
/// empty stream produces `[]`. A failed item is yielded as the error itself,
/// which aborts an HTTP body built from this stream before the closing
/// bracket is reached.
pub fn json_array_chunks<S, T>(records: S) -> impl Stream<Item = Result<Bytes>>
where
    S: Stream<Item = Result<T>>,
    T: Serialize,
{
    let body = records.enumerate().map(|(i, item)| -> Result<Bytes> {
        let json = serde_json::to_vec(&item?)?;
        let mut chunk = Vec::with_capacity(json.len() + 1);
        if i > 0 {
            chunk.push(b',');
        }
        chunk.extend_from_slice(&json);
        Ok(Bytes::from(chunk))
    });

    stream::once(future::ready(Ok(Bytes::from_static(b"["))))
        .chain(body)
        .chain(stream::once(future::ready(Ok(Bytes::from_static(b"]")))))
}
