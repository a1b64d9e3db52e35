//! Paginated-fetch streaming pipeline
//!
//! Sequencer → Flattener → Filter, pulled one record at a time.
//!
//! # Overview
//!
//! The pipeline turns a paged listing endpoint into a single lazy stream of
//! records:
//!
//! 1. [`pages`] is the sequencer. Owns the 1-based page counter, issues one
//!    fetch per pull through a [`PageFetcher`], and yields every fetched page
//!    including the terminal empty one.
//! 2. [`flatten_pages`] drains each page in order, one record at a time,
//!    and translates the terminal empty page into end-of-stream. Never holds
//!    more than one page of records.
//! 3. [`filter_records`] applies a fixed predicate per record, preserving
//!    order, with no extra buffering.
//!
//! [`filtered_records`] composes all three; [`json_array_chunks`] adapts the
//! result into JSON-array byte chunks for an HTTP response body.
//!
//! Everything is demand driven: if the consumer stops pulling (or is
//! dropped), no further page fetch is issued.

mod stages;
mod types;

pub use stages::{filter_records, filtered_records, flatten_pages, json_array_chunks, pages};
pub use types::{PageFetcher, SequencerState};

#[cfg(test)]
mod tests;
