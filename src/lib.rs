//! # brewstream
//!
//! A streaming client for paginated beer catalog APIs.
//!
//! The core is a pull-based pipeline over a paged listing endpoint: fetch
//! pages 1, 2, 3, … until an empty page, flatten them into one ordered record
//! stream, and filter it by a predicate, all lazily, one record at a time,
//! so a consumer that stops pulling stops the page fetches too.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use brewstream::http::BeerApiClient;
//! use brewstream::pipeline;
//! use brewstream::types::Beer;
//! use futures::TryStreamExt;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> brewstream::Result<()> {
//!     let client = Arc::new(BeerApiClient::new());
//!     let strong: Vec<Beer> =
//!         pipeline::filtered_records(client, |b: &Beer| b.abv > 15.0)
//!             .try_collect()
//!             .await?;
//!     println!("{}", serde_json::to_string(&strong)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐    ┌───────────┐    ┌──────────┐    ┌──────────────┐
//! │ Sequencer  │───▶│ Flattener │───▶│  Filter  │───▶│   consumer   │
//! │ page 1,2,… │    │ page→rec  │    │ abv>15.0 │    │ CLI / HTTP   │
//! └────────────┘    └───────────┘    └──────────┘    └──────────────┘
//!       ▲ one fetch per pull, demand propagates right to left
//! ```

#![warn(clippy::all)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Paginated-fetch streaming pipeline
pub mod pipeline;

/// HTTP fetch collaborator
pub mod http;

/// Configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{Beer, Page, PageIndex};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
