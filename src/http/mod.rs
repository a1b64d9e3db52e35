//! HTTP fetch collaborator
//!
//! A thin reqwest-based client that knows how to fetch exactly one page of
//! records per call. It performs no retries and no backoff: a failed request
//! surfaces immediately and halts the pipeline upstream of it.

mod client;

pub use client::{BeerApiClient, BeerApiConfig, BeerApiConfigBuilder};
