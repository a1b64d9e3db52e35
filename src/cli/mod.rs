//! CLI module
//!
//! Command-line interface for the streaming client.
//!
//! # Commands
//!
//! - `fetch` - Drive the pipeline to completion and print the filtered records
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{router, serve, ServerConfig};
