//! Command dispatch
//!
//! Loads configuration, builds the fetch client, and runs the selected
//! subcommand.

use super::commands::{Cli, Commands};
use super::server::{self, ServerConfig};
use crate::config::AppConfig;
use crate::error::Result;
use crate::http::BeerApiClient;
use crate::pipeline;
use crate::types::Beer;
use futures::TryStreamExt;
use std::sync::Arc;
use tracing::info;

/// Runs CLI commands
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    pub async fn run(&self) -> Result<()> {
        let config = match &self.cli.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        match &self.cli.command {
            Commands::Fetch { min_abv, pretty } => {
                self.fetch(&config, *min_abv, *pretty).await
            }
            Commands::Serve { port } => {
                let server_config = ServerConfig {
                    client_config: config.client_config(),
                    min_abv: config.filter.min_abv,
                };
                server::serve(server_config, port.unwrap_or(config.server.port)).await
            }
        }
    }

    /// Drive the pipeline to completion and print the result
    async fn fetch(&self, config: &AppConfig, min_abv: Option<f64>, pretty: bool) -> Result<()> {
        let min_abv = min_abv.unwrap_or(config.filter.min_abv);
        let client = Arc::new(BeerApiClient::with_config(config.client_config()));

        info!(min_abv, "fetching filtered records");

        let records: Vec<Beer> =
            pipeline::filtered_records(client, move |beer: &Beer| beer.abv > min_abv)
                .try_collect()
                .await?;

        info!(records = records.len(), "fetch complete");

        let output = if pretty {
            serde_json::to_string_pretty(&records)?
        } else {
            serde_json::to_string(&records)?
        };
        println!("{output}");

        Ok(())
    }
}
