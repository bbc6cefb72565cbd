//! `gqldocs fetch` — save the introspection payload for offline generation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::{fetch_with_spinner, resolve_endpoint};
use crate::config::Config;

/// Arguments for `gqldocs fetch`.
#[derive(Args)]
pub struct FetchCommand {
    /// GraphQL endpoint to introspect (overrides the config file).
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Where to write the introspection JSON.
    #[arg(short, long, default_value = "schema.json")]
    output: PathBuf,
}

impl FetchCommand {
    /// Fetch the schema and write it as a `{"data": {"__schema": ...}}`
    /// envelope, the shape `generate --schema-file` reads back.
    pub async fn execute(self, config: &Config, no_progress: bool) -> Result<()> {
        let endpoint = resolve_endpoint(self.endpoint.clone(), config)?;
        let schema = fetch_with_spinner(&endpoint, config, no_progress).await?;

        let envelope = serde_json::json!({ "data": { "__schema": schema } });
        std::fs::write(&self.output, serde_json::to_string_pretty(&envelope)?)?;

        println!(
            "{} Saved schema from {} to {}",
            "✓".green(),
            endpoint,
            self.output.display()
        );
        Ok(())
    }
}
