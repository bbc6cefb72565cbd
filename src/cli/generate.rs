//! `gqldocs generate` — render the documentation site.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use super::{fetch_with_spinner, pick_dir, resolve_endpoint};
use crate::config::Config;
use crate::introspection::load_schema_file;
use crate::render::{SiteLayout, generate_site};
use crate::schema::parse_schema;

/// Arguments for `gqldocs generate`.
#[derive(Args)]
pub struct GenerateCommand {
    /// GraphQL endpoint to introspect (overrides the config file).
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Render from a saved introspection JSON instead of an endpoint.
    #[arg(long, value_name = "PATH", conflicts_with = "endpoint")]
    schema_file: Option<PathBuf>,

    /// Output directory for generated pages.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory of partials, registered under their file stem.
    #[arg(long)]
    partials: Option<PathBuf>,

    /// Directory of page templates.
    #[arg(long)]
    templates: Option<PathBuf>,

    /// File name of the template rendered once per schema type.
    #[arg(short = 't', long)]
    type_template: Option<String>,
}

impl GenerateCommand {
    /// Run the full pipeline: obtain schema, split directives, render site.
    pub async fn execute(self, config: &Config, no_progress: bool) -> Result<()> {
        let layout = SiteLayout {
            templates_dir: pick_dir(
                self.templates,
                config.templates.dir.as_deref(),
                "./templates",
            ),
            partials_dir: pick_dir(
                self.partials,
                config.templates.partials_dir.as_deref(),
                "./partials",
            ),
            output_dir: pick_dir(self.output, config.output.dir.as_deref(), "./docs"),
            type_template: self
                .type_template
                .or_else(|| config.templates.type_template.clone())
                .unwrap_or_else(|| "Type.html".to_string()),
        };

        let schema = match &self.schema_file {
            Some(path) => {
                info!("loading schema from {}", path.display());
                load_schema_file(path)?
            }
            None => {
                let endpoint = resolve_endpoint(self.endpoint.clone(), config)?;
                info!("introspecting {endpoint}");
                fetch_with_spinner(&endpoint, config, no_progress).await?
            }
        };

        let data = parse_schema(schema)?;
        let written = generate_site(&layout, &data)?;

        println!(
            "{} Generated {} pages into {}",
            "✓".green(),
            written.len(),
            layout.output_dir.display()
        );
        Ok(())
    }
}
