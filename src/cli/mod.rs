//! Command-line interface for gqldocs.
//!
//! Each command lives in its own module with its own argument struct and
//! execution logic:
//! - `generate` — fetch (or load) a schema and render the documentation site
//! - `fetch` — save the introspection payload to a file for offline runs
//!
//! # Global Options
//!
//! All commands support:
//! - `--verbose` / `--quiet` — log verbosity (mutually exclusive)
//! - `--no-progress` — disable spinners for scripts and CI
//! - `--config` — explicit path to a `gqldocs.toml`
//!
//! # Usage
//!
//! ```bash
//! # Generate straight from a live endpoint
//! gqldocs generate --endpoint https://api.example.com/graphql
//!
//! # Save the schema once, generate offline afterwards
//! gqldocs fetch --endpoint https://api.example.com/graphql --output schema.json
//! gqldocs generate --schema-file schema.json --output ./docs
//! ```

mod fetch;
mod generate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::core::GqldocsError;
use crate::introspection::{IntrospectionSchema, SchemaClient};

/// Root CLI structure.
///
/// Global options are available to every subcommand; the subcommands
/// themselves are defined in [`Commands`].
#[derive(Parser)]
#[command(
    name = "gqldocs",
    about = "Generate HTML documentation for a GraphQL API from schema introspection",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable progress spinners (useful in scripts and CI).
    #[arg(long, global = true)]
    no_progress: bool,

    /// Path to a gqldocs.toml config file (default: ./gqldocs.toml if present).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Render the documentation site from a schema.
    Generate(generate::GenerateCommand),

    /// Fetch the introspection payload and save it to a file.
    Fetch(fetch::FetchCommand),
}

impl Cli {
    /// The tracing filter implied by the verbosity flags; `None` means
    /// logging stays off entirely.
    #[must_use]
    pub fn log_filter(&self) -> Option<&'static str> {
        if self.quiet {
            None
        } else if self.verbose {
            Some("gqldocs=debug")
        } else {
            Some("gqldocs=info")
        }
    }

    /// Execute the selected command.
    ///
    /// # Errors
    ///
    /// Propagates command failures; `main` converts them to user-friendly
    /// output.
    pub async fn execute(self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        match self.command {
            Commands::Generate(cmd) => cmd.execute(&config, self.no_progress).await,
            Commands::Fetch(cmd) => cmd.execute(&config, self.no_progress).await,
        }
    }
}

/// Resolve the endpoint URL: flag wins over config file.
fn resolve_endpoint(flag: Option<String>, config: &Config) -> Result<String, GqldocsError> {
    flag.or_else(|| config.endpoint.url.clone())
        .ok_or(GqldocsError::EndpointNotConfigured)
}

/// Fetch the schema with a spinner while the request is in flight.
async fn fetch_with_spinner(
    endpoint: &str,
    config: &Config,
    no_progress: bool,
) -> Result<IntrospectionSchema, GqldocsError> {
    let client = SchemaClient::new(&config.endpoint.headers)?;

    let spinner = if no_progress {
        None
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(format!("fetching schema from {endpoint}"));
        bar.enable_steady_tick(Duration::from_millis(100));
        Some(bar)
    };

    let result = client.fetch(endpoint).await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    result
}

/// Directory flags shouldn't end with a separator; later joins would still
/// work, but logged paths get ugly (`./templates//Type.html`).
fn strip_trailing_slash(path: PathBuf) -> PathBuf {
    match path.to_str() {
        Some(s) if s.len() > 1 && (s.ends_with('/') || s.ends_with('\\')) => {
            PathBuf::from(s.trim_end_matches(['/', '\\']))
        }
        _ => path,
    }
}

/// First existing value wins: CLI flag, then config file, then default.
fn pick_dir(flag: Option<PathBuf>, config_value: Option<&Path>, default: &str) -> PathBuf {
    strip_trailing_slash(
        flag.or_else(|| config_value.map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from(default)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_filter_levels() {
        let quiet = Cli::parse_from(["gqldocs", "--quiet", "generate"]);
        assert!(quiet.log_filter().is_none());

        let verbose = Cli::parse_from(["gqldocs", "--verbose", "generate"]);
        assert_eq!(verbose.log_filter(), Some("gqldocs=debug"));

        let default = Cli::parse_from(["gqldocs", "generate"]);
        assert_eq!(default.log_filter(), Some("gqldocs=info"));
    }

    #[test]
    fn test_strip_trailing_slash() {
        assert_eq!(
            strip_trailing_slash(PathBuf::from("./partials/")),
            PathBuf::from("./partials")
        );
        assert_eq!(
            strip_trailing_slash(PathBuf::from("./partials")),
            PathBuf::from("./partials")
        );
        assert_eq!(strip_trailing_slash(PathBuf::from("/")), PathBuf::from("/"));
    }

    #[test]
    fn test_resolve_endpoint_prefers_flag() {
        let mut config = Config::default();
        config.endpoint.url = Some("https://from-config".to_string());

        let from_flag =
            resolve_endpoint(Some("https://from-flag".to_string()), &config).unwrap();
        assert_eq!(from_flag, "https://from-flag");

        let from_config = resolve_endpoint(None, &config).unwrap();
        assert_eq!(from_config, "https://from-config");

        let err = resolve_endpoint(None, &Config::default()).unwrap_err();
        assert!(matches!(err, GqldocsError::EndpointNotConfigured));
    }
}
