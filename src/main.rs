//! gqldocs CLI entry point.
//!
//! Parses arguments, wires up logging from the verbosity flags, executes the
//! selected command, and turns failures into user-friendly error output.

use anyhow::Result;
use clap::Parser;
use gqldocs::cli::Cli;
use gqldocs::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the flag-derived default when set.
    if let Some(filter) = cli.log_filter() {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
            )
            .with_target(false)
            .init();
    }

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
