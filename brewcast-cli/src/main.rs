//! Binary crate for the `brewcast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive prompts
//! - Logging setup and top-level error reporting

use brewcast_core::BrewcastError;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod prompt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cmd = cli::Cli::parse();
    if let Err(err) = cmd.run().await {
        // lookup errors already carry their upstream message
        match err.downcast_ref::<BrewcastError>() {
            Some(e) => eprintln!("{e}"),
            None => eprintln!("{err:#}"),
        }
    }
}
