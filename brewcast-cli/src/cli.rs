use anyhow::Context;
use brewcast_core::{Config, Pipeline, Renderer, sources_from_config};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};

use crate::prompt::InquirePrompter;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "brewcast",
    version,
    about = "Find breweries and the forecast for a US city, rendered as an HTML page"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively pick a state and city and build the results page (default).
    Search,

    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Search) {
            Command::Search => search().await,
            Command::Configure => configure(),
        }
    }
}

async fn search() -> anyhow::Result<()> {
    let config = Config::load()?;
    let sources = sources_from_config(&config)?;
    let renderer = Renderer::from_config(&config)?;

    let report = Pipeline::new(sources, renderer).run(&InquirePrompter).await?;

    println!(
        "{} breweries and {} forecast days for {}, {}.",
        report.breweries, report.forecast_days, report.city, report.state
    );
    match report.page {
        Some(path) => println!("Results page: {}", path.display()),
        None => println!("The results page could not be written, see the log above."),
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    // file values only, so an env override is never persisted
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    let path = config.save()?;
    println!("Saved API key to {}", path.display());

    Ok(())
}
