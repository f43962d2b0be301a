//! One interactive lookup: state → cities → city → breweries + forecast → page.

use std::path::PathBuf;

use tracing::info;

use crate::{
    error::BrewcastError,
    provider::Sources,
    render::Renderer,
    states::{lookup_state, state_names},
};

/// Asks the user to pick one of `options`.
///
/// Implementations should rank options with [`crate::fuzzy`] as the user types
/// and must only return a value taken from `options`.
pub trait Prompter {
    fn choose(&self, message: &str, options: Vec<String>) -> Result<String, BrewcastError>;
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub state: String,
    pub city: String,
    pub breweries: usize,
    pub forecast_days: usize,
    /// `None` if the page could not be written.
    pub page: Option<PathBuf>,
}

#[derive(Debug)]
pub struct Pipeline {
    sources: Sources,
    renderer: Renderer,
}

impl Pipeline {
    pub fn new(sources: Sources, renderer: Renderer) -> Self {
        Self { sources, renderer }
    }

    pub async fn run(&self, prompter: &dyn Prompter) -> Result<Report, BrewcastError> {
        let picked = prompter.choose("Select a state:", state_names())?;
        let state = lookup_state(&picked)?;

        let cities = self.sources.geography.resolve_cities(state.code).await?;
        if cities.is_empty() {
            return Err(BrewcastError::DataFormat(format!("no cities returned for {}", state.name)));
        }

        let picked = prompter.choose("Select a city:", cities.keys().cloned().collect())?;
        let city = cities
            .get(&picked)
            .ok_or_else(|| BrewcastError::input(format!("'{picked}' is not a city in {}", state.name)))?;

        info!(
            "Selected {}, {} ({:.4}, {:.4}, {})",
            city.name, state.code, city.latitude, city.longitude, city.county
        );

        let (breweries, forecast) = tokio::try_join!(
            self.sources.breweries.fetch_breweries(state.name, &city.name),
            self.sources.forecast.fetch_forecast(city.latitude, city.longitude),
        )?;

        let page = self.renderer.publish(&breweries, &forecast, state.name, &city.name);

        Ok(Report {
            state: state.name.to_string(),
            city: city.name.clone(),
            breweries: breweries.len(),
            forecast_days: forecast.len(),
            page,
        })
    }
}
