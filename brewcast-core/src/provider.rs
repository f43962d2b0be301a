use crate::{
    Config,
    dump::DebugDump,
    error::BrewcastError,
    model::{BreweryRecord, CityDirectory, ForecastDay},
    provider::{brewery::OpenBreweryClient, geography::OpenDataSoftGeography, weather::OpenWeatherClient},
};
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::{fmt::Debug, time::Duration};

pub mod brewery;
pub mod geography;
pub mod weather;

/// Towns and cities of a state.
#[async_trait]
pub trait GeographySource: Send + Sync + Debug {
    /// `state` may be a code or a full name.
    async fn resolve_cities(&self, state: &str) -> Result<CityDirectory, BrewcastError>;
}

#[async_trait]
pub trait BrewerySource: Send + Sync + Debug {
    async fn fetch_breweries(&self, state: &str, city: &str) -> Result<Vec<BreweryRecord>, BrewcastError>;
}

#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    /// Daily forecast ordered by ascending date.
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<ForecastDay>, BrewcastError>;
}

/// The three upstream services the pipeline talks to.
#[derive(Debug)]
pub struct Sources {
    pub geography: Box<dyn GeographySource>,
    pub breweries: Box<dyn BrewerySource>,
    pub forecast: Box<dyn ForecastSource>,
}

/// Construct the HTTP-backed sources from config.
pub fn sources_from_config(config: &Config) -> Result<Sources, BrewcastError> {
    let api_key = config.api_key().ok_or_else(|| {
        BrewcastError::Config(format!(
            "No OpenWeather API key configured.\n\
             Hint: run `brewcast configure` or set {}.",
            crate::config::API_KEY_ENV
        ))
    })?;

    let http = http_client(config.request_timeout())?;
    let dump = DebugDump::from_config(&config.debug_dump);

    Ok(Sources {
        geography: Box::new(OpenDataSoftGeography::new(
            http.clone(),
            config.endpoints.geography.clone(),
            dump.clone(),
        )),
        breweries: Box::new(OpenBreweryClient::new(
            http.clone(),
            config.endpoints.brewery.clone(),
            dump.clone(),
        )),
        forecast: Box::new(OpenWeatherClient::new(
            http,
            config.endpoints.weather.clone(),
            api_key.to_owned(),
            dump,
        )),
    })
}

/// Shared client; every request is bounded by `timeout`.
pub fn http_client(timeout: Duration) -> Result<Client, BrewcastError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("brewcast/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| BrewcastError::Config(format!("Failed to build HTTP client: {e}")))
}

/// Send `request` and return the body of a successful response.
pub(crate) async fn fetch_text(request: RequestBuilder, service: &str) -> anyhow::Result<String> {
    let res = request
        .send()
        .await
        .with_context(|| format!("Failed to send request to {service}"))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read {service} response body"))?;

    if !status.is_success() {
        return Err(anyhow!(
            "{service} request failed with status {}: {}",
            status,
            truncate_body(&body),
        ));
    }

    Ok(body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = sources_from_config(&cfg).unwrap_err();

        assert!(matches!(err, BrewcastError::Config(_)));
        assert!(err.to_string().contains("No OpenWeather API key configured"));
        assert!(err.to_string().contains("brewcast configure"));
    }

    #[test]
    fn sources_from_config_works_when_key_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(sources_from_config(&cfg).is_ok());
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        let short = truncate_body(&body);
        assert_eq!(short.len(), 203);
        assert!(short.ends_with("..."));
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let body = "é".repeat(300);
        assert!(truncate_body(&body).ends_with("..."));
    }
}
