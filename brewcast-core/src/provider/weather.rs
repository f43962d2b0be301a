use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{dump::DebugDump, error::BrewcastError, model::ForecastDay, provider::fetch_text};

use super::ForecastSource;

/// OpenWeather One Call client (daily forecast, imperial units).
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
    dump: DebugDump,
}

impl OpenWeatherClient {
    pub fn new(http: Client, base_url: String, api_key: String, dump: DebugDump) -> Self {
        Self { http, base_url, api_key, dump }
    }

    fn request(&self, latitude: f64, longitude: f64) -> RequestBuilder {
        let url = format!("{}/onecall", self.base_url.trim_end_matches('/'));
        self.http.get(url).query(&[
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("exclude", "minutely,alerts".to_string()),
            ("units", "imperial".to_string()),
            ("appid", self.api_key.clone()),
        ])
    }
}

#[derive(Debug, Deserialize)]
struct OwTemp {
    max: f64,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwDaily {
    dt: i64,
    temp: OwTemp,
    wind_speed: f64,
    humidity: u8,
    #[serde(default)]
    weather: Vec<OwCondition>,
}

#[derive(Debug, Deserialize)]
struct OwOneCallResponse {
    daily: Vec<OwDaily>,
}

/// Normalize a One Call payload into daily entries sorted by date.
pub fn daily_forecast(body: &str) -> anyhow::Result<Vec<ForecastDay>> {
    let parsed: OwOneCallResponse =
        serde_json::from_str(body).context("Failed to parse OpenWeather One Call JSON")?;

    let mut days: Vec<ForecastDay> = parsed
        .daily
        .into_iter()
        .map(|d| ForecastDay {
            day: d.dt,
            temp: d.temp.max,
            wind_speed: d.wind_speed,
            humidity: d.humidity,
            icon: d.weather.into_iter().next().map(|w| w.icon).unwrap_or_default(),
        })
        .collect();

    days.sort_by_key(|d| d.day);
    Ok(days)
}

#[async_trait]
impl ForecastSource for OpenWeatherClient {
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<ForecastDay>, BrewcastError> {
        info!("Gathering weather results...");

        let request = self.request(latitude, longitude);
        debug!(latitude, longitude, "Requesting daily forecast");

        let body = fetch_text(request, "OpenWeather").await.map_err(BrewcastError::weather)?;
        self.dump.save("weather.json", body.clone());

        daily_forecast(&body).map_err(BrewcastError::weather)
    }
}
