use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A US state (or DC) and its two-letter postal code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateEntry {
    pub name: &'static str,
    pub code: &'static str,
}

/// A town or city returned by the geography dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub county: String,
}

/// Cities of one state keyed by name. Duplicate names collide, last one wins.
pub type CityDirectory = BTreeMap<String, CityRecord>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreweryRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brewery_type: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub address_2: Option<String>,
    #[serde(default)]
    pub address_3: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
}

/// One day of the normalized forecast, imperial units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Unix timestamp (seconds) of the forecast day.
    pub day: i64,
    /// Daily maximum temperature, Fahrenheit.
    pub temp: f64,
    /// Miles per hour.
    pub wind_speed: f64,
    pub humidity: u8,
    /// OpenWeather icon code, e.g. "01d".
    pub icon: String,
}
