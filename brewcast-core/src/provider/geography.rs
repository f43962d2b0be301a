use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    dump::DebugDump,
    error::BrewcastError,
    model::{CityDirectory, CityRecord},
    provider::fetch_text,
    states::resolve_state_code,
};

use super::GeographySource;

const FIELDS: &str =
    "include(name), include(state), include(longitude), include(latitude), include(county)";

/// Towns and cities from the OpenDataSoft "cities and towns of the United States" export.
#[derive(Debug, Clone)]
pub struct OpenDataSoftGeography {
    http: Client,
    export_url: String,
    dump: DebugDump,
}

impl OpenDataSoftGeography {
    pub fn new(http: Client, export_url: String, dump: DebugDump) -> Self {
        Self { http, export_url, dump }
    }

    fn request(&self, state_code: &str) -> RequestBuilder {
        let refine = format!("state:{state_code}");
        self.http.get(&self.export_url).query(&[
            ("select", FIELDS),
            ("order_by", "name asc"),
            ("limit", "-1"),
            ("refine", refine.as_str()),
            ("pretty", "false"),
            ("timezone", "UTC"),
        ])
    }
}

#[derive(Debug, Deserialize)]
struct OdsCity {
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    county: Option<String>,
}

/// Turn the export payload into a name-keyed directory.
///
/// A record without a name (or coordinates) rejects the whole payload.
pub fn parse_cities(body: &str) -> Result<CityDirectory, BrewcastError> {
    let records: Vec<OdsCity> = serde_json::from_str(body)
        .map_err(|e| BrewcastError::geography(anyhow::Error::new(e).context("Failed to parse city list JSON")))?;

    let mut cities = CityDirectory::new();
    for (idx, record) in records.into_iter().enumerate() {
        let name = record
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| BrewcastError::DataFormat(format!("city record #{idx} has no name")))?;

        let (Some(latitude), Some(longitude)) = (record.latitude, record.longitude) else {
            return Err(BrewcastError::DataFormat(format!("city '{name}' has no coordinates")));
        };

        cities.insert(
            name.clone(),
            CityRecord { name, latitude, longitude, county: record.county.unwrap_or_default() },
        );
    }

    Ok(cities)
}

#[async_trait]
impl GeographySource for OpenDataSoftGeography {
    async fn resolve_cities(&self, state: &str) -> Result<CityDirectory, BrewcastError> {
        let code = resolve_state_code(state)?;
        info!("Gathering cities in {state}...");

        let request = self.request(code);
        debug!(state = code, "Requesting city list");

        let body = fetch_text(request, "OpenDataSoft").await.map_err(BrewcastError::geography)?;
        self.dump.save("geography.json", body.clone());

        let cities = parse_cities(&body)?;
        info!("{} cities acquired", cities.len());
        Ok(cities)
    }
}
