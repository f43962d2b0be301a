use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info};

use crate::{dump::DebugDump, error::BrewcastError, model::BreweryRecord, provider::fetch_text, slug::slugify};

use super::BrewerySource;

/// Open Brewery DB directory client.
#[derive(Debug, Clone)]
pub struct OpenBreweryClient {
    http: Client,
    base_url: String,
    dump: DebugDump,
}

impl OpenBreweryClient {
    pub fn new(http: Client, base_url: String, dump: DebugDump) -> Self {
        Self { http, base_url, dump }
    }

    fn request(&self, state: &str, city: &str) -> RequestBuilder {
        let url = format!("{}/breweries", self.base_url.trim_end_matches('/'));
        self.http.get(url).query(&[
            ("by_state", slugify(state, '_')),
            ("by_city", slugify(city, '_')),
            ("sort", "name:asc".to_string()),
        ])
    }
}

pub fn parse_breweries(body: &str) -> anyhow::Result<Vec<BreweryRecord>> {
    serde_json::from_str(body).context("Failed to parse Open Brewery DB JSON")
}

#[async_trait]
impl BrewerySource for OpenBreweryClient {
    async fn fetch_breweries(&self, state: &str, city: &str) -> Result<Vec<BreweryRecord>, BrewcastError> {
        info!("Gathering brewery results for {city}...");

        let request = self.request(state, city);
        debug!(state, city, "Requesting breweries");

        let body = fetch_text(request, "Open Brewery DB").await.map_err(BrewcastError::brewery)?;
        self.dump.save("breweries.json", body.clone());

        let breweries = parse_breweries(&body).map_err(BrewcastError::brewery)?;
        info!("{} breweries found", breweries.len());
        Ok(breweries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_slugs_and_name_sort() {
        let client = OpenBreweryClient::new(Client::new(), "https://example.test/v1/".into(), DebugDump::disabled());
        let req = client.request("New York", "Saratoga Springs").build().unwrap();

        assert_eq!(req.url().path(), "/v1/breweries");
        assert_eq!(
            req.url().query(),
            Some("by_state=new_york&by_city=saratoga_springs&sort=name%3Aasc")
        );
    }

    #[test]
    fn richmond_virginia_slugs() {
        let client = OpenBreweryClient::new(Client::new(), "https://example.test".into(), DebugDump::disabled());
        let req = client.request("Virginia", "Richmond").build().unwrap();
        let query = req.url().query().unwrap();

        assert!(query.contains("by_state=virginia"));
        assert!(query.contains("by_city=richmond"));
    }

    #[test]
    fn parses_brewery_list_with_nulls_and_extra_fields() {
        let body = r#"[{
            "id": "ardent-craft-ales-richmond",
            "name": "Ardent Craft Ales",
            "brewery_type": "micro",
            "street": "3200 W Leigh St",
            "address_2": null,
            "address_3": null,
            "city": "Richmond",
            "state": "Virginia",
            "postal_code": "23230-4416",
            "country": "United States",
            "longitude": "-77.47",
            "latitude": "37.56",
            "phone": "8043592739",
            "website_url": "http://www.ardentcraftales.com"
        }]"#;

        let breweries = parse_breweries(body).unwrap();
        assert_eq!(breweries.len(), 1);

        let ardent = &breweries[0];
        assert_eq!(ardent.name.as_deref(), Some("Ardent Craft Ales"));
        assert_eq!(ardent.address_2, None);
        assert_eq!(ardent.postal_code.as_deref(), Some("23230-4416"));
        assert_eq!(ardent.website_url.as_deref(), Some("http://www.ardentcraftales.com"));
    }

    #[test]
    fn error_object_is_rejected() {
        let err = parse_breweries(r#"{"message": "Couldn't find Brewery"}"#).unwrap_err();
        assert!(err.to_string().contains("Open Brewery DB"));
    }
}
