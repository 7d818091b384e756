//! Nominatim address resolver.
//!
//! Issues `GET {url}?q=<query>&format=json&limit=1&countrycodes=<codes>` and
//! takes the first hit. Nominatim returns coordinates as strings.

use crate::AddressResolver;
use async_trait::async_trait;
use mof_core::{config::GeocoderConfig, Coordinates, Error, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

#[derive(Debug, Clone)]
pub struct NominatimResolver {
    client: reqwest::Client,
    url: String,
    country_codes: String,
}

impl NominatimResolver {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::AddressLookupFailed(format!("HTTP client setup: {e}")))?;
        Ok(Self {
            client,
            url: config.url.clone(),
            country_codes: config.country_codes.clone(),
        })
    }
}

#[async_trait]
impl AddressResolver for NominatimResolver {
    async fn resolve(&self, query: &str) -> Result<Option<Coordinates>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }
        tracing::debug!(query, url = %self.url, "resolving address");

        let places: Vec<Place> = self
            .client
            .get(&self.url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", "1"),
                ("countrycodes", self.country_codes.as_str()),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::AddressLookupFailed(e.to_string()))?
            .json()
            .await
            .map_err(|e| Error::AddressLookupFailed(format!("bad response body: {e}")))?;

        let Some(place) = places.into_iter().next() else {
            tracing::debug!(query, "address lookup returned no candidate");
            return Ok(None);
        };

        let lat = place.lat.parse::<f64>();
        let lon = place.lon.parse::<f64>();
        match (lat, lon) {
            (Ok(lat), Ok(lon)) => Ok(Some(Coordinates::new(lat, lon))),
            _ => Err(Error::AddressLookupFailed(format!(
                "unparsable coordinates {:?},{:?}",
                place.lat, place.lon
            ))),
        }
    }
}
