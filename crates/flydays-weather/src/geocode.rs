//! Place-name search: convert a free-text name to candidate coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required, but its
//! usage policy requires an identifying User-Agent.

use std::sync::Arc;
use std::time::Duration;

use flydays_core::{GeocodingConfig, HttpConfig};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::retry::{with_retry, RetryConfig};
use crate::types::{GeocodeMatch, WeatherError};

/// Appended to every query so ambiguous names resolve inside Norway
const COUNTRY_SUFFIX: &str = "Norway";

/// Nominatim serves coordinates as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

impl NominatimPlace {
    fn into_match(self) -> Option<GeocodeMatch> {
        let latitude = self.lat.trim().parse::<f64>().ok()?;
        let longitude = self.lon.trim().parse::<f64>().ok()?;
        Some(GeocodeMatch {
            display_name: self.display_name,
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Arc<Client>,
    base_url: String,
    country_code: String,
    limit: u32,
    retry: RetryConfig,
}

impl Geocoder {
    pub fn new(geocoding: &GeocodingConfig, http: &HttpConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(geocoding.timeout_secs))
            .user_agent(http.user_agent.as_str())
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: geocoding.base_url.clone(),
            country_code: geocoding.country_code.clone(),
            limit: geocoding.limit,
            retry: RetryConfig::from(http),
        })
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Search for places matching `place`, best match first.
    ///
    /// An empty list means nothing matched; that is not an error here.
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, place: &str) -> Result<Vec<GeocodeMatch>, WeatherError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(WeatherError::InvalidInput("no place name provided".to_string()));
        }

        let query = [
            ("q", format!("{}, {}", place, COUNTRY_SUFFIX)),
            ("format", "json".to_string()),
            ("limit", self.limit.to_string()),
            ("countrycodes", self.country_code.clone()),
        ];

        let response = with_retry(&self.retry, || {
            self.client.get(&self.base_url).query(&query).send()
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::debug!("Geocode returned status {}", status);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(format!("geocode response: {}", e)))?;

        let matches: Vec<GeocodeMatch> = places
            .into_iter()
            .filter_map(|p| {
                let name = p.display_name.clone();
                let parsed = p.into_match();
                if parsed.is_none() {
                    tracing::debug!("Skipping geocode hit with bad coordinates: {}", name);
                }
                parsed
            })
            .collect();

        tracing::info!("Geocoded {:?} to {} matches", place, matches.len());
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_parses_string_coordinates() {
        let place = NominatimPlace {
            lat: "59.9133301".into(),
            lon: "10.7389701".into(),
            display_name: "Oslo, Norge".into(),
        };
        let m = place.into_match().unwrap();
        assert_eq!(m.latitude, 59.9133301);
        assert_eq!(m.longitude, 10.7389701);
        assert_eq!(m.display_name, "Oslo, Norge");
    }

    #[test]
    fn test_place_with_bad_coordinates_is_dropped() {
        let place = NominatimPlace {
            lat: "north".into(),
            lon: "10.0".into(),
            display_name: "Nowhere".into(),
        };
        assert!(place.into_match().is_none());
    }

    #[tokio::test]
    async fn test_blank_place_rejected_without_request() {
        let mut config = GeocodingConfig::default();
        // Unroutable; a request would fail with a network error instead
        config.base_url = "http://127.0.0.1:9/search".into();
        let geocoder = Geocoder::new(&config, &HttpConfig::default()).unwrap();
        let result = geocoder.search("   ").await;
        assert!(matches!(result, Err(WeatherError::InvalidInput(_))));
    }
}
