//! Open-Meteo historical archive client.

use std::sync::Arc;
use std::time::Duration;

use flydays_analysis::RawDailySeries;
use flydays_core::{ArchiveConfig, HttpConfig};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::retry::{with_retry, RetryConfig};
use crate::types::{Location, WeatherError};
use crate::window::HistoricalWindow;

/// Daily variables requested from the archive
pub const DAILY_VARIABLES: &str = "precipitation_sum,wind_speed_10m_mean,wind_gusts_10m_max";

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: Option<RawDailySeries>,
}

/// Body Open-Meteo sends with a 400
#[derive(Debug, Deserialize)]
struct ArchiveErrorBody {
    reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    timezone: String,
    retry: RetryConfig,
}

impl WeatherProvider {
    pub fn new(archive: &ArchiveConfig, http: &HttpConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(archive.timeout_secs))
            .user_agent(http.user_agent.as_str())
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: archive.base_url.clone(),
            timezone: archive.timezone.clone(),
            retry: RetryConfig::from(http),
        })
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Fetch daily precipitation, mean wind and max gusts for `window`.
    ///
    /// Values are returned as delivered: wind in km/h, gaps as `None`.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_daily(
        &self,
        location: &Location,
        window: &HistoricalWindow,
    ) -> Result<RawDailySeries, WeatherError> {
        let query = [
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("start_date", window.start_param()),
            ("end_date", window.end_param()),
            ("daily", DAILY_VARIABLES.to_string()),
            ("timezone", self.timezone.clone()),
        ];

        tracing::debug!(
            "Requesting archive data {} to {} for {}",
            window.start_param(),
            window.end_param(),
            location.label()
        );

        let response = with_retry(&self.retry, || {
            self.client.get(&self.base_url).query(&query).send()
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ArchiveErrorBody>(&text)
                .ok()
                .and_then(|body| body.reason)
                .unwrap_or(text);
            tracing::warn!("Archive returned {}: {}", status, message);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ArchiveResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(format!("archive response: {}", e)))?;

        let daily = body.daily.ok_or_else(|| {
            WeatherError::NoData("no weather data received from the archive".to_string())
        })?;

        if daily.is_empty() {
            return Err(WeatherError::NoData(
                "no historical weather data available for this location and time period"
                    .to_string(),
            ));
        }

        tracing::info!("Received {} days of archive data", daily.len());
        Ok(daily)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_default_config() {
        let provider =
            WeatherProvider::new(&ArchiveConfig::default(), &HttpConfig::default()).unwrap();
        assert_eq!(provider.timezone(), "Europe/Oslo");
        assert_eq!(provider.base_url, "https://archive-api.open-meteo.com/v1/archive");
        assert_eq!(provider.retry.max_retries, 3);
    }

    #[test]
    fn test_error_body_reason() {
        let body: ArchiveErrorBody =
            serde_json::from_str(r#"{"error":true,"reason":"Latitude must be in range"}"#).unwrap();
        assert_eq!(body.reason.as_deref(), Some("Latitude must be in range"));
    }
}
