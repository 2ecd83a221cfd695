//! Validate → fetch → compute, for one location at a time.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use flydays_analysis::Thresholds;
use flydays_core::Config;
use serde::Serialize;

use crate::geocode::Geocoder;
use crate::provider::WeatherProvider;
use crate::report::AnalysisReport;
use crate::types::{GeocodeMatch, Location, WeatherError};
use crate::window::{parse_timezone, HistoricalWindow};

/// Runs flight-day analyses against the archive.
///
/// Holds no per-request state; one instance can serve any number of
/// concurrent analyses.
#[derive(Debug, Clone)]
pub struct FlightDayService {
    provider: WeatherProvider,
    geocoder: Geocoder,
    timezone: Tz,
    window_years: u32,
}

/// A completed analysis and the window it covered
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub location: Location,
    pub window: HistoricalWindow,
    pub result: flydays_analysis::AnalysisResult,
}

impl Analysis {
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport::new(self)
    }
}

impl FlightDayService {
    pub fn new(
        provider: WeatherProvider,
        geocoder: Geocoder,
        timezone: Tz,
        window_years: u32,
    ) -> Self {
        Self {
            provider,
            geocoder,
            timezone,
            window_years,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let timezone = parse_timezone(&config.archive.timezone)?;
        let provider = WeatherProvider::new(&config.archive, &config.http)?;
        let geocoder = Geocoder::new(&config.geocoding, &config.http)?;
        Ok(Self::new(
            provider,
            geocoder,
            timezone,
            config.archive.window_years,
        ))
    }

    pub async fn geocode(&self, place: &str) -> Result<Vec<GeocodeMatch>, WeatherError> {
        self.geocoder.search(place).await
    }

    /// Best match for `place`, or `LocationNotFound`.
    pub async fn resolve_place(&self, place: &str) -> Result<Location, WeatherError> {
        let matches = self.geocoder.search(place).await?;
        matches
            .first()
            .map(GeocodeMatch::to_location)
            .ok_or_else(|| WeatherError::LocationNotFound(place.trim().to_string()))
    }

    pub fn window_at(&self, now: DateTime<Utc>) -> Result<HistoricalWindow, WeatherError> {
        HistoricalWindow::trailing(now, self.timezone, self.window_years)
    }

    pub async fn analyze(
        &self,
        location: &Location,
        thresholds: Thresholds,
    ) -> Result<Analysis, WeatherError> {
        self.analyze_at(location, thresholds, Utc::now()).await
    }

    /// Analyze using the window that ends the day before `now`.
    pub async fn analyze_at(
        &self,
        location: &Location,
        thresholds: Thresholds,
        now: DateTime<Utc>,
    ) -> Result<Analysis, WeatherError> {
        thresholds.validate()?;
        location.validate()?;

        tracing::info!(
            "Analyzing flight days for {} ({}, {})",
            location.label(),
            location.latitude,
            location.longitude
        );
        tracing::debug!("Thresholds: {:?}", thresholds);

        let window = self.window_at(now)?;
        tracing::info!(
            "Fetching weather data from {} to {}",
            window.start_param(),
            window.end_param()
        );

        let series = self.provider.fetch_daily(location, &window).await?;
        let result = flydays_analysis::analyze(location.coordinates(), &series, thresholds)?;

        tracing::info!(
            "Analysis complete: {} avg flight days, ±{:.1} std dev over {} years",
            result.average_flight_days,
            result.standard_deviation,
            result.years_analyzed
        );

        Ok(Analysis {
            location: location.clone(),
            window,
            result,
        })
    }

    /// Geocode `place`, then analyze its best match.
    pub async fn analyze_place(
        &self,
        place: &str,
        thresholds: Thresholds,
    ) -> Result<Analysis, WeatherError> {
        thresholds.validate()?;
        let location = self.resolve_place(place).await?;
        self.analyze(&location, thresholds).await
    }
}
