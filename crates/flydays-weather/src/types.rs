use flydays_analysis::{AnalysisError, Coordinates};
use serde::{Deserialize, Serialize};

/// Geographic location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Display name, when the location came from a place search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            name: None,
        }
    }

    pub fn named(latitude: f64, longitude: f64, name: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            name: Some(name.into()),
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Name if known, otherwise "lat, lon"
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{:.4}, {:.4}", self.latitude, self.longitude),
        }
    }
}

/// One candidate from a place-name search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeMatch {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeocodeMatch {
    pub fn to_location(&self) -> Location {
        Location::named(self.latitude, self.longitude, self.display_name.clone())
    }
}

/// Weather and geocoding errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("No weather data: {0}")]
    NoData(String),
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
    #[error("Coordinates {latitude}, {longitude} are outside Norway")]
    OutsideNorway { latitude: f64, longitude: f64 },
    #[error("Location not found: {0}")]
    LocationNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}
