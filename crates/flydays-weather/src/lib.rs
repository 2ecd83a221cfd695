//! Weather collaborators for Flydays
//!
//! Fetches daily history from the Open-Meteo archive, resolves place names
//! through Nominatim, and ties both to the flight-day computation in
//! `flydays-analysis`.

pub mod error_mapping;
pub mod geocode;
pub mod location;
pub mod provider;
pub mod report;
pub mod retry;
pub mod service;
pub mod types;
pub mod window;

pub use geocode::Geocoder;
pub use location::validate_norway;
pub use provider::WeatherProvider;
pub use report::AnalysisReport;
pub use retry::RetryConfig;
pub use service::{Analysis, FlightDayService};
pub use types::*;
pub use window::HistoricalWindow;
